//! Paths whose control points are relative coordinates.

pub(crate) mod segment;

use crate::coord::point::RelativePoint;
use crate::expression::context::EvalContext;
use crate::foundation::core::{BezPath, PathEl};
use crate::foundation::error::{GeomError, GeomResult};
use crate::path::segment::PathSegment;

/// Concrete geometry produced by [`RelativePath::materialize`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    /// Resolved drawing commands.
    pub path: BezPath,
    /// `true` for the non-zero fill rule, `false` for even-odd.
    pub non_zero_winding: bool,
}

/// An ordered, append-only sequence of [`PathSegment`]s plus a winding flag.
///
/// Whether any control point is dynamic is tracked incrementally as segments are
/// added; the flag only ever goes from `false` to `true`.
#[derive(Debug, Clone)]
pub struct RelativePath {
    segments: Vec<PathSegment>,
    non_zero_winding: bool,
    dynamic: bool,
}

impl Default for RelativePath {
    fn default() -> Self {
        Self::new()
    }
}

impl RelativePath {
    /// Empty path using the non-zero winding rule.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            non_zero_winding: true,
            dynamic: false,
        }
    }

    /// Convert a concrete path. Every segment is constant.
    pub fn from_bez_path(path: &BezPath, non_zero_winding: bool) -> Self {
        let mut out = Self::new();
        out.non_zero_winding = non_zero_winding;
        for el in path.elements() {
            out.append(match *el {
                PathEl::MoveTo(p) => PathSegment::StartSubPath(p.into()),
                PathEl::LineTo(p) => PathSegment::LineTo(p.into()),
                PathEl::QuadTo(c, e) => PathSegment::QuadraticTo([c.into(), e.into()]),
                PathEl::CurveTo(c1, c2, e) => {
                    PathSegment::CubicTo([c1.into(), c2.into(), e.into()])
                }
                PathEl::ClosePath => PathSegment::CloseSubPath,
            });
        }
        out
    }

    /// Append a segment.
    pub fn append(&mut self, segment: PathSegment) {
        self.dynamic |= segment.is_dynamic();
        self.segments.push(segment);
    }

    /// Append a [`PathSegment::StartSubPath`].
    pub fn start_sub_path(&mut self, p: impl Into<RelativePoint>) -> &mut Self {
        self.append(PathSegment::StartSubPath(p.into()));
        self
    }

    /// Append a [`PathSegment::LineTo`].
    pub fn line_to(&mut self, p: impl Into<RelativePoint>) -> &mut Self {
        self.append(PathSegment::LineTo(p.into()));
        self
    }

    /// Append a [`PathSegment::QuadraticTo`].
    pub fn quadratic_to(
        &mut self,
        control: impl Into<RelativePoint>,
        end: impl Into<RelativePoint>,
    ) -> &mut Self {
        self.append(PathSegment::QuadraticTo([control.into(), end.into()]));
        self
    }

    /// Append a [`PathSegment::CubicTo`].
    pub fn cubic_to(
        &mut self,
        control1: impl Into<RelativePoint>,
        control2: impl Into<RelativePoint>,
        end: impl Into<RelativePoint>,
    ) -> &mut Self {
        self.append(PathSegment::CubicTo([
            control1.into(),
            control2.into(),
            end.into(),
        ]));
        self
    }

    /// Append a [`PathSegment::CloseSubPath`].
    pub fn close_sub_path(&mut self) -> &mut Self {
        self.append(PathSegment::CloseSubPath);
        self
    }

    /// Replace the segment at `index` wholesale.
    ///
    /// The dynamic flag is updated the same way as on append: it can become `true`
    /// but is never cleared, even if the replaced segment was the only dynamic one.
    pub fn replace_segment(&mut self, index: usize, segment: PathSegment) -> GeomResult<()> {
        let len = self.segments.len();
        let slot = self.segments.get_mut(index).ok_or_else(|| {
            GeomError::validation(format!("segment index {index} out of range (len {len})"))
        })?;
        self.dynamic |= segment.is_dynamic();
        *slot = segment;
        Ok(())
    }

    /// Segments in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Return `true` when there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `true` for the non-zero fill rule, `false` for even-odd.
    pub fn uses_non_zero_winding(&self) -> bool {
        self.non_zero_winding
    }

    /// Select the fill rule.
    pub fn set_non_zero_winding(&mut self, non_zero: bool) {
        self.non_zero_winding = non_zero;
    }

    /// Memoized: `true` if any appended segment had a dynamic control point.
    pub fn contains_any_dynamic_points(&self) -> bool {
        self.dynamic
    }

    /// Exchange contents (segments and both flags) with `other`.
    pub fn swap_with(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Append every resolved segment to `path`, in order.
    pub fn add_to_path<C: EvalContext + ?Sized>(
        &self,
        path: &mut BezPath,
        ctx: &C,
    ) -> GeomResult<()> {
        for segment in &self.segments {
            segment.add_to_path(path, ctx)?;
        }
        Ok(())
    }

    /// Resolve into concrete geometry. The first coordinate that fails to resolve
    /// aborts the whole path.
    #[tracing::instrument(level = "trace", skip_all, fields(segments = self.segments.len()))]
    pub fn materialize<C: EvalContext + ?Sized>(&self, ctx: &C) -> GeomResult<ResolvedPath> {
        let mut path = BezPath::new();
        self.add_to_path(&mut path, ctx)?;
        Ok(ResolvedPath {
            path,
            non_zero_winding: self.non_zero_winding,
        })
    }
}

/// Strict equality: segment count, winding flag, the *cached* dynamic flag, then
/// pairwise tags and control points.
impl PartialEq for RelativePath {
    fn eq(&self, other: &Self) -> bool {
        if self.segments.len() != other.segments.len()
            || self.non_zero_winding != other.non_zero_winding
            || self.dynamic != other.dynamic
        {
            return false;
        }

        self.segments.iter().zip(&other.segments).all(|(a, b)| {
            if a.kind() != b.kind() {
                return false;
            }
            let (pa, pb) = (a.control_points(), b.control_points());
            debug_assert_eq!(pa.len(), pb.len());
            pa == pb
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/relative_path.rs"]
mod tests;
