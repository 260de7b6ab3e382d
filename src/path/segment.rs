use crate::coord::point::RelativePoint;
use crate::expression::context::EvalContext;
use crate::foundation::core::BezPath;
use crate::foundation::error::GeomResult;

/// Tag of a [`PathSegment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Begin a new sub-path.
    Start,
    /// Straight line.
    Line,
    /// Quadratic Bezier.
    Quad,
    /// Cubic Bezier.
    Cubic,
    /// Close the current sub-path.
    Close,
}

impl SegmentKind {
    /// Number of control points carried by segments of this kind.
    pub fn point_count(self) -> usize {
        match self {
            Self::Start | Self::Line => 1,
            Self::Quad => 2,
            Self::Cubic => 3,
            Self::Close => 0,
        }
    }
}

/// One element of a [`RelativePath`](crate::RelativePath).
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to a point, starting a new sub-path.
    StartSubPath(RelativePoint),
    /// Line to the end point.
    LineTo(RelativePoint),
    /// Quadratic curve: `[control, end]`.
    QuadraticTo([RelativePoint; 2]),
    /// Cubic curve: `[control1, control2, end]`.
    CubicTo([RelativePoint; 3]),
    /// Close the current sub-path.
    CloseSubPath,
}

impl PathSegment {
    /// Tag of this segment.
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::StartSubPath(_) => SegmentKind::Start,
            Self::LineTo(_) => SegmentKind::Line,
            Self::QuadraticTo(_) => SegmentKind::Quad,
            Self::CubicTo(_) => SegmentKind::Cubic,
            Self::CloseSubPath => SegmentKind::Close,
        }
    }

    /// Control points in drawing order; length is `self.kind().point_count()`.
    pub fn control_points(&self) -> &[RelativePoint] {
        match self {
            Self::StartSubPath(p) | Self::LineTo(p) => std::slice::from_ref(p),
            Self::QuadraticTo(p) => p,
            Self::CubicTo(p) => p,
            Self::CloseSubPath => &[],
        }
    }

    /// Return `true` if any control point is dynamic.
    pub fn is_dynamic(&self) -> bool {
        self.control_points().iter().any(RelativePoint::is_dynamic)
    }

    /// Append the resolved drawing command to `path`.
    pub fn add_to_path<C: EvalContext + ?Sized>(
        &self,
        path: &mut BezPath,
        ctx: &C,
    ) -> GeomResult<()> {
        match self {
            Self::StartSubPath(p) => path.move_to(p.resolve(ctx)?),
            Self::LineTo(p) => path.line_to(p.resolve(ctx)?),
            Self::QuadraticTo([c, e]) => path.quad_to(c.resolve(ctx)?, e.resolve(ctx)?),
            Self::CubicTo([c1, c2, e]) => {
                path.curve_to(c1.resolve(ctx)?, c2.resolve(ctx)?, e.resolve(ctx)?)
            }
            Self::CloseSubPath => path.close_path(),
        }
        Ok(())
    }
}
