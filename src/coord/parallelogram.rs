use crate::coord::point::RelativePoint;
use crate::expression::context::EvalContext;
use crate::foundation::core::{Point, Rect, Vec2};
use crate::foundation::error::GeomResult;

/// Affine region described by three relative corners.
///
/// The bottom-right corner is implied (`top_right + bottom_left - top_left`) and never
/// stored. Degenerate corner sets are legal values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelativeParallelogram {
    /// Top-left corner.
    pub top_left: RelativePoint,
    /// Top-right corner.
    pub top_right: RelativePoint,
    /// Bottom-left corner.
    pub bottom_left: RelativePoint,
}

impl RelativeParallelogram {
    /// Build from the three stored corners.
    pub fn new(
        top_left: impl Into<RelativePoint>,
        top_right: impl Into<RelativePoint>,
        bottom_left: impl Into<RelativePoint>,
    ) -> Self {
        Self {
            top_left: top_left.into(),
            top_right: top_right.into(),
            bottom_left: bottom_left.into(),
        }
    }

    /// Axis-aligned parallelogram covering `r`.
    pub fn from_rect(r: Rect) -> Self {
        Self::new((r.x0, r.y0), (r.x1, r.y0), (r.x0, r.y1))
    }

    /// Resolve top-left, top-right and bottom-left.
    pub fn resolve_three_points<C: EvalContext + ?Sized>(&self, ctx: &C) -> GeomResult<[Point; 3]> {
        Ok([
            self.top_left.resolve(ctx)?,
            self.top_right.resolve(ctx)?,
            self.bottom_left.resolve(ctx)?,
        ])
    }

    /// Resolve all four corners: top-left, top-right, bottom-left, bottom-right.
    pub fn resolve_four_corners<C: EvalContext + ?Sized>(&self, ctx: &C) -> GeomResult<[Point; 4]> {
        let [tl, tr, bl] = self.resolve_three_points(ctx)?;
        Ok([tl, tr, bl, tr + (bl - tl)])
    }

    /// Smallest axis-aligned rectangle containing the resolved corners.
    pub fn bounding_box<C: EvalContext + ?Sized>(&self, ctx: &C) -> GeomResult<Rect> {
        let corners = self.resolve_four_corners(ctx)?;
        Ok(corners[1..]
            .iter()
            .fold(Rect::from_points(corners[0], corners[0]), |r, p| {
                r.union_pt(*p)
            }))
    }

    /// Return `true` if any corner is dynamic.
    pub fn is_dynamic(&self) -> bool {
        self.top_left.is_dynamic() || self.top_right.is_dynamic() || self.bottom_left.is_dynamic()
    }
}

/// Map a point in the parallelogram's internal frame to parent space.
///
/// Internal `x` is a distance along the top edge, `y` a distance along the left edge.
/// A zero-length edge contributes nothing.
pub fn point_for_internal_coord(corners: &[Point; 3], p: Point) -> Point {
    corners[0] + unit(corners[1] - corners[0]) * p.x + unit(corners[2] - corners[0]) * p.y
}

/// Inverse of [`point_for_internal_coord`]; `None` if the corners are collinear.
pub fn internal_coord_for_point(corners: &[Point; 3], target: Point) -> Option<Point> {
    let u = unit(corners[1] - corners[0]);
    let v = unit(corners[2] - corners[0]);
    let det = u.cross(v);
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let t = target - corners[0];
    Some(Point::new(t.cross(v) / det, u.cross(t) / det))
}

fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len == 0.0 { Vec2::ZERO } else { v / len }
}

#[cfg(test)]
#[path = "../../tests/unit/coord/parallelogram.rs"]
mod tests;
