pub use kurbo::{Affine, BezPath, PathEl, Point, Rect, Vec2};

/// Union of two optional rectangles.
///
/// `None` stands for "no area yet", so the first real rectangle is taken as-is
/// rather than being grown to include the origin.
pub(crate) fn union_rect(acc: Option<Rect>, r: Rect) -> Option<Rect> {
    Some(match acc {
        Some(a) => a.union(r),
        None => r,
    })
}

/// Return `true` when `t` is (numerically) the identity transform.
pub(crate) fn is_identity(t: Affine) -> bool {
    t.as_coeffs() == Affine::IDENTITY.as_coeffs()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
