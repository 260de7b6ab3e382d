use crate::foundation::core::{Affine, Point};

/// Relative tolerance used when deciding whether a 2x2 system is singular.
const SINGULAR_EPS: f64 = 1e-12;

/// Solve for the affine map taking `source[i]` to `target[i]` for `i` in `0..3`.
///
/// Returns `None` when the source points are collinear (or coincident) or when the
/// resulting transform would collapse the plane, i.e. when the targets are collinear.
pub(crate) fn solve_three_point_affine(source: [Point; 3], target: [Point; 3]) -> Option<Affine> {
    let u = source[1] - source[0];
    let v = source[2] - source[0];
    let det = u.cross(v);
    if !is_regular(det, u.hypot() * v.hypot()) {
        return None;
    }

    let du = target[1] - target[0];
    let dv = target[2] - target[0];

    // [du dv] * [u v]^-1, written out for the 2x2 case.
    let a = (du.x * v.y - dv.x * u.y) / det;
    let c = (dv.x * u.x - du.x * v.x) / det;
    let b = (du.y * v.y - dv.y * u.y) / det;
    let d = (dv.y * u.x - du.y * v.x) / det;

    let s0 = source[0];
    let e = target[0].x - (a * s0.x + c * s0.y);
    let f = target[0].y - (b * s0.x + d * s0.y);

    let t = Affine::new([a, b, c, d, e, f]);
    let scale = (a.abs() + c.abs()) * (b.abs() + d.abs());
    if !is_regular(t.determinant(), scale) || !t.is_finite() {
        return None;
    }
    Some(t)
}

/// Three-point affine fit that falls back to the identity transform when the fit is
/// degenerate.
pub fn affine_from_three_points(source: [Point; 3], target: [Point; 3]) -> Affine {
    solve_three_point_affine(source, target).unwrap_or(Affine::IDENTITY)
}

fn is_regular(det: f64, scale: f64) -> bool {
    det.is_finite() && det != 0.0 && det.abs() > SINGULAR_EPS * scale
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
