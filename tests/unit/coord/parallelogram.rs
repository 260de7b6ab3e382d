use super::*;
use crate::expression::context::EmptyContext;

fn skewed() -> RelativeParallelogram {
    RelativeParallelogram::new((10.0, 10.0), (110.0, 20.0), (0.0, 60.0))
}

#[test]
fn bottom_right_is_implied() {
    let c = skewed().resolve_four_corners(&EmptyContext).unwrap();
    assert_eq!(c[3], Point::new(100.0, 70.0));
}

#[test]
fn bounding_box_covers_all_corners() {
    let r = skewed().bounding_box(&EmptyContext).unwrap();
    assert_eq!(r, Rect::new(0.0, 10.0, 110.0, 70.0));
}

#[test]
fn dynamism_is_or_of_corners() {
    assert!(!skewed().is_dynamic());
    let mut p = skewed();
    p.bottom_left = RelativePoint::parse("left, bottom").unwrap();
    assert!(p.is_dynamic());
    assert_ne!(p, skewed());
}

#[test]
fn degenerate_corners_are_legal() {
    let p = RelativeParallelogram::new((5.0, 5.0), (5.0, 5.0), (5.0, 5.0));
    assert!(p.resolve_three_points(&EmptyContext).is_ok());
}

#[test]
fn internal_coords_round_trip() {
    let corners = [
        Point::new(10.0, 10.0),
        Point::new(10.0, 110.0),
        Point::new(-40.0, 10.0),
    ];
    let inner = Point::new(30.0, 20.0);
    let outer = point_for_internal_coord(&corners, inner);
    assert_eq!(outer, Point::new(-10.0, 40.0));
    let back = internal_coord_for_point(&corners, outer).unwrap();
    assert!((back.x - inner.x).abs() < 1e-9 && (back.y - inner.y).abs() < 1e-9);
}

#[test]
fn internal_coords_of_collinear_frame_are_none() {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(20.0, 0.0),
    ];
    assert!(internal_coord_for_point(&corners, Point::new(1.0, 1.0)).is_none());
}
