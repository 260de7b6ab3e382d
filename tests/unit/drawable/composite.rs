use super::*;
use crate::path::RelativePath;

fn assert_maps(t: Affine, from: (f64, f64), to: (f64, f64)) {
    let p = t * Point::from(from);
    assert!(
        (p.x - to.0).abs() < 1e-9 && (p.y - to.1).abs() < 1e-9,
        "{from:?} mapped to {p:?}, expected {to:?}"
    );
}

fn square(x: f64, y: f64, size: f64) -> RelativePath {
    let mut p = RelativePath::new();
    p.start_sub_path((x, y))
        .line_to((x + size, y))
        .line_to((x + size, y + size))
        .line_to((x, y + size))
        .close_sub_path();
    p
}

fn transform_of(d: &Drawing, id: NodeId) -> Affine {
    d.node(id).unwrap().transform()
}

#[test]
fn default_content_area() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    assert_eq!(
        d.content_area(c).unwrap(),
        RelativeRectangle::new(0.0, 100.0, 0.0, 100.0)
    );
    assert_eq!(transform_of(&d, c), Affine::IDENTITY);
}

#[test]
fn bounding_box_fit_maps_content_onto_parallelogram() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    d.set_bounding_box(
        c,
        RelativeParallelogram::new((10.0, 10.0), (110.0, 10.0), (10.0, 60.0)),
    )
    .unwrap();
    let t = transform_of(&d, c);
    assert_maps(t, (50.0, 50.0), (60.0, 35.0));
    assert_maps(t, (100.0, 100.0), (110.0, 60.0));
}

#[test]
fn degenerate_content_area_falls_back_to_identity() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    d.set_bounding_box(
        c,
        RelativeParallelogram::new((10.0, 10.0), (110.0, 10.0), (10.0, 60.0)),
    )
    .unwrap();
    assert_ne!(transform_of(&d, c), Affine::IDENTITY);

    d.set_content_area(c, RelativeRectangle::new(0.0, 10.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(transform_of(&d, c), Affine::IDENTITY);
}

#[test]
fn collinear_bounding_box_falls_back_to_identity() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    d.set_bounding_box(
        c,
        RelativeParallelogram::new((0.0, 0.0), (10.0, 0.0), (20.0, 0.0)),
    )
    .unwrap();
    assert_eq!(transform_of(&d, c), Affine::IDENTITY);
}

#[test]
fn unresolvable_bounding_box_uses_identity() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    let bb = RelativeParallelogram::new(
        RelativePoint::parse("nowhere, 0").unwrap(),
        (100.0, 0.0),
        (0.0, 50.0),
    );
    d.set_bounding_box(c, bb).unwrap();
    assert_eq!(transform_of(&d, c), Affine::IDENTITY);
}

#[test]
fn bounding_box_can_reference_parent_markers() {
    let mut d = Drawing::new();
    let root = d.add_composite("root");
    let c = d.add_composite("c");
    d.append_child(root, c).unwrap();
    d.set_marker(root, Axis::X, "mid", RelativeValue::parse("right / 2").unwrap())
        .unwrap();
    d.set_bounding_box(
        c,
        RelativeParallelogram::new(
            RelativePoint::parse("mid, top").unwrap(),
            RelativePoint::parse("right, top").unwrap(),
            RelativePoint::parse("mid, bottom").unwrap(),
        ),
    )
    .unwrap();
    assert_maps(transform_of(&d, c), (100.0, 100.0), (100.0, 100.0));
    assert_maps(transform_of(&d, c), (0.0, 0.0), (50.0, 0.0));

    // Moving the parent's markers re-fits the dynamic child.
    d.set_marker(root, Axis::X, CONTENT_RIGHT, 200.0).unwrap();
    assert_maps(transform_of(&d, c), (0.0, 0.0), (100.0, 0.0));
    assert_maps(transform_of(&d, c), (100.0, 100.0), (200.0, 100.0));
}

#[test]
fn content_area_requires_reserved_markers_first() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    let mut reordered = MarkerList::new();
    reordered.set_marker("extra", 5.0);
    reordered.set_marker(CONTENT_LEFT, 0.0);
    reordered.set_marker(CONTENT_RIGHT, 100.0);
    d.apply_markers(c, Axis::X, &reordered).unwrap();

    let err = d.content_area(c).unwrap_err();
    assert!(matches!(err, GeomError::Validation(_)));
    assert_eq!(transform_of(&d, c), Affine::IDENTITY);
}

#[test]
fn set_marker_keeps_reserved_slots() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    d.set_marker(c, Axis::Y, "baseline", 80.0).unwrap();
    d.set_content_area(c, Rect::new(0.0, 0.0, 50.0, 50.0).into())
        .unwrap();
    let ys = d.node(c).unwrap().as_composite().unwrap().markers(Axis::Y);
    let names: Vec<_> = ys.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["top", "bottom", "baseline"]);
}

#[test]
fn reset_bounding_box_gives_identity_layout() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    d.set_content_area(c, Rect::new(20.0, 30.0, 40.0, 90.0).into())
        .unwrap();
    assert_ne!(transform_of(&d, c), Affine::IDENTITY);
    d.reset_bounding_box_to_content_area(c).unwrap();

    let comp = d.node(c).unwrap().as_composite().unwrap();
    assert_eq!(
        comp.bounding_box(),
        &RelativeParallelogram::new((20.0, 30.0), (40.0, 30.0), (20.0, 90.0))
    );
    assert_maps(comp.transform(), (33.0, 44.0), (33.0, 44.0));
}

#[test]
fn reset_to_fit_children_uses_child_transforms() {
    let mut d = Drawing::new();
    let root = d.add_composite("root");
    let inner = d.add_composite("inner");
    let p = d.add_path("p", square(0.0, 0.0, 100.0)).unwrap();
    d.append_child(inner, p).unwrap();
    d.append_child(root, inner).unwrap();
    d.set_bounding_box(
        inner,
        RelativeParallelogram::new((10.0, 10.0), (60.0, 10.0), (10.0, 30.0)),
    )
    .unwrap();

    d.reset_content_area_and_bounding_box_to_fit_children(root)
        .unwrap();
    let area = d.content_area(root).unwrap().resolve(&d.context(root)).unwrap();
    let expected = Rect::new(10.0, 10.0, 60.0, 30.0);
    for (got, want) in [
        (area.x0, expected.x0),
        (area.y0, expected.y0),
        (area.x1, expected.x1),
        (area.y1, expected.y1),
    ] {
        assert!((got - want).abs() < 1e-9, "{area:?} != {expected:?}");
    }
}

#[test]
fn fit_children_with_no_children_collapses_to_zero() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    d.reset_content_area_and_bounding_box_to_fit_children(c)
        .unwrap();
    assert_eq!(
        d.content_area(c).unwrap(),
        RelativeRectangle::new(0.0, 0.0, 0.0, 0.0)
    );
    assert_eq!(transform_of(&d, c), Affine::IDENTITY);
}

#[test]
fn auto_fit_preserves_absolute_child_placement() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    d.set_fit_to_children(c, true).unwrap();
    let p = d.add_path("p", square(20.0, 20.0, 10.0)).unwrap();
    d.append_child(c, p).unwrap();

    let group = d.node(c).unwrap().bounds();
    let child = d.node(p).unwrap().bounds();
    assert_eq!(group, Rect::new(20.0, 20.0, 30.0, 30.0));
    assert_eq!(child, Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(child + group.origin().to_vec2(), Rect::new(20.0, 20.0, 30.0, 30.0));
    assert_eq!(d.node(c).unwrap().origin(), Vec2::new(-20.0, -20.0));
    assert_eq!(
        d.content_area(c).unwrap(),
        RelativeRectangle::new(20.0, 30.0, 20.0, 30.0)
    );
}

#[test]
fn auto_fit_is_idempotent() {
    let mut d = Drawing::new();
    let root = d.add_composite("root");
    let c = d.add_composite("c");
    d.set_fit_to_children(root, true).unwrap();
    d.set_fit_to_children(c, true).unwrap();
    let a = d.add_path("a", square(20.0, 20.0, 10.0)).unwrap();
    let b = d.add_path("b", square(-5.0, 40.0, 5.0)).unwrap();
    d.append_child(c, a).unwrap();
    d.append_child(c, b).unwrap();
    d.append_child(root, c).unwrap();

    let snapshot = |d: &Drawing| {
        [root, c, a, b].map(|id| {
            let n = d.node(id).unwrap();
            (n.bounds(), n.origin())
        })
    };
    let before = snapshot(&d);
    let content_before = d.content_area(c).unwrap();

    d.update_bounds_to_fit_children(c).unwrap();
    d.update_bounds_to_fit_children(c).unwrap();
    d.update_bounds_to_fit_children(root).unwrap();

    assert_eq!(snapshot(&d), before);
    assert_eq!(d.content_area(c).unwrap(), content_before);
}

#[test]
fn held_guard_makes_update_a_no_op() {
    let mut d = Drawing::new();
    let c = d.add_composite("c");
    let p = d.add_path("p", square(0.0, 0.0, 10.0)).unwrap();
    d.append_child(c, p).unwrap();
    let flag = d.composite_ref(c).unwrap().updating_bounds.clone();

    flag.set(true);
    d.set_path(p, square(0.0, 0.0, 40.0)).unwrap();
    d.update_bounds_to_fit_children(c).unwrap();
    assert_eq!(d.node(c).unwrap().bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(flag.get());

    flag.set(false);
    d.update_bounds_to_fit_children(c).unwrap();
    assert_eq!(d.node(c).unwrap().bounds(), Rect::new(0.0, 0.0, 40.0, 40.0));
    assert!(!flag.get());
}

#[test]
fn composite_operations_reject_paths() {
    let mut d = Drawing::new();
    let p = d.add_path("p", square(0.0, 0.0, 1.0)).unwrap();
    assert!(d.content_area(p).is_err());
    assert!(d.refresh_transform(p).is_err());
    assert!(d.update_bounds_to_fit_children(p).is_err());
    assert!(d.set_fit_to_children(p, true).is_err());
}
