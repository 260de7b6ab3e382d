use super::*;
use crate::coord::point::RelativePoint;
use crate::coord::value::RelativeValue;
use crate::drawable::node::Axis;
use crate::path::RelativePath;

fn sample(d: &mut Drawing) -> NodeId {
    let g = d.add_composite("group");
    d.set_marker(g, Axis::X, "mid", RelativeValue::parse("right / 2").unwrap())
        .unwrap();
    d.set_marker(g, Axis::Y, "baseline", 80.0).unwrap();
    d.set_bounding_box(
        g,
        RelativeParallelogram::new((10.0, 10.0), (110.0, 20.0), (0.0, 60.0)),
    )
    .unwrap();

    let mut diag = RelativePath::new();
    diag.start_sub_path(RelativePoint::parse("left, top").unwrap())
        .line_to(RelativePoint::parse("mid, baseline").unwrap());
    let a = d.add_path("a", diag).unwrap();
    let mut tri = RelativePath::new();
    tri.start_sub_path((0.0, 0.0))
        .line_to((5.0, 0.0))
        .line_to((0.0, 5.0))
        .close_sub_path();
    let b = d.add_path("b", tri).unwrap();
    d.append_child(g, a).unwrap();
    d.append_child(g, b).unwrap();
    g
}

#[test]
fn round_trip_preserves_layout_markers_and_children() {
    let mut d = Drawing::new();
    let g = sample(&mut d);
    let saved = d.save_state(g).unwrap();

    let json = saved.to_json().unwrap();
    let reloaded_state = DrawableState::from_json(&json).unwrap();
    assert_eq!(reloaded_state, saved);

    let copy = d.load_state(&reloaded_state).unwrap();
    assert_ne!(copy, g);
    assert_eq!(d.save_state(copy).unwrap(), saved);

    let original = d.node(g).unwrap().as_composite().unwrap();
    let loaded = d.node(copy).unwrap().as_composite().unwrap();
    assert_eq!(loaded.bounding_box(), original.bounding_box());
    assert_eq!(loaded.markers(Axis::X), original.markers(Axis::X));
    assert_eq!(loaded.markers(Axis::Y), original.markers(Axis::Y));
    assert_eq!(loaded.markers(Axis::X).len(), 3);
    assert_eq!(loaded.markers(Axis::Y).len(), 3);
    assert_eq!(loaded.transform(), original.transform());

    let ids: Vec<_> = d
        .children(copy)
        .iter()
        .map(|&c| d.node(c).unwrap().id().to_owned())
        .collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(
        d.resolve_path(d.children(copy)[0]).unwrap(),
        d.resolve_path(d.children(g)[0]).unwrap()
    );
}

#[test]
fn saved_group_uses_persisted_field_names() {
    let mut d = Drawing::new();
    let g = sample(&mut d);
    let json: serde_json::Value =
        serde_json::from_str(&d.save_state(g).unwrap().to_json().unwrap()).unwrap();

    assert_eq!(json["type"], "Group");
    assert_eq!(json["id"], "group");
    assert_eq!(json["topRight"], "110, 20");
    assert_eq!(json["MarkersX"][2]["name"], "mid");
    assert_eq!(json["MarkersX"][2]["position"], "right / 2");
    assert_eq!(json["Drawables"][0]["type"], "Path");
    assert_eq!(json["Drawables"][1]["segments"][3]["type"], "Close");
}

#[test]
fn malformed_corners_load_with_defaults() {
    let mut d = Drawing::new();
    let state = DrawableState::from_json(
        r#"{ "type": "Group", "id": "g", "topLeft": "oops(", "bottomLeft": "" }"#,
    )
    .unwrap();
    let g = d.load_state(&state).unwrap();
    let comp = d.node(g).unwrap().as_composite().unwrap();
    assert_eq!(
        comp.bounding_box(),
        &RelativeParallelogram::new((0.0, 0.0), (100.0, 0.0), (0.0, 100.0))
    );
    // Empty marker lists keep the default content area.
    assert_eq!(comp.markers(Axis::X).len(), 2);
    assert!(d.content_area(g).is_ok());
}

#[test]
fn loaded_fit_flag_does_not_rewrite_content_area() {
    let mut d = Drawing::new();
    let state = DrawableState::from_json(
        r#"{
            "type": "Group",
            "fitToChildren": true,
            "MarkersX": [ { "name": "left", "position": "-50" }, { "name": "right", "position": "50" } ],
            "MarkersY": [ { "name": "top", "position": "0" }, { "name": "bottom", "position": "10" } ],
            "Drawables": [
                { "type": "Path", "segments": [
                    { "type": "Move", "point1": "0, 0" },
                    { "type": "Line", "point1": "1, 1" }
                ] }
            ]
        }"#,
    )
    .unwrap();
    let g = d.load_state(&state).unwrap();
    assert!(d.node(g).unwrap().as_composite().unwrap().fits_to_children());
    assert_eq!(
        d.content_area(g).unwrap(),
        crate::coord::rect::RelativeRectangle::new(-50.0, 50.0, 0.0, 10.0)
    );
    assert_eq!(d.save_state(g).unwrap(), state);
}

#[test]
fn non_finite_marker_stays_constant_through_save_and_load() {
    let mut d = Drawing::new();
    let g = d.add_composite("g");
    d.set_marker(g, Axis::X, "edge", RelativeValue::parse("1/0").unwrap())
        .unwrap();
    d.set_marker(g, Axis::Y, "hole", RelativeValue::parse("0/0").unwrap())
        .unwrap();

    let copy = d.load_state(&d.save_state(g).unwrap()).unwrap();
    for (axis, name) in [(Axis::X, "edge"), (Axis::Y, "hole")] {
        let before = d.node(g).unwrap().as_composite().unwrap().markers(axis);
        let after = d.node(copy).unwrap().as_composite().unwrap().markers(axis);
        let (a, b) = (
            &before.marker(name).unwrap().position,
            &after.marker(name).unwrap().position,
        );
        assert!(!a.is_dynamic());
        assert_eq!(a.is_dynamic(), b.is_dynamic());
        assert_eq!(a, b);
        assert!(b.resolve(&crate::expression::context::EmptyContext).is_ok());
    }
}
