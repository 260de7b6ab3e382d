use super::*;

#[test]
fn union_starts_from_first_rect() {
    let r = Rect::new(10.0, 10.0, 20.0, 30.0);
    assert_eq!(union_rect(None, r), Some(r));
}

#[test]
fn union_grows_to_cover_both() {
    let a = Rect::new(10.0, 10.0, 20.0, 20.0);
    let b = Rect::new(-5.0, 15.0, 12.0, 40.0);
    assert_eq!(
        union_rect(Some(a), b),
        Some(Rect::new(-5.0, 10.0, 20.0, 40.0))
    );
}

#[test]
fn identity_detection() {
    assert!(is_identity(Affine::IDENTITY));
    assert!(!is_identity(Affine::translate((1.0, 0.0))));
}
