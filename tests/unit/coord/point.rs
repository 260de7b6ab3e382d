use super::*;
use crate::expression::context::EmptyContext;
use std::collections::BTreeMap;

#[test]
fn parses_and_prints_pairs() {
    let p = RelativePoint::parse("10,  left + 5").unwrap();
    assert_eq!(p.to_string(), "10, left + 5");
    assert!(p.is_dynamic());
    assert!(!RelativePoint::from((1.0, 2.0)).is_dynamic());
}

#[test]
fn commas_inside_calls_do_not_split() {
    let p = RelativePoint::parse("min(a, b), max(c, 2)").unwrap();
    assert_eq!(p.x.to_string(), "min(a, b)");
    assert_eq!(p.y.to_string(), "max(c, 2)");
}

#[test]
fn wrong_arity_is_rejected() {
    assert!(RelativePoint::parse("1").is_err());
    assert!(RelativePoint::parse("1, 2, 3").is_err());
    assert!(RelativePoint::parse("1, )").is_err());
}

#[test]
fn resolves_through_context() {
    let mut ctx = BTreeMap::new();
    ctx.insert("left".to_owned(), 20.0);
    let p = RelativePoint::parse("left * 2, 3").unwrap();
    assert_eq!(p.resolve(&ctx).unwrap(), Point::new(40.0, 3.0));
    assert!(p.resolve(&EmptyContext).is_err());
}
