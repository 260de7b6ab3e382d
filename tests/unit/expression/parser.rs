use super::*;

fn canon(src: &str) -> String {
    parse_expr(src).unwrap().to_string()
}

#[test]
fn parses_arithmetic_precedence() {
    let e = parse_expr("1+2*x").unwrap();
    match e {
        Expr::Binary {
            op: BinaryOp::Add,
            right,
            ..
        } => assert!(matches!(
            *right,
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        )),
        other => panic!("unexpected ast: {other:?}"),
    }
}

#[test]
fn parses_member_access() {
    assert_eq!(
        parse_expr("parent.left").unwrap(),
        Expr::Symbol {
            name: "parent".to_owned(),
            member: Some("left".to_owned()),
        }
    );
}

#[test]
fn rejects_nested_member_access() {
    let err = parse_expr("a.b.c").unwrap_err();
    assert_eq!(err.offset, 3);
}

#[test]
fn parses_calls_and_checks_arity() {
    match parse_expr("min(1, width)").unwrap() {
        Expr::Call { func, args } => {
            assert_eq!(func, Builtin::Min);
            assert_eq!(args.len(), 2);
        }
        other => panic!("unexpected ast: {other:?}"),
    }
    assert!(parse_expr("abs(1, 2)").is_err());
    assert!(parse_expr("lerp(1)").is_err());
}

#[test]
fn negative_literals_fold() {
    assert_eq!(parse_expr("-5").unwrap(), Expr::Num(-5.0));
    assert_eq!(parse_expr(" - 2.5 ").unwrap(), Expr::Num(-2.5));
}

#[test]
fn canonical_form_normalizes_spacing_and_parens() {
    assert_eq!(canon("width/2"), "width / 2");
    assert_eq!(canon("((a+b))*2"), "(a + b) * 2");
    assert_eq!(canon("a-(b-c)"), "a - (b - c)");
    assert_eq!(canon("(a-b)-c"), "a - b - c");
    assert_eq!(canon("-(a+1)"), "-(a + 1)");
    assert_eq!(canon("a - -5"), "a - -5");
    assert_eq!(canon("max(left,right)/ 2"), "max(left, right) / 2");
    assert_eq!(canon("100.0"), "100");
    assert_eq!(canon(".5"), "0.5");
}

#[test]
fn canonical_form_reparses_to_same_tree() {
    for src in [
        "a + b * c",
        "(a + b) * c",
        "-a * b",
        "-(a * b)",
        "a / (b / c)",
        "sin(x) * -3",
        "parent.right - 10",
        "1e3 + .25",
    ] {
        let e = parse_expr(src).unwrap();
        assert_eq!(parse_expr(&e.to_string()).unwrap(), e, "{src}");
    }
}

#[test]
fn reports_offsets() {
    assert_eq!(parse_expr("").unwrap_err().offset, 0);
    assert_eq!(parse_expr("1 +").unwrap_err().offset, 3);
    assert_eq!(parse_expr("a # b").unwrap_err().offset, 2);
    assert_eq!(parse_expr("1e").unwrap_err().offset, 1);
    assert_eq!(parse_expr("(a").unwrap_err().offset, 2);
}
