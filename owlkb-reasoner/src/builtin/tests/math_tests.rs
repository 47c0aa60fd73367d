//! Tests for the math built-ins.

use super::*;

#[test]
fn test_abs_keeps_matching_rows() {
    let table = pairs(
        "?X",
        "?Y",
        &[
            (double("2.24"), double("-2.24")),
            (double("16"), double("14")),
        ],
    );
    let builtin =
        BuiltIn::unary_math(BuiltInKind::Abs, Argument::variable("X"), Argument::variable("Y"))
            .unwrap();
    let out = builtin.filter(table).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(values(&out, "?X"), vec![double("2.24")]);
}

#[test]
fn test_add_checks_left_against_right_plus_constant() {
    let table = pairs(
        "?L",
        "?R",
        &[(double("5"), double("3")), (double("6"), double("3"))],
    );
    let builtin = BuiltIn::math(
        BuiltInKind::Add,
        Argument::variable("L"),
        Argument::variable("R"),
        2.0,
    )
    .unwrap();
    assert_eq!(values(&builtin.filter(table).unwrap(), "?L"), vec![double("5")]);
}

#[test]
fn test_divide_by_zero_rejected_at_construction() {
    let err = BuiltIn::math(
        BuiltInKind::Divide,
        Argument::variable("L"),
        Argument::variable("R"),
        0.0,
    )
    .unwrap_err();
    assert!(matches!(err, ReasonerError::DivideByZero(_)));

    let err = BuiltIn::from_iri(
        swrlb::DIVIDE,
        vec![
            Argument::variable("L"),
            Argument::variable("R"),
            Argument::literal(Literal::integer(0)),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, ReasonerError::DivideByZero(_)));
}

#[test]
fn test_non_numeric_rows_are_dropped() {
    let table = pairs(
        "?X",
        "?Y",
        &[
            (double("3"), Literal::string("three").to_canonical()),
            (double("3"), "ex:three".to_string()),
            (double("3"), double("3.4")),
        ],
    );
    let builtin =
        BuiltIn::unary_math(BuiltInKind::Floor, Argument::variable("X"), Argument::variable("Y"))
            .unwrap();
    assert_eq!(builtin.filter(table).unwrap().len(), 1);
}

#[test]
fn test_pow_uses_constant_exponent() {
    let table = pairs(
        "?X",
        "?Y",
        &[(double("9"), double("3")), (double("6"), double("3"))],
    );
    let builtin = BuiltIn::pow(Argument::variable("X"), Argument::variable("Y"), 2.0);
    assert_eq!(values(&builtin.filter(table).unwrap(), "?X"), vec![double("9")]);
    assert_eq!(
        BuiltIn::pow(Argument::variable("X"), Argument::variable("Y"), 2.0).to_string(),
        "swrlb:pow(?X,?Y,\"2\"^^xsd:double)"
    );
}

#[test]
fn test_constant_right_argument() {
    let table = column("?X", &[double("4").as_str(), double("5").as_str()]);
    let builtin = BuiltIn::unary_math(
        BuiltInKind::Ceiling,
        Argument::variable("X"),
        Literal::double(3.2),
    )
    .unwrap();
    assert_eq!(values(&builtin.filter(table).unwrap(), "?X"), vec![double("4")]);
}

#[test]
fn test_kind_family_validation() {
    assert!(BuiltIn::math(
        BuiltInKind::Abs,
        Argument::variable("X"),
        Argument::variable("Y"),
        1.0
    )
    .is_err());
    assert!(BuiltIn::unary_math(
        BuiltInKind::Add,
        Argument::variable("X"),
        Argument::variable("Y")
    )
    .is_err());
}

#[test]
fn test_abs_argument_order_is_left_equals_f_of_right() {
    let rows = [
        (double("2.24"), double("-2.24")),
        (double("16"), double("14")),
    ];
    let abs = |left: &str, right: &str| {
        BuiltIn::unary_math(
            BuiltInKind::Abs,
            Argument::variable(left),
            Argument::variable(right),
        )
        .unwrap()
    };

    // abs(?X,?Y) keeps X == |Y|
    let kept = abs("X", "Y").filter(pairs("?X", "?Y", &rows)).unwrap();
    assert_eq!(values(&kept, "?X"), vec![double("2.24")]);

    // abs(?Y,?X) keeps Y == |X|, which neither row satisfies
    let swapped = abs("Y", "X").filter(pairs("?X", "?Y", &rows)).unwrap();
    assert!(swapped.is_empty());
}

/// Keep rows where `?L == kind(?R, constant)`
fn binary(kind: BuiltInKind, constant: f64, rows: &[(&str, &str)]) -> Vec<String> {
    let rows: Vec<(String, String)> = rows.iter().map(|(l, r)| (double(l), double(r))).collect();
    let builtin = BuiltIn::math(kind, Argument::variable("L"), Argument::variable("R"), constant)
        .unwrap();
    values(&builtin.filter(pairs("?L", "?R", &rows)).unwrap(), "?L")
}

/// Keep rows where `?L == kind(?R)`
fn unary(kind: BuiltInKind, rows: &[(String, String)]) -> Vec<String> {
    let builtin =
        BuiltIn::unary_math(kind, Argument::variable("L"), Argument::variable("R")).unwrap();
    values(&builtin.filter(pairs("?L", "?R", rows)).unwrap(), "?L")
}

#[test]
fn test_subtract_multiply_divide() {
    assert_eq!(
        binary(BuiltInKind::Subtract, 2.0, &[("5", "7"), ("5", "8")]),
        vec![double("5")]
    );
    assert_eq!(
        binary(BuiltInKind::Multiply, 2.0, &[("6", "3"), ("7", "3")]),
        vec![double("6")]
    );
    assert_eq!(
        binary(BuiltInKind::Divide, 2.0, &[("2.5", "5"), ("3", "5")]),
        vec![double("2.5")]
    );
}

#[test]
fn test_round_sends_halves_up() {
    let rows = vec![
        (double("3"), double("2.5")),
        (double("-2"), double("-2.5")),
        (double("-3"), double("-2.5")),
        (double("-3"), double("-2.6")),
    ];
    assert_eq!(
        unary(BuiltInKind::Round, &rows),
        vec![double("3"), double("-2"), double("-3")]
    );
}

#[test]
fn test_round_half_to_even() {
    let rows = vec![
        (double("2"), double("2.5")),
        (double("3"), double("2.5")),
        (double("4"), double("3.5")),
    ];
    assert_eq!(
        unary(BuiltInKind::RoundHalfToEven, &rows),
        vec![double("2"), double("4")]
    );
}

#[test]
fn test_trig_uses_exact_equality() {
    let rows = vec![(double("0"), double("0")), (double("1"), double("0"))];
    assert_eq!(unary(BuiltInKind::Sin, &rows), vec![double("0")]);
    assert_eq!(unary(BuiltInKind::Cos, &rows), vec![double("1")]);

    let tan_one = format!("{}", 1.0_f64.tan());
    let rows = vec![
        (double(&tan_one), double("1")),
        (double("1.5574"), double("1")),
    ];
    assert_eq!(unary(BuiltInKind::Tan, &rows), vec![double(&tan_one)]);

    // sin(pi) is a tiny non-zero double, so 0 is not equal to it
    let pi = format!("{}", std::f64::consts::PI);
    let rows = vec![(double("0"), double(&pi))];
    assert!(unary(BuiltInKind::Sin, &rows).is_empty());
}
