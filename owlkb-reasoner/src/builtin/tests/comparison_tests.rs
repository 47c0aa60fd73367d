//! Tests for the comparison built-ins.

use super::*;
use std::cmp::Ordering;

#[test]
fn test_less_than_orders_resources_lexically() {
    let table = column("?C", &["ex:indiv1", "ex:indiv2"]);
    let builtin = BuiltIn::comparison(
        BuiltInKind::LessThan,
        Argument::variable("C"),
        Argument::resource("ex:indiv2"),
    )
    .unwrap();
    let out = builtin.filter(table).unwrap();
    assert_eq!(values(&out, "?C"), vec!["ex:indiv1"]);
}

#[test]
fn test_numeric_literals_compare_by_value() {
    // Lexically "10" < "9"; numerically it is the other way round
    let nine = double("9");
    let ten = double("10");
    let table = pairs("?A", "?B", &[(ten.clone(), nine.clone()), (nine, ten)]);
    let builtin = BuiltIn::comparison(
        BuiltInKind::GreaterThan,
        Argument::variable("A"),
        Argument::variable("B"),
    )
    .unwrap();
    let out = builtin.filter(table).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(values(&out, "?A"), vec![double("10")]);
}

#[test]
fn test_numeric_equality_across_datatypes() {
    let int = Literal::typed("2", xsd::INTEGER).to_canonical();
    let table = pairs("?A", "?B", &[(int, double("2.0"))]);
    let builtin = BuiltIn::comparison(
        BuiltInKind::Equal,
        Argument::variable("A"),
        Argument::variable("B"),
    )
    .unwrap();
    assert_eq!(builtin.filter(table).unwrap().len(), 1);
}

#[test]
fn test_incomparable_rows_are_dropped() {
    // resource vs numeric literal: neither equal nor not-equal
    let table = pairs("?A", "?B", &[("ex:a".to_string(), double("1"))]);
    for kind in [BuiltInKind::Equal, BuiltInKind::NotEqual] {
        let builtin =
            BuiltIn::comparison(kind, Argument::variable("A"), Argument::variable("B")).unwrap();
        assert!(builtin.filter(table.clone()).unwrap().is_empty());
    }
}

#[test]
fn test_unbound_and_malformed_rows_are_dropped() {
    let mut table = column("?A", &["ex:a", "\"unterminated"]);
    table.push_row(vec![None]);
    let builtin = BuiltIn::comparison(
        BuiltInKind::LessThanOrEqual,
        Argument::variable("A"),
        Argument::resource("ex:z"),
    )
    .unwrap();
    assert_eq!(values(&builtin.filter(table).unwrap(), "?A"), vec!["ex:a"]);
}

#[test]
fn test_compare_terms_strings() {
    let a = Term::Literal(Literal::string("apple"));
    let b = Term::Literal(Literal::plain("banana"));
    assert_eq!(compare_terms(&a, &b), Some(Ordering::Less));

    let en = Term::Literal(Literal::lang("chat", "en"));
    let fr = Term::Literal(Literal::lang("chat", "fr"));
    assert_eq!(compare_terms(&en, &fr), Some(Ordering::Less));

    let iri = Term::resource("ex:b");
    assert_eq!(compare_terms(&iri, &a), Some(Ordering::Greater));

    let nan = Term::Literal(Literal::typed("NaN", xsd::DOUBLE));
    assert_eq!(compare_terms(&nan, &nan), None);
}

#[test]
fn test_non_comparison_kind_rejected() {
    assert!(matches!(
        BuiltIn::comparison(
            BuiltInKind::Add,
            Argument::variable("A"),
            Argument::variable("B")
        ),
        Err(ReasonerError::InvalidArgument(_))
    ));
}
