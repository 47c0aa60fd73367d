//! Tests for the builtin module.
//!
//! This module is organized by built-in family:
//! - `comparison_tests` - equal, notEqual, lessThan, ...
//! - `math_tests` - add/subtract/multiply/divide, unary functions, pow
//! - `string_tests` - contains, startsWith, matches, langMatches

mod comparison_tests;
mod math_tests;

use super::*;
use crate::binding::Variable;
use owlkb_vocab::xsd;

/// Canonical `xsd:double` literal
pub(crate) fn double(lexical: &str) -> String {
    Literal::typed(lexical, xsd::DOUBLE).to_canonical()
}

/// Single-column table over canonical values
pub(crate) fn column(var: &str, values: &[&str]) -> BindingTable {
    let mut table = BindingTable::new(vec![Variable::new(var)]);
    for value in values {
        table.push_row(vec![Some(Arc::from(*value))]);
    }
    table
}

/// Two-column table over canonical values
pub(crate) fn pairs(left: &str, right: &str, rows: &[(String, String)]) -> BindingTable {
    let mut table = BindingTable::new(vec![Variable::new(left), Variable::new(right)]);
    for (l, r) in rows {
        table.push_row(vec![Some(Arc::from(l.as_str())), Some(Arc::from(r.as_str()))]);
    }
    table
}

/// Values of `var` in row order
pub(crate) fn values(table: &BindingTable, var: &str) -> Vec<String> {
    let var = Variable::new(var);
    (0..table.len())
        .filter_map(|i| table.value(i, &var).map(String::from))
        .collect()
}

#[test]
fn test_catalog_round_trips_iris() {
    for (kind, iri) in CATALOG {
        assert_eq!(BuiltInKind::from_iri(iri), Some(kind));
        assert_eq!(kind.iri(), iri);
    }
    assert_eq!(BuiltInKind::from_iri("http://example.org/nope"), None);
}

#[test]
fn test_extension_flag() {
    assert!(BuiltIn::lang_matches(Argument::variable("X"), "en").is_extension());
    assert!(!BuiltIn::contains(Argument::variable("X"), "a", CaseSensitivity::Sensitive)
        .is_extension());
    assert_eq!(BuiltInKind::LangMatches.family(), BuiltInFamily::Extension);
}

#[test]
fn test_missing_column_passes_table_through() {
    let table = column("?C", &["ex:indiv", "ex:other"]);
    let builtin = BuiltIn::comparison(
        BuiltInKind::Equal,
        Argument::variable("Z"),
        Argument::resource("ex:indiv"),
    )
    .unwrap();
    let out = builtin.filter(table.clone()).unwrap();
    assert_eq!(out, table);
}

#[test]
fn test_unknown_iri_fails_at_filter_time() {
    let builtin = BuiltIn::from_iri(
        "http://example.org/custom#frobnicate",
        vec![Argument::variable("X"), Argument::variable("Y")],
    )
    .unwrap();
    assert_eq!(builtin.kind(), None);
    let err = builtin.filter(column("?X", &["a"])).unwrap_err();
    assert!(matches!(err, ReasonerError::UnknownBuiltIn(iri) if iri.ends_with("frobnicate")));
}

#[test]
fn test_from_iri_validates_arguments() {
    assert!(matches!(
        BuiltIn::from_iri(swrlb::EQUAL, vec![]),
        Err(ReasonerError::MissingLeftArgument)
    ));
    assert!(matches!(
        BuiltIn::from_iri(swrlb::EQUAL, vec![Argument::variable("X")]),
        Err(ReasonerError::MissingRightArgument(_))
    ));
    assert!(matches!(
        BuiltIn::from_iri(
            swrlb::ADD,
            vec![Argument::variable("X"), Argument::variable("Y")]
        ),
        Err(ReasonerError::InvalidArgument(_))
    ));
    assert!(matches!(
        BuiltIn::from_iri(
            swrlb::CONTAINS,
            vec![Argument::variable("X"), Argument::variable("Y")]
        ),
        Err(ReasonerError::InvalidArgument(_))
    ));

    let add = BuiltIn::from_iri(
        swrlb::ADD,
        vec![
            Argument::variable("L"),
            Argument::variable("R"),
            Argument::literal(Literal::double(2.0)),
        ],
    )
    .unwrap();
    assert_eq!(add.kind(), Some(BuiltInKind::Add));
    assert_eq!(add.constant(), Some(2.0));
}

#[test]
fn test_canonical_text_forms() {
    let add = BuiltIn::math(
        BuiltInKind::Add,
        Argument::variable("L"),
        Argument::variable("R"),
        2.0,
    )
    .unwrap();
    assert_eq!(add.to_string(), "swrlb:add(?L,?R,\"2\"^^xsd:double)");

    let contains = BuiltIn::contains(Argument::variable("C"), "div2", CaseSensitivity::Sensitive);
    assert_eq!(contains.to_string(), "swrlb:contains(?C,\"div2\")");

    let matches = BuiltIn::matches(Argument::variable("C"), "^ex", "i").unwrap();
    assert_eq!(matches.to_string(), "swrlb:matches(?C,\"^ex\",\"i\")");

    let lt = BuiltIn::comparison(
        BuiltInKind::LessThan,
        Argument::variable("C"),
        Argument::resource("http://www.w3.org/2002/07/owl#Thing"),
    )
    .unwrap();
    assert_eq!(lt.to_string(), "swrlb:lessThan(?C,owl:Thing)");
}
