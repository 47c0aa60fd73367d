//! Term comparison for the comparison built-ins

use owlkb_core::Term;
use std::cmp::Ordering;

use super::BuiltInKind;

/// Order two terms, or `None` when they are not comparable.
///
/// - resources compare by IRI text
/// - numeric literals compare by value (NaN is incomparable)
/// - string-like literals compare by lexical form, then language tag
/// - a resource and a string-like literal compare by lexical form
/// - other literals compare lexically only when their datatypes agree
pub fn compare_terms(a: &Term, b: &Term) -> Option<Ordering> {
    match (a, b) {
        (Term::Resource(x), Term::Resource(y)) => Some(x.as_str().cmp(y.as_str())),
        (Term::Literal(x), Term::Literal(y)) => {
            if x.is_numeric() && y.is_numeric() {
                return x.as_f64()?.partial_cmp(&y.as_f64()?);
            }
            if x.is_string_like() && y.is_string_like() {
                return Some(
                    x.lexical()
                        .cmp(y.lexical())
                        .then_with(|| x.language().cmp(&y.language())),
                );
            }
            (x.datatype() == y.datatype()).then(|| x.lexical().cmp(y.lexical()))
        }
        (Term::Resource(iri), Term::Literal(lit)) if lit.is_string_like() => {
            Some(iri.as_str().cmp(lit.lexical()))
        }
        (Term::Literal(lit), Term::Resource(iri)) if lit.is_string_like() => {
            Some(lit.lexical().cmp(iri.as_str()))
        }
        _ => None,
    }
}

/// True if `left (kind) right` holds; incomparable terms never hold
pub(super) fn holds(kind: BuiltInKind, left: &Term, right: &Term) -> bool {
    let Some(ord) = compare_terms(left, right) else {
        return false;
    };
    match kind {
        BuiltInKind::Equal => ord == Ordering::Equal,
        BuiltInKind::NotEqual => ord != Ordering::Equal,
        BuiltInKind::LessThan => ord == Ordering::Less,
        BuiltInKind::LessThanOrEqual => ord != Ordering::Greater,
        BuiltInKind::GreaterThan => ord == Ordering::Greater,
        BuiltInKind::GreaterThanOrEqual => ord != Ordering::Less,
        _ => false,
    }
}
