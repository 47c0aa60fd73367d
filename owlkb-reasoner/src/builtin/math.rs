//! Math built-ins
//!
//! Both operands must be numeric-typed literals; they are compared as IEEE
//! doubles with exact equality.

use owlkb_core::Term;

use super::BuiltInKind;

/// Apply the kind's function to `value`.
///
/// Binary kinds (and `pow`) need the constant; without it the result is `None`.
pub(super) fn evaluate(kind: BuiltInKind, value: f64, constant: Option<f64>) -> Option<f64> {
    let result = match kind {
        BuiltInKind::Add => value + constant?,
        BuiltInKind::Subtract => value - constant?,
        BuiltInKind::Multiply => value * constant?,
        BuiltInKind::Divide => value / constant?,
        BuiltInKind::Pow => value.powf(constant?),
        BuiltInKind::Abs => value.abs(),
        BuiltInKind::Floor => value.floor(),
        BuiltInKind::Ceiling => value.ceil(),
        BuiltInKind::Round => round_half_up(value),
        BuiltInKind::RoundHalfToEven => value.round_ties_even(),
        BuiltInKind::Sin => value.sin(),
        BuiltInKind::Cos => value.cos(),
        BuiltInKind::Tan => value.tan(),
        _ => return None,
    };
    Some(result)
}

/// `fn:round`: halves round toward positive infinity
fn round_half_up(value: f64) -> f64 {
    if (value - value.trunc()).abs() == 0.5 {
        value.ceil()
    } else {
        value.round()
    }
}

/// True if `left == f(right[, constant])`
pub(super) fn holds(kind: BuiltInKind, left: &Term, right: &Term, constant: Option<f64>) -> bool {
    let (Some(left), Some(right)) = (numeric(left), numeric(right)) else {
        return false;
    };
    evaluate(kind, right, constant).is_some_and(|expected| left == expected)
}

fn numeric(term: &Term) -> Option<f64> {
    term.as_literal()?.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_variants() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(evaluate(BuiltInKind::RoundHalfToEven, 2.5, None), Some(2.0));
        assert_eq!(evaluate(BuiltInKind::RoundHalfToEven, 3.5, None), Some(4.0));
    }

    #[test]
    fn test_binary_requires_constant() {
        assert_eq!(evaluate(BuiltInKind::Add, 1.0, None), None);
        assert_eq!(evaluate(BuiltInKind::Add, 1.0, Some(2.0)), Some(3.0));
        assert_eq!(evaluate(BuiltInKind::Equal, 1.0, Some(2.0)), None);
    }
}
