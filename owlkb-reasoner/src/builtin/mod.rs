//! Built-in atoms
//!
//! Built-ins never originate bindings; they filter an existing binding table
//! row by row. Each built-in is a closed [`BuiltInKind`] tag plus its
//! arguments and a pre-validated operand (numeric constant, needle text, or
//! compiled regex). Dispatch is a match on the tag.
//!
//! Filtering rules shared by every kind:
//! - a variable argument that is not a column of the table makes the
//!   built-in inapplicable: the table is returned unchanged
//! - a row whose value is unbound or does not have the shape the kind needs
//!   (e.g. a non-numeric literal for a math built-in) is dropped
//! - an unrecognized predicate IRI is a hard error at filter time

mod compare;
mod math;
mod string;

#[cfg(test)]
mod tests;

use owlkb_core::{Iri, Literal, PrefixMap, Term};
use owlkb_vocab::{swrlb, swrlx};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::atom::{Argument, STANDARD_PREFIXES};
use crate::binding::BindingTable;
use crate::error::{ReasonerError, Result};

pub use compare::compare_terms;

/// Built-in families
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltInFamily {
    Comparison,
    Math,
    String,
    /// Engine-specific additions outside the standard `swrlb:` namespace
    Extension,
}

/// Every supported built-in predicate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltInKind {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Abs,
    Floor,
    Ceiling,
    Round,
    RoundHalfToEven,
    Sin,
    Cos,
    Tan,
    Pow,
    Contains,
    ContainsIgnoreCase,
    StartsWith,
    EndsWith,
    Matches,
    LangMatches,
}

/// Predicate IRI of every kind
const CATALOG: [(BuiltInKind, &str); 25] = [
    (BuiltInKind::Equal, swrlb::EQUAL),
    (BuiltInKind::NotEqual, swrlb::NOT_EQUAL),
    (BuiltInKind::LessThan, swrlb::LESS_THAN),
    (BuiltInKind::LessThanOrEqual, swrlb::LESS_THAN_OR_EQUAL),
    (BuiltInKind::GreaterThan, swrlb::GREATER_THAN),
    (BuiltInKind::GreaterThanOrEqual, swrlb::GREATER_THAN_OR_EQUAL),
    (BuiltInKind::Add, swrlb::ADD),
    (BuiltInKind::Subtract, swrlb::SUBTRACT),
    (BuiltInKind::Multiply, swrlb::MULTIPLY),
    (BuiltInKind::Divide, swrlb::DIVIDE),
    (BuiltInKind::Abs, swrlb::ABS),
    (BuiltInKind::Floor, swrlb::FLOOR),
    (BuiltInKind::Ceiling, swrlb::CEILING),
    (BuiltInKind::Round, swrlb::ROUND),
    (BuiltInKind::RoundHalfToEven, swrlb::ROUND_HALF_TO_EVEN),
    (BuiltInKind::Sin, swrlb::SIN),
    (BuiltInKind::Cos, swrlb::COS),
    (BuiltInKind::Tan, swrlb::TAN),
    (BuiltInKind::Pow, swrlb::POW),
    (BuiltInKind::Contains, swrlb::CONTAINS),
    (BuiltInKind::ContainsIgnoreCase, swrlb::CONTAINS_IGNORE_CASE),
    (BuiltInKind::StartsWith, swrlb::STARTS_WITH),
    (BuiltInKind::EndsWith, swrlb::ENDS_WITH),
    (BuiltInKind::Matches, swrlb::MATCHES),
    (BuiltInKind::LangMatches, swrlx::LANG_MATCHES),
];

impl BuiltInKind {
    /// Look up the kind for a predicate IRI
    pub fn from_iri(iri: &str) -> Option<Self> {
        CATALOG
            .iter()
            .find(|(_, candidate)| *candidate == iri)
            .map(|(kind, _)| *kind)
    }

    pub fn iri(self) -> &'static str {
        CATALOG
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, iri)| *iri)
            .unwrap_or(swrlb::NS)
    }

    pub fn family(self) -> BuiltInFamily {
        use BuiltInKind::*;
        match self {
            Equal | NotEqual | LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual => {
                BuiltInFamily::Comparison
            }
            Add | Subtract | Multiply | Divide | Abs | Floor | Ceiling | Round
            | RoundHalfToEven | Sin | Cos | Tan | Pow => BuiltInFamily::Math,
            Contains | ContainsIgnoreCase | StartsWith | EndsWith | Matches => {
                BuiltInFamily::String
            }
            LangMatches => BuiltInFamily::Extension,
        }
    }

    /// True for `left == right (op) constant` math built-ins
    pub fn takes_constant(self) -> bool {
        matches!(
            self,
            BuiltInKind::Add
                | BuiltInKind::Subtract
                | BuiltInKind::Multiply
                | BuiltInKind::Divide
                | BuiltInKind::Pow
        )
    }

    pub fn is_extension(self) -> bool {
        self.family() == BuiltInFamily::Extension
    }
}

impl fmt::Display for BuiltInKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&STANDARD_PREFIXES.abbreviate(self.iri()))
    }
}

/// Case handling for substring built-ins
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

/// Pre-validated constant part of a built-in
#[derive(Clone, Debug)]
pub(crate) enum Operand {
    None,
    Number(f64),
    Text(Arc<str>),
    Pattern { regex: Regex, flags: Arc<str> },
}

/// A built-in atom
#[derive(Clone, Debug)]
pub struct BuiltIn {
    predicate: Iri,
    /// `None` for predicate IRIs outside the catalog
    kind: Option<BuiltInKind>,
    left: Argument,
    right: Option<Argument>,
    operand: Operand,
}

impl BuiltIn {
    /// `equal`, `notEqual`, `lessThan`, ... over two arguments
    pub fn comparison(
        kind: BuiltInKind,
        left: impl Into<Argument>,
        right: impl Into<Argument>,
    ) -> Result<Self> {
        if kind.family() != BuiltInFamily::Comparison {
            return Err(ReasonerError::invalid_argument(format!(
                "{} is not a comparison built-in",
                kind
            )));
        }
        Ok(Self::with_kind(kind, left.into(), Some(right.into()), Operand::None))
    }

    /// `add`, `subtract`, `multiply`, `divide`: keep rows where
    /// `left == right (op) constant`
    pub fn math(
        kind: BuiltInKind,
        left: impl Into<Argument>,
        right: impl Into<Argument>,
        constant: f64,
    ) -> Result<Self> {
        if !kind.takes_constant() || kind == BuiltInKind::Pow {
            return Err(ReasonerError::invalid_argument(format!(
                "{} is not a binary math built-in",
                kind
            )));
        }
        if kind == BuiltInKind::Divide && constant == 0.0 {
            return Err(ReasonerError::DivideByZero(kind.to_string()));
        }
        Ok(Self::with_kind(
            kind,
            left.into(),
            Some(right.into()),
            Operand::Number(constant),
        ))
    }

    /// `abs`, `floor`, `ceiling`, `round`, `roundHalfToEven`, `sin`, `cos`,
    /// `tan`: keep rows where `left == f(right)`
    pub fn unary_math(
        kind: BuiltInKind,
        left: impl Into<Argument>,
        right: impl Into<Argument>,
    ) -> Result<Self> {
        if kind.family() != BuiltInFamily::Math || kind.takes_constant() {
            return Err(ReasonerError::invalid_argument(format!(
                "{} is not a unary math built-in",
                kind
            )));
        }
        Ok(Self::with_kind(kind, left.into(), Some(right.into()), Operand::None))
    }

    /// Keep rows where `left == right ^ exponent`
    pub fn pow(left: impl Into<Argument>, right: impl Into<Argument>, exponent: f64) -> Self {
        Self::with_kind(
            BuiltInKind::Pow,
            left.into(),
            Some(right.into()),
            Operand::Number(exponent),
        )
    }

    /// Keep rows whose left lexical form contains `needle`
    pub fn contains(left: impl Into<Argument>, needle: &str, case: CaseSensitivity) -> Self {
        let kind = match case {
            CaseSensitivity::Sensitive => BuiltInKind::Contains,
            CaseSensitivity::Insensitive => BuiltInKind::ContainsIgnoreCase,
        };
        Self::text(kind, left.into(), needle)
    }

    pub fn starts_with(left: impl Into<Argument>, prefix: &str) -> Self {
        Self::text(BuiltInKind::StartsWith, left.into(), prefix)
    }

    pub fn ends_with(left: impl Into<Argument>, suffix: &str) -> Self {
        Self::text(BuiltInKind::EndsWith, left.into(), suffix)
    }

    /// Keep rows whose left lexical form matches `pattern`.
    ///
    /// Supported flags: i (case-insensitive), m (multiline), s (dot-all),
    /// x (ignore whitespace). Unknown flags and malformed patterns fail here.
    pub fn matches(left: impl Into<Argument>, pattern: &str, flags: &str) -> Result<Self> {
        let regex = string::compile_pattern(pattern, flags)?;
        Ok(Self::with_kind(
            BuiltInKind::Matches,
            left.into(),
            Some(Argument::Literal(Literal::plain(pattern))),
            Operand::Pattern {
                regex,
                flags: Arc::from(flags),
            },
        ))
    }

    /// Keep rows whose left literal's language tag matches `range`
    pub fn lang_matches(left: impl Into<Argument>, range: &str) -> Self {
        Self::text(BuiltInKind::LangMatches, left.into(), range)
    }

    /// Build any built-in from its predicate IRI and positional arguments.
    ///
    /// Arguments: `[left, right]` for comparison and unary math,
    /// `[left, right, constant]` for binary math and `pow`,
    /// `[left, text]` for string built-ins, `[left, pattern, flags?]` for
    /// `matches`. An IRI outside the catalog is accepted here and rejected
    /// when the built-in is evaluated.
    pub fn from_iri(predicate: impl Into<Iri>, args: Vec<Argument>) -> Result<Self> {
        let predicate = predicate.into();
        if predicate.as_str().trim().is_empty() {
            return Err(ReasonerError::MissingPredicate);
        }
        let mut args = args.into_iter();
        let left = args.next().ok_or(ReasonerError::MissingLeftArgument)?;
        let right = args.next();
        let extra = args.next();

        let Some(kind) = BuiltInKind::from_iri(predicate.as_str()) else {
            return Ok(Self {
                predicate,
                kind: None,
                left,
                right,
                operand: Operand::None,
            });
        };

        let require_right =
            |right: Option<Argument>| right.ok_or_else(|| ReasonerError::MissingRightArgument(kind.to_string()));

        match kind.family() {
            BuiltInFamily::Comparison => Self::comparison(kind, left, require_right(right)?),
            BuiltInFamily::Math if kind == BuiltInKind::Pow => Ok(Self::pow(
                left,
                require_right(right)?,
                numeric_constant(kind, extra)?,
            )),
            BuiltInFamily::Math if kind.takes_constant() => Self::math(
                kind,
                left,
                require_right(right)?,
                numeric_constant(kind, extra)?,
            ),
            BuiltInFamily::Math => Self::unary_math(kind, left, require_right(right)?),
            BuiltInFamily::String | BuiltInFamily::Extension => {
                let text = constant_text(kind, require_right(right)?)?;
                match kind {
                    BuiltInKind::Matches => {
                        let flags = match extra {
                            Some(arg) => constant_text(kind, arg)?,
                            None => String::new(),
                        };
                        Self::matches(left, &text, &flags)
                    }
                    BuiltInKind::ContainsIgnoreCase => {
                        Ok(Self::contains(left, &text, CaseSensitivity::Insensitive))
                    }
                    _ => Ok(Self::text(kind, left, &text)),
                }
            }
        }
    }

    fn with_kind(
        kind: BuiltInKind,
        left: Argument,
        right: Option<Argument>,
        operand: Operand,
    ) -> Self {
        Self {
            predicate: Iri::new(kind.iri()),
            kind: Some(kind),
            left,
            right,
            operand,
        }
    }

    fn text(kind: BuiltInKind, left: Argument, text: &str) -> Self {
        Self::with_kind(
            kind,
            left,
            Some(Argument::Literal(Literal::plain(text))),
            Operand::Text(Arc::from(text)),
        )
    }

    pub fn predicate(&self) -> &Iri {
        &self.predicate
    }

    /// `None` when the predicate IRI is not a known built-in
    pub fn kind(&self) -> Option<BuiltInKind> {
        self.kind
    }

    pub fn left(&self) -> &Argument {
        &self.left
    }

    pub fn right(&self) -> Option<&Argument> {
        self.right.as_ref()
    }

    /// Numeric constant of binary math built-ins and `pow`
    pub fn constant(&self) -> Option<f64> {
        match self.operand {
            Operand::Number(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_extension(&self) -> bool {
        self.kind.is_some_and(BuiltInKind::is_extension)
    }

    /// Filter a binding table, keeping the rows for which the built-in holds
    pub fn filter(&self, mut table: BindingTable) -> Result<BindingTable> {
        let Some(kind) = self.kind else {
            return Err(ReasonerError::UnknownBuiltIn(self.predicate.to_string()));
        };

        let Some(left) = self.left.slot(&table) else {
            return Ok(table);
        };
        let right = match &self.right {
            Some(arg) => match arg.slot(&table) {
                Some(slot) => Some(slot),
                None => return Ok(table),
            },
            None => None,
        };

        table.retain(|row| {
            let Some(left) = left.value(row).and_then(|v| Term::parse(v).ok()) else {
                return false;
            };
            let right = match &right {
                Some(slot) => match slot.value(row).and_then(|v| Term::parse(v).ok()) {
                    Some(term) => Some(term),
                    None => return false,
                },
                None => None,
            };
            self.holds(kind, &left, right.as_ref())
        });
        Ok(table)
    }

    fn holds(&self, kind: BuiltInKind, left: &Term, right: Option<&Term>) -> bool {
        match kind.family() {
            BuiltInFamily::Comparison => right.is_some_and(|r| compare::holds(kind, left, r)),
            BuiltInFamily::Math => right.is_some_and(|r| math::holds(kind, left, r, self.constant())),
            BuiltInFamily::String | BuiltInFamily::Extension => {
                string::holds(kind, left, &self.operand)
            }
        }
    }

    /// Canonical text form, e.g. `swrlb:add(?L,?R,"2"^^xsd:double)`
    pub fn to_string_with(&self, prefixes: &PrefixMap) -> String {
        let mut out = format!(
            "{}({}",
            prefixes.abbreviate(self.predicate.as_str()),
            self.left.display_full(prefixes)
        );
        if let Some(right) = &self.right {
            out.push(',');
            out.push_str(&right.display_abbreviated(prefixes));
        }
        match &self.operand {
            Operand::Number(c) => {
                out.push(',');
                out.push_str(&Literal::double(*c).display_with(prefixes));
            }
            Operand::Pattern { flags, .. } if !flags.is_empty() => {
                out.push(',');
                out.push_str(&Literal::plain(flags.as_ref()).display_with(prefixes));
            }
            _ => {}
        }
        out.push(')');
        out
    }
}

impl fmt::Display for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&STANDARD_PREFIXES))
    }
}

fn numeric_constant(kind: BuiltInKind, arg: Option<Argument>) -> Result<f64> {
    let arg = arg.ok_or_else(|| {
        ReasonerError::invalid_argument(format!("{} requires a numeric constant", kind))
    })?;
    let value = match &arg {
        Argument::Literal(lit) => lit
            .as_f64()
            .or_else(|| lit.lexical().trim().parse::<f64>().ok()),
        _ => None,
    };
    value.ok_or_else(|| {
        ReasonerError::invalid_argument(format!(
            "{} constant must be a numeric literal",
            kind
        ))
    })
}

fn constant_text(kind: BuiltInKind, arg: Argument) -> Result<String> {
    match arg.constant() {
        Some(term) => Ok(term.lexical_form().to_string()),
        None => Err(ReasonerError::invalid_argument(format!(
            "{} requires a constant text argument",
            kind
        ))),
    }
}
