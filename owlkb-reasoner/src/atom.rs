//! Atoms - the units of the antecedent/consequent language
//!
//! An atom applies a predicate to one or two arguments. Every variant except
//! `BuiltIn` queries the ontology in antecedent position and produces axioms
//! in consequent position. Built-ins only filter existing bindings.
//!
//! Antecedent tables contain one column per distinct variable argument;
//! constant arguments restrict matches but are never materialized.
//!
//! Canonical text form: `predicate(left[,right])`. The predicate and resource
//! right arguments are abbreviated with the prefix map; variables, left
//! resources and literals are printed in full.

use once_cell::sync::Lazy;
use owlkb_core::{Axiom, AxiomKind, Iri, Literal, Ontology, PrefixMap, Term};
use owlkb_vocab::owl;
use std::fmt;
use std::sync::Arc;

use crate::binding::{BindingRow, BindingTable, Variable};
use crate::builtin::BuiltIn;
use crate::class_index::ClassMembershipIndex;
use crate::error::{ReasonerError, Result};
use crate::inference::Inference;

/// Prefix map used by `Display` implementations
pub(crate) static STANDARD_PREFIXES: Lazy<PrefixMap> = Lazy::new(PrefixMap::standard);

/// What an atom argument refers to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument {
    Variable(Variable),
    Resource(Iri),
    Literal(Literal),
}

impl Argument {
    pub fn variable(name: &str) -> Self {
        Argument::Variable(Variable::new(name))
    }

    pub fn resource(iri: impl AsRef<str>) -> Self {
        Argument::Resource(Iri::new(iri))
    }

    pub fn literal(lit: Literal) -> Self {
        Argument::Literal(lit)
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Argument::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// The constant term, or `None` for variables
    pub fn constant(&self) -> Option<Term> {
        match self {
            Argument::Variable(_) => None,
            Argument::Resource(iri) => Some(Term::Resource(iri.clone())),
            Argument::Literal(lit) => Some(Term::Literal(lit.clone())),
        }
    }

    /// Locate this argument's value source in a table.
    ///
    /// Returns `None` when the argument is a variable that is not a column.
    pub(crate) fn slot(&self, table: &BindingTable) -> Option<ArgSlot> {
        match self {
            Argument::Variable(v) => table.column_index(v).map(ArgSlot::Column),
            Argument::Resource(iri) => Some(ArgSlot::Constant(Arc::from(iri.as_str()))),
            Argument::Literal(lit) => Some(ArgSlot::Constant(Arc::from(lit.to_canonical()))),
        }
    }

    pub(crate) fn display_full(&self, prefixes: &PrefixMap) -> String {
        match self {
            Argument::Variable(v) => v.to_string(),
            Argument::Resource(iri) => iri.to_string(),
            Argument::Literal(lit) => lit.display_with(prefixes),
        }
    }

    pub(crate) fn display_abbreviated(&self, prefixes: &PrefixMap) -> String {
        match self {
            Argument::Resource(iri) => prefixes.abbreviate(iri.as_str()).into_owned(),
            other => other.display_full(prefixes),
        }
    }
}

impl From<Variable> for Argument {
    fn from(v: Variable) -> Self {
        Argument::Variable(v)
    }
}

impl From<Iri> for Argument {
    fn from(iri: Iri) -> Self {
        Argument::Resource(iri)
    }
}

impl From<Literal> for Argument {
    fn from(lit: Literal) -> Self {
        Argument::Literal(lit)
    }
}

/// Where a built-in or consequent reads an argument's value from
#[derive(Clone, Debug)]
pub(crate) enum ArgSlot {
    Column(usize),
    Constant(Arc<str>),
}

impl ArgSlot {
    pub(crate) fn value<'r>(&'r self, row: &'r BindingRow) -> Option<&'r str> {
        match self {
            ArgSlot::Column(i) => row.get(*i).and_then(|v| v.as_deref()),
            ArgSlot::Constant(c) => Some(&**c),
        }
    }
}

/// Read-only state shared by every atom evaluated in one run
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    ontology: &'a Ontology,
    class_index: Option<&'a ClassMembershipIndex>,
}

impl<'a> EvalContext<'a> {
    pub fn new(ontology: &'a Ontology) -> Self {
        Self {
            ontology,
            class_index: None,
        }
    }

    /// Use a precomputed individuals-of-class index for class atoms
    pub fn with_class_index(mut self, index: Option<&'a ClassMembershipIndex>) -> Self {
        self.class_index = index;
        self
    }

    pub fn ontology(&self) -> &'a Ontology {
        self.ontology
    }

    pub fn class_index(&self) -> Option<&'a ClassMembershipIndex> {
        self.class_index
    }
}

/// Atom variant tag, used by the generic constructor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Class,
    ObjectProperty,
    DataProperty,
    SameAs,
    DifferentFrom,
    Annotation,
}

/// A predicate application
#[derive(Clone, Debug)]
pub enum Atom {
    /// `C(?X)`
    Class { class: Iri, arg: Argument },
    /// `P(?X,?Y)` over individuals
    ObjectProperty {
        property: Iri,
        left: Argument,
        right: Argument,
    },
    /// `P(?X,?V)` with a literal value
    DataProperty {
        property: Iri,
        left: Argument,
        right: Argument,
    },
    /// `owl:sameAs(?X,?Y)`
    SameAs { left: Argument, right: Argument },
    /// `owl:differentFrom(?X,?Y)`
    DifferentFrom { left: Argument, right: Argument },
    /// `A(?X,?V)` over annotation assertions
    Annotation {
        property: Iri,
        left: Argument,
        right: Argument,
    },
    BuiltIn(BuiltIn),
}

impl Atom {
    pub fn class(class: impl Into<Iri>, arg: impl Into<Argument>) -> Self {
        Atom::Class {
            class: class.into(),
            arg: arg.into(),
        }
    }

    pub fn object_property(
        property: impl Into<Iri>,
        left: impl Into<Argument>,
        right: impl Into<Argument>,
    ) -> Self {
        Atom::ObjectProperty {
            property: property.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn data_property(
        property: impl Into<Iri>,
        left: impl Into<Argument>,
        right: impl Into<Argument>,
    ) -> Self {
        Atom::DataProperty {
            property: property.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn same_as(left: impl Into<Argument>, right: impl Into<Argument>) -> Self {
        Atom::SameAs {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn different_from(left: impl Into<Argument>, right: impl Into<Argument>) -> Self {
        Atom::DifferentFrom {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn annotation(
        property: impl Into<Iri>,
        left: impl Into<Argument>,
        right: impl Into<Argument>,
    ) -> Self {
        Atom::Annotation {
            property: property.into(),
            left: left.into(),
            right: right.into(),
        }
    }

    /// Build an atom from optional parts, as a rule loader would.
    ///
    /// Fails when the predicate (for kinds that need one), the left argument,
    /// or a required right argument is absent, or when an argument has a
    /// shape the kind cannot hold.
    pub fn from_parts(
        kind: AtomKind,
        predicate: Option<Iri>,
        left: Option<Argument>,
        right: Option<Argument>,
    ) -> Result<Self> {
        let needs_predicate = !matches!(kind, AtomKind::SameAs | AtomKind::DifferentFrom);
        let predicate = match predicate {
            Some(p) if !p.as_str().trim().is_empty() => Some(p),
            _ if needs_predicate => return Err(ReasonerError::MissingPredicate),
            _ => None,
        };
        let left = left.ok_or(ReasonerError::MissingLeftArgument)?;
        if matches!(left, Argument::Literal(_)) {
            return Err(ReasonerError::invalid_argument(format!(
                "{:?} atom cannot take a literal left argument",
                kind
            )));
        }

        if kind == AtomKind::Class {
            if right.is_some() {
                return Err(ReasonerError::invalid_argument(
                    "Class atom takes a single argument",
                ));
            }
            return Ok(Atom::Class {
                class: predicate.ok_or(ReasonerError::MissingPredicate)?,
                arg: left,
            });
        }

        let right =
            right.ok_or_else(|| ReasonerError::MissingRightArgument(format!("{:?}", kind)))?;
        let individual_right = matches!(
            kind,
            AtomKind::ObjectProperty | AtomKind::SameAs | AtomKind::DifferentFrom
        );
        if individual_right && matches!(right, Argument::Literal(_)) {
            return Err(ReasonerError::invalid_argument(format!(
                "{:?} atom cannot take a literal right argument",
                kind
            )));
        }
        if kind == AtomKind::DataProperty && matches!(right, Argument::Resource(_)) {
            return Err(ReasonerError::invalid_argument(
                "DataProperty atom cannot take a resource right argument",
            ));
        }

        let property = predicate.unwrap_or_else(|| Iri::new(owl::SAME_AS));
        Ok(match kind {
            AtomKind::ObjectProperty => Atom::ObjectProperty {
                property,
                left,
                right,
            },
            AtomKind::DataProperty => Atom::DataProperty {
                property,
                left,
                right,
            },
            AtomKind::Annotation => Atom::Annotation {
                property,
                left,
                right,
            },
            AtomKind::SameAs => Atom::SameAs { left, right },
            AtomKind::DifferentFrom => Atom::DifferentFrom { left, right },
            AtomKind::Class => unreachable!("class atoms return above"),
        })
    }

    /// Predicate IRI of the atom
    pub fn predicate(&self) -> &str {
        match self {
            Atom::Class { class, .. } => class.as_str(),
            Atom::ObjectProperty { property, .. }
            | Atom::DataProperty { property, .. }
            | Atom::Annotation { property, .. } => property.as_str(),
            Atom::SameAs { .. } => owl::SAME_AS,
            Atom::DifferentFrom { .. } => owl::DIFFERENT_FROM,
            Atom::BuiltIn(b) => b.predicate().as_str(),
        }
    }

    pub fn left(&self) -> &Argument {
        match self {
            Atom::Class { arg, .. } => arg,
            Atom::ObjectProperty { left, .. }
            | Atom::DataProperty { left, .. }
            | Atom::SameAs { left, .. }
            | Atom::DifferentFrom { left, .. }
            | Atom::Annotation { left, .. } => left,
            Atom::BuiltIn(b) => b.left(),
        }
    }

    pub fn right(&self) -> Option<&Argument> {
        match self {
            Atom::Class { .. } => None,
            Atom::ObjectProperty { right, .. }
            | Atom::DataProperty { right, .. }
            | Atom::SameAs { right, .. }
            | Atom::DifferentFrom { right, .. }
            | Atom::Annotation { right, .. } => Some(right),
            Atom::BuiltIn(b) => b.right(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Atom::BuiltIn(_))
    }

    /// Distinct variables referenced by the atom, left to right
    pub fn variables(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = Vec::new();
        for arg in std::iter::once(self.left()).chain(self.right()) {
            if let Argument::Variable(v) = arg {
                if !vars.contains(v) {
                    vars.push(v.clone());
                }
            }
        }
        vars
    }

    /// Axiom category this atom produces in consequent position
    pub fn produced_kind(&self) -> Option<AxiomKind> {
        match self {
            Atom::Class { .. } => Some(AxiomKind::ClassAssertion),
            Atom::ObjectProperty { .. } => Some(AxiomKind::ObjectPropertyAssertion),
            Atom::DataProperty { .. } => Some(AxiomKind::DataPropertyAssertion),
            Atom::SameAs { .. } => Some(AxiomKind::SameIndividual),
            Atom::DifferentFrom { .. } => Some(AxiomKind::DifferentIndividuals),
            Atom::Annotation { .. } => Some(AxiomKind::AnnotationAssertion),
            Atom::BuiltIn(_) => None,
        }
    }

    /// Evaluate in antecedent position: query the ontology for bindings.
    ///
    /// Built-ins return an empty table; they only filter (see `BuiltIn::filter`).
    pub fn evaluate_on_antecedent(&self, ctx: &EvalContext<'_>) -> Result<BindingTable> {
        let ontology = ctx.ontology();
        let table = match self {
            Atom::Class { class, arg } => evaluate_class(class, arg, ctx),
            Atom::ObjectProperty {
                property,
                left,
                right,
            } => ArgumentMatcher::new(&[left, right]).collect(
                ontology
                    .object_assertions(property)
                    .map(|(s, o)| [s.as_str().to_string(), o.as_str().to_string()]),
            ),
            Atom::DataProperty {
                property,
                left,
                right,
            } => ArgumentMatcher::new(&[left, right]).collect(
                ontology
                    .data_assertions(property)
                    .map(|(s, v)| [s.as_str().to_string(), v.to_canonical()]),
            ),
            Atom::SameAs { left, right } => ArgumentMatcher::new(&[left, right])
                .collect(symmetric_pairs(ontology.same_individuals())),
            Atom::DifferentFrom { left, right } => ArgumentMatcher::new(&[left, right])
                .collect(symmetric_pairs(ontology.different_individuals())),
            Atom::Annotation {
                property,
                left,
                right,
            } => ArgumentMatcher::new(&[left, right]).collect(
                ontology
                    .annotation_assertions(property)
                    .map(|(s, v)| [s.as_str().to_string(), v.to_canonical()]),
            ),
            Atom::BuiltIn(_) => BindingTable::default(),
        };
        Ok(table)
    }

    /// Evaluate in consequent position: instantiate one axiom per row.
    ///
    /// Rows lacking a required value, or binding a value of the wrong shape
    /// (a literal where an individual is needed), are skipped.
    pub fn evaluate_on_consequent(
        &self,
        table: &BindingTable,
        _ctx: &EvalContext<'_>,
    ) -> Vec<Inference> {
        if self.is_builtin() {
            return Vec::new();
        }

        let left = self.left().slot(table);
        let right = self.right().map(|r| r.slot(table));
        let provenance: Arc<str> = Arc::from(self.to_string());

        let mut inferences = Vec::new();
        for row in table.rows() {
            let Some(left) = resolve(left.as_ref(), row) else {
                continue;
            };
            let right = match &right {
                Some(slot) => match resolve(slot.as_ref(), row) {
                    Some(term) => Some(term),
                    None => continue,
                },
                None => None,
            };
            if let Some(axiom) = self.instantiate(left, right) {
                inferences.push(Inference::new(Arc::clone(&provenance), axiom));
            }
        }
        inferences
    }

    fn instantiate(&self, left: Term, right: Option<Term>) -> Option<Axiom> {
        let subject = left.as_resource()?.clone();
        let axiom = match self {
            Atom::Class { class, .. } => Axiom::ClassAssertion {
                class: class.clone(),
                individual: subject,
            },
            Atom::ObjectProperty { property, .. } => Axiom::ObjectPropertyAssertion {
                property: property.clone(),
                subject,
                object: right?.as_resource()?.clone(),
            },
            Atom::DataProperty { property, .. } => Axiom::DataPropertyAssertion {
                property: property.clone(),
                subject,
                value: right?.as_literal()?.clone(),
            },
            Atom::SameAs { .. } => Axiom::SameIndividual {
                left: subject,
                right: right?.as_resource()?.clone(),
            },
            Atom::DifferentFrom { .. } => Axiom::DifferentIndividuals {
                left: subject,
                right: right?.as_resource()?.clone(),
            },
            Atom::Annotation { property, .. } => Axiom::AnnotationAssertion {
                property: property.clone(),
                subject,
                value: right?,
            },
            Atom::BuiltIn(_) => return None,
        };
        Some(axiom)
    }

    /// Canonical text form using the given prefixes
    pub fn to_string_with(&self, prefixes: &PrefixMap) -> String {
        match self {
            Atom::BuiltIn(b) => b.to_string_with(prefixes),
            _ => {
                let mut out = format!(
                    "{}({}",
                    prefixes.abbreviate(self.predicate()),
                    self.left().display_full(prefixes)
                );
                if let Some(right) = self.right() {
                    out.push(',');
                    out.push_str(&right.display_abbreviated(prefixes));
                }
                out.push(')');
                out
            }
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&STANDARD_PREFIXES))
    }
}

impl From<BuiltIn> for Atom {
    fn from(b: BuiltIn) -> Self {
        Atom::BuiltIn(b)
    }
}

fn resolve(slot: Option<&ArgSlot>, row: &BindingRow) -> Option<Term> {
    Term::parse(slot?.value(row)?).ok()
}

fn evaluate_class(class: &Iri, arg: &Argument, ctx: &EvalContext<'_>) -> BindingTable {
    let cached = ctx.class_index().and_then(|index| index.individuals(class));
    match arg {
        Argument::Variable(v) => {
            let mut table = BindingTable::new(vec![v.clone()]);
            match cached {
                Some(members) => {
                    for member in members {
                        table.push_row(vec![Some(Arc::clone(member))]);
                    }
                }
                None => {
                    for member in ctx.ontology().individuals_of(class) {
                        table.push_row(vec![Some(Arc::from(member.as_str()))]);
                    }
                }
            }
            table
        }
        Argument::Resource(individual) => {
            let known = match ctx.class_index().and_then(|i| i.contains(class, individual)) {
                Some(known) => known,
                None => ctx.ontology().has_class_assertion(class, individual),
            };
            let mut table = BindingTable::new(Vec::new());
            if known {
                table.push_row(Vec::new());
            }
            table
        }
        Argument::Literal(_) => BindingTable::new(Vec::new()),
    }
}

/// Both orientations of each stored pair; reflexive pairs appear once
fn symmetric_pairs<'a>(
    pairs: impl Iterator<Item = (&'a Iri, &'a Iri)> + 'a,
) -> impl Iterator<Item = [String; 2]> + 'a {
    pairs.flat_map(|(a, b)| {
        let forward = [a.as_str().to_string(), b.as_str().to_string()];
        let backward = (a != b).then(|| [b.as_str().to_string(), a.as_str().to_string()]);
        std::iter::once(forward).chain(backward)
    })
}

/// Matches candidate `(left, right)` values against an atom's arguments
struct ArgumentMatcher {
    columns: Vec<Variable>,
    slots: Vec<MatchSlot>,
}

enum MatchSlot {
    Column(usize),
    Constant(String),
}

impl ArgumentMatcher {
    fn new(args: &[&Argument]) -> Self {
        let mut columns: Vec<Variable> = Vec::new();
        let mut slots = Vec::with_capacity(args.len());
        for arg in args {
            let slot = match arg {
                Argument::Variable(v) => match columns.iter().position(|c| c == v) {
                    Some(i) => MatchSlot::Column(i),
                    None => {
                        columns.push(v.clone());
                        MatchSlot::Column(columns.len() - 1)
                    }
                },
                Argument::Resource(iri) => MatchSlot::Constant(iri.as_str().to_string()),
                Argument::Literal(lit) => MatchSlot::Constant(lit.to_canonical()),
            };
            slots.push(slot);
        }
        Self { columns, slots }
    }

    fn matches(&self, values: &[String]) -> Option<BindingRow> {
        let mut row: BindingRow = vec![None; self.columns.len()];
        for (slot, value) in self.slots.iter().zip(values) {
            match slot {
                MatchSlot::Constant(c) => {
                    if c != value {
                        return None;
                    }
                }
                MatchSlot::Column(i) => match &row[*i] {
                    Some(bound) if bound.as_ref() != value.as_str() => return None,
                    Some(_) => {}
                    None => row[*i] = Some(Arc::from(value.as_str())),
                },
            }
        }
        Some(row)
    }

    fn collect<I>(self, candidates: I) -> BindingTable
    where
        I: Iterator<Item = [String; 2]>,
    {
        let mut table = BindingTable::new(self.columns.clone());
        for values in candidates {
            if let Some(row) = self.matches(&values) {
                table.push_row(row);
            }
        }
        table
    }
}
