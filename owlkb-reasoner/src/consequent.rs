//! Rule consequents

use owlkb_core::{AxiomKind, PrefixMap};
use std::fmt;

use crate::antecedent::join_atoms;
use crate::atom::{Atom, EvalContext, STANDARD_PREFIXES};
use crate::binding::BindingTable;
use crate::error::{ReasonerError, Result};
use crate::inference::Inference;

/// Conjunction of atoms forming a rule's "then" clause.
///
/// Built-ins cannot produce axioms and are rejected at construction.
#[derive(Clone, Debug, Default)]
pub struct Consequent {
    atoms: Vec<Atom>,
}

impl Consequent {
    pub fn new(atoms: Vec<Atom>) -> Result<Self> {
        if let Some(builtin) = atoms.iter().find(|atom| atom.is_builtin()) {
            return Err(ReasonerError::invalid_argument(format!(
                "built-in {} cannot appear in a consequent",
                builtin
            )));
        }
        Ok(Self { atoms })
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Instantiate every atom against the table, in declaration order
    pub fn evaluate(&self, table: &BindingTable, ctx: &EvalContext<'_>) -> Vec<Inference> {
        self.atoms
            .iter()
            .flat_map(|atom| atom.evaluate_on_consequent(table, ctx))
            .collect()
    }

    /// Axiom categories this consequent can produce
    pub fn produced_kinds(&self) -> impl Iterator<Item = AxiomKind> + '_ {
        self.atoms.iter().filter_map(Atom::produced_kind)
    }

    pub fn to_string_with(&self, prefixes: &PrefixMap) -> String {
        join_atoms(&self.atoms, prefixes)
    }
}

impl fmt::Display for Consequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&STANDARD_PREFIXES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Argument;
    use crate::builtin::{BuiltIn, BuiltInKind};
    use owlkb_core::{Axiom, Ontology};

    #[test]
    fn test_rejects_builtins() {
        let builtin = BuiltIn::comparison(
            BuiltInKind::Equal,
            Argument::variable("X"),
            Argument::variable("Y"),
        )
        .unwrap();
        assert!(matches!(
            Consequent::new(vec![builtin.into()]),
            Err(ReasonerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_fires_once_per_atom_on_unit_table() {
        let ont = Ontology::new("ex:o");
        let consequent = Consequent::new(vec![
            Atom::class("ex:Thing", Argument::resource("ex:a")),
            Atom::same_as(Argument::resource("ex:a"), Argument::resource("ex:b")),
        ])
        .unwrap();
        let out = consequent.evaluate(&BindingTable::unit(), &EvalContext::new(&ont));
        assert_eq!(out.len(), 2);
        assert!(matches!(out[1].axiom, Axiom::SameIndividual { .. }));
        assert_eq!(
            consequent.produced_kinds().collect::<Vec<_>>(),
            vec![AxiomKind::ClassAssertion, AxiomKind::SameIndividual]
        );
    }

    #[test]
    fn test_empty_table_produces_nothing() {
        let ont = Ontology::new("ex:o");
        let consequent =
            Consequent::new(vec![Atom::class("ex:Thing", Argument::variable("X"))]).unwrap();
        let table = BindingTable::new(Vec::new());
        assert!(consequent
            .evaluate(&table, &EvalContext::new(&ont))
            .is_empty());
    }
}
