//! Rule antecedents
//!
//! Evaluation partitions the atoms: every non-built-in atom is evaluated
//! independently and the tables are natural-joined (starting from the unit
//! table, so an empty antecedent is vacuously true), then the joined table is
//! threaded through the built-ins in declaration order.

use owlkb_core::{Iri, PrefixMap};
use std::fmt;

use crate::atom::{Atom, EvalContext, STANDARD_PREFIXES};
use crate::binding::BindingTable;
use crate::error::Result;

/// Conjunction of atoms forming a rule's "if" clause
#[derive(Clone, Debug, Default)]
pub struct Antecedent {
    atoms: Vec<Atom>,
}

impl Antecedent {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Evaluate against the ontology, producing the rule's binding table
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> Result<BindingTable> {
        let (builtins, queries): (Vec<&Atom>, Vec<&Atom>) =
            self.atoms.iter().partition(|atom| atom.is_builtin());

        let tables = queries
            .iter()
            .map(|atom| atom.evaluate_on_antecedent(ctx))
            .collect::<Result<Vec<_>>>()?;
        let mut table = BindingTable::join_all(tables);

        for atom in builtins {
            if let Atom::BuiltIn(builtin) = atom {
                table = builtin.filter(table)?;
            }
        }
        Ok(table)
    }

    /// Classes referenced by class atoms
    pub fn referenced_classes(&self) -> impl Iterator<Item = &Iri> + '_ {
        self.atoms.iter().filter_map(|atom| match atom {
            Atom::Class { class, .. } => Some(class),
            _ => None,
        })
    }

    pub fn to_string_with(&self, prefixes: &PrefixMap) -> String {
        join_atoms(&self.atoms, prefixes)
    }
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&STANDARD_PREFIXES))
    }
}

impl From<Vec<Atom>> for Antecedent {
    fn from(atoms: Vec<Atom>) -> Self {
        Self::new(atoms)
    }
}

pub(crate) fn join_atoms(atoms: &[Atom], prefixes: &PrefixMap) -> String {
    atoms
        .iter()
        .map(|atom| atom.to_string_with(prefixes))
        .collect::<Vec<_>>()
        .join(" ^ ")
}
