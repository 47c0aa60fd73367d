//! Inferences - derived axioms tagged with the rule or atom that produced them

use owlkb_core::{Axiom, AxiomEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A derived axiom plus its provenance.
///
/// Inferences are values: created by consequent evaluation, filtered by the
/// reasoner, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inference {
    /// Canonical text of the originating rule (or atom, before a rule stamps it)
    pub provenance: Arc<str>,
    pub axiom: Axiom,
}

impl Inference {
    pub fn new(provenance: impl Into<Arc<str>>, axiom: Axiom) -> Self {
        Self {
            provenance: provenance.into(),
            axiom,
        }
    }

    /// Structural identity of the derived axiom; provenance is not part of it
    pub fn fingerprint(&self) -> String {
        self.axiom.fingerprint()
    }

    /// Convert into a stored ontology entry tagged as inferred
    pub fn into_entry(self) -> AxiomEntry {
        AxiomEntry::inferred(self.axiom)
    }
}

impl fmt::Display for Inference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <= {}", self.axiom, self.provenance)
    }
}
