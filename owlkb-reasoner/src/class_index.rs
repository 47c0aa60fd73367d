//! Precomputed individuals-of-class lookup
//!
//! Built once before rule fan-out for every class referenced by a class atom,
//! then shared read-only across rule tasks.

use hashbrown::{HashMap, HashSet};
use owlkb_core::{Iri, Ontology};
use std::sync::Arc;

/// Members of each indexed class, as canonical individual strings
#[derive(Debug, Default)]
pub struct ClassMembershipIndex {
    members: HashMap<Iri, Vec<Arc<str>>>,
    lookup: HashMap<Iri, HashSet<Arc<str>>>,
}

impl ClassMembershipIndex {
    /// Index the given classes against the ontology
    pub fn build<'a>(ontology: &Ontology, classes: impl IntoIterator<Item = &'a Iri>) -> Self {
        let mut index = Self::default();
        for class in classes {
            if index.members.contains_key(class) {
                continue;
            }
            let members: Vec<Arc<str>> = ontology
                .individuals_of(class)
                .iter()
                .map(|iri| Arc::from(iri.as_str()))
                .collect();
            index
                .lookup
                .insert(class.clone(), members.iter().cloned().collect());
            index.members.insert(class.clone(), members);
        }
        index
    }

    /// Members of `class` in assertion order, or `None` if it was not indexed
    pub fn individuals(&self, class: &Iri) -> Option<&[Arc<str>]> {
        self.members.get(class).map(Vec::as_slice)
    }

    /// Membership test, or `None` if `class` was not indexed
    pub fn contains(&self, class: &Iri, individual: &Iri) -> Option<bool> {
        self.lookup
            .get(class)
            .map(|set| set.contains(individual.as_str()))
    }

    /// Number of indexed classes
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
