//! In-memory ontology store
//!
//! Holds asserted and inferred axioms with the indexes the rule engine needs:
//! - by axiom kind (for fingerprint sets during dedup)
//! - by class (for class-membership lookups)
//! - by property (for property and annotation enumeration)
//!
//! Axioms are stored once per fingerprint. The `epoch` is bumped on every
//! mutation batch that inserts something. The `content_digest` identifies the
//! stored axiom set itself, so two values with the same IRI and epoch but
//! different axioms never share it; caches key on the digest.

use hashbrown::{HashMap, HashSet};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::axiom::{Axiom, AxiomEntry, AxiomKind};
use crate::term::{Iri, Literal, Term};

/// Indexed set of axioms
#[derive(Clone, Debug)]
pub struct Ontology {
    iri: Iri,
    epoch: u64,
    /// Wrapping sum of per-fingerprint hashes
    digest: u64,
    entries: Vec<AxiomEntry>,
    fingerprints: HashSet<String>,
    by_kind: HashMap<AxiomKind, Vec<usize>>,
    by_class: HashMap<Iri, Vec<usize>>,
    by_property: HashMap<Iri, Vec<usize>>,
}

impl Ontology {
    /// Create an empty ontology
    pub fn new(iri: impl Into<Iri>) -> Self {
        Self {
            iri: iri.into(),
            epoch: 0,
            digest: 0,
            entries: Vec::new(),
            fingerprints: HashSet::new(),
            by_kind: HashMap::new(),
            by_class: HashMap::new(),
            by_property: HashMap::new(),
        }
    }

    pub fn iri(&self) -> &Iri {
        &self.iri
    }

    /// Mutation counter
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Order-independent digest of the stored axiom fingerprints.
    ///
    /// Equal axiom sets give equal digests whatever the insertion order.
    /// The asserted/inferred flag is not part of it.
    pub fn content_digest(&self) -> u64 {
        self.digest
    }

    /// Add an asserted axiom. Returns `true` if it was not already present.
    pub fn add_axiom(&mut self, axiom: Axiom) -> bool {
        let added = self.insert(AxiomEntry::asserted(axiom));
        if added {
            self.epoch += 1;
        }
        added
    }

    /// Add an axiom tagged as inferred. Returns `true` if it was not already present.
    pub fn add_inference(&mut self, axiom: Axiom) -> bool {
        let added = self.insert(AxiomEntry::inferred(axiom));
        if added {
            self.epoch += 1;
        }
        added
    }

    /// Add several inferred axioms as one mutation batch.
    ///
    /// Returns the number of axioms that were new.
    pub fn extend_with_inferences<I>(&mut self, axioms: I) -> usize
    where
        I: IntoIterator<Item = Axiom>,
    {
        let added = axioms
            .into_iter()
            .filter(|axiom| self.insert(AxiomEntry::inferred(axiom.clone())))
            .count();
        if added > 0 {
            self.epoch += 1;
        }
        added
    }

    fn insert(&mut self, entry: AxiomEntry) -> bool {
        let fingerprint = entry.axiom.fingerprint();
        let hash = fingerprint_hash(&fingerprint);
        if !self.fingerprints.insert(fingerprint) {
            return false;
        }
        self.digest = self.digest.wrapping_add(hash);

        let idx = self.entries.len();
        self.by_kind.entry(entry.axiom.kind()).or_default().push(idx);

        if let Axiom::ClassAssertion { class, .. } = &entry.axiom {
            self.by_class.entry(class.clone()).or_default().push(idx);
        }
        if let Some(property) = entry.axiom.property() {
            self.by_property.entry(property.clone()).or_default().push(idx);
        }

        self.entries.push(entry);
        true
    }

    /// True if a structurally identical axiom is stored
    pub fn contains(&self, axiom: &Axiom) -> bool {
        self.fingerprints.contains(&axiom.fingerprint())
    }

    /// Individuals asserted to be members of `class`, in insertion order
    pub fn individuals_of(&self, class: &Iri) -> Vec<Iri> {
        self.indices(&self.by_class, class)
            .filter_map(|entry| match &entry.axiom {
                Axiom::ClassAssertion { individual, .. } => Some(individual.clone()),
                _ => None,
            })
            .collect()
    }

    /// True if `individual` is asserted to be a member of `class`
    pub fn has_class_assertion(&self, class: &Iri, individual: &Iri) -> bool {
        self.indices(&self.by_class, class).any(|entry| {
            matches!(&entry.axiom, Axiom::ClassAssertion { individual: i, .. } if i == individual)
        })
    }

    /// `(subject, object)` pairs of positive object property assertions
    pub fn object_assertions<'a>(
        &'a self,
        property: &Iri,
    ) -> impl Iterator<Item = (&'a Iri, &'a Iri)> + 'a {
        self.indices(&self.by_property, property)
            .filter_map(|entry| match &entry.axiom {
                Axiom::ObjectPropertyAssertion {
                    subject, object, ..
                } => Some((subject, object)),
                _ => None,
            })
    }

    /// `(subject, value)` pairs of positive data property assertions
    pub fn data_assertions<'a>(
        &'a self,
        property: &Iri,
    ) -> impl Iterator<Item = (&'a Iri, &'a Literal)> + 'a {
        self.indices(&self.by_property, property)
            .filter_map(|entry| match &entry.axiom {
                Axiom::DataPropertyAssertion { subject, value, .. } => Some((subject, value)),
                _ => None,
            })
    }

    /// `(subject, value)` pairs of annotation assertions
    pub fn annotation_assertions<'a>(
        &'a self,
        property: &Iri,
    ) -> impl Iterator<Item = (&'a Iri, &'a Term)> + 'a {
        self.indices(&self.by_property, property)
            .filter_map(|entry| match &entry.axiom {
                Axiom::AnnotationAssertion { subject, value, .. } => Some((subject, value)),
                _ => None,
            })
    }

    /// `(left, right)` pairs of SameIndividual axioms, as stored
    pub fn same_individuals(&self) -> impl Iterator<Item = (&Iri, &Iri)> + '_ {
        self.axioms_of_kind(AxiomKind::SameIndividual)
            .filter_map(|entry| match &entry.axiom {
                Axiom::SameIndividual { left, right } => Some((left, right)),
                _ => None,
            })
    }

    /// `(left, right)` pairs of DifferentIndividuals axioms, as stored
    pub fn different_individuals(&self) -> impl Iterator<Item = (&Iri, &Iri)> + '_ {
        self.axioms_of_kind(AxiomKind::DifferentIndividuals)
            .filter_map(|entry| match &entry.axiom {
                Axiom::DifferentIndividuals { left, right } => Some((left, right)),
                _ => None,
            })
    }

    /// Entity declarations
    pub fn declaration_axioms(&self) -> impl Iterator<Item = &AxiomEntry> + '_ {
        self.axioms_of_kind(AxiomKind::Declaration)
    }

    /// All stored axioms of one category
    pub fn axioms_of_kind(&self, kind: AxiomKind) -> impl Iterator<Item = &AxiomEntry> + '_ {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flat_map(|indices| indices.iter().map(|&i| &self.entries[i]))
    }

    /// Iterate over all stored axioms
    pub fn iter(&self) -> impl Iterator<Item = &AxiomEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn indices<'a>(
        &'a self,
        index: &'a HashMap<Iri, Vec<usize>>,
        key: &Iri,
    ) -> impl Iterator<Item = &'a AxiomEntry> + 'a {
        index
            .get(key)
            .into_iter()
            .flat_map(|indices| indices.iter().map(|&i| &self.entries[i]))
    }
}

fn fingerprint_hash(fingerprint: &str) -> u64 {
    let mut h = DefaultHasher::new();
    fingerprint.hash(&mut h);
    h.finish()
}
