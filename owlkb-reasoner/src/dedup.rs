//! Deduplication of per-rule inference buffers
//!
//! Two passes:
//! 1. in parallel, build one fingerprint set per axiom category the rules can
//!    produce and drop every candidate whose axiom is already stored
//! 2. sequentially, in rule order, flatten the buffers and keep only the first
//!    candidate for each fingerprint, so earlier rules win

use hashbrown::{HashMap, HashSet};
use owlkb_core::{AxiomKind, Ontology};
use rayon::prelude::*;
use std::collections::BTreeSet;

use crate::inference::Inference;

/// Result of deduplicating one run's buffers
#[derive(Debug, Default)]
pub(crate) struct DedupOutcome {
    pub inferences: Vec<Inference>,
    /// Surviving inferences per input buffer
    pub per_buffer: Vec<usize>,
    pub explicit_duplicates: usize,
    pub cross_rule_duplicates: usize,
}

/// Fingerprints of every stored axiom in each category, built concurrently
pub(crate) fn stored_fingerprints(
    ontology: &Ontology,
    kinds: &BTreeSet<AxiomKind>,
) -> HashMap<AxiomKind, HashSet<String>> {
    kinds
        .par_iter()
        .map(|&kind| {
            let set: HashSet<String> = ontology
                .axioms_of_kind(kind)
                .map(|entry| entry.axiom.fingerprint())
                .collect();
            (kind, set)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

/// Deduplicate per-rule buffers (indexed in rule order) against the ontology
/// and against each other
pub(crate) fn deduplicate(
    ontology: &Ontology,
    kinds: &BTreeSet<AxiomKind>,
    buffers: Vec<Vec<Inference>>,
) -> DedupOutcome {
    let stored = stored_fingerprints(ontology, kinds);

    let filtered: Vec<(Vec<(String, Inference)>, usize)> = buffers
        .into_par_iter()
        .map(|buffer| {
            let before = buffer.len();
            let kept: Vec<(String, Inference)> = buffer
                .into_iter()
                .map(|inference| (inference.fingerprint(), inference))
                .filter(|(fingerprint, inference)| {
                    let known = match stored.get(&inference.axiom.kind()) {
                        Some(set) => set.contains(fingerprint),
                        None => ontology.contains(&inference.axiom),
                    };
                    !known
                })
                .collect();
            let dropped = before - kept.len();
            (kept, dropped)
        })
        .collect();

    let mut outcome = DedupOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();
    for (buffer, dropped) in filtered {
        outcome.explicit_duplicates += dropped;
        let mut survivors = 0;
        for (fingerprint, inference) in buffer {
            if seen.insert(fingerprint) {
                outcome.inferences.push(inference);
                survivors += 1;
            } else {
                outcome.cross_rule_duplicates += 1;
            }
        }
        outcome.per_buffer.push(survivors);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use owlkb_core::{Axiom, Iri};

    fn class_assertion(class: &str, who: &str) -> Axiom {
        Axiom::ClassAssertion {
            class: Iri::new(class),
            individual: Iri::new(who),
        }
    }

    #[test]
    fn test_drops_stored_and_repeated_axioms() {
        let mut ont = Ontology::new("ex:o");
        ont.add_axiom(class_assertion("ex:Person", "ex:ann"));

        let buffers = vec![
            vec![
                Inference::new("r1", class_assertion("ex:Person", "ex:ann")),
                Inference::new("r1", class_assertion("ex:Person", "ex:bob")),
            ],
            vec![
                Inference::new("r2", class_assertion("ex:Person", "ex:bob")),
                Inference::new("r2", class_assertion("ex:Person", "ex:cyd")),
            ],
        ];
        let kinds = BTreeSet::from([AxiomKind::ClassAssertion]);
        let out = deduplicate(&ont, &kinds, buffers);

        assert_eq!(out.explicit_duplicates, 1);
        assert_eq!(out.cross_rule_duplicates, 1);
        assert_eq!(out.per_buffer, vec![1, 1]);
        assert_eq!(out.inferences.len(), 2);
        assert_eq!(out.inferences[0].provenance.as_ref(), "r1");
    }

    #[test]
    fn test_symmetric_same_individual_counts_once() {
        let ont = Ontology::new("ex:o");
        let same = |a: &str, b: &str| Axiom::SameIndividual {
            left: Iri::new(a),
            right: Iri::new(b),
        };
        let buffers = vec![vec![
            Inference::new("r", same("ex:a", "ex:b")),
            Inference::new("r", same("ex:b", "ex:a")),
        ]];
        let kinds = BTreeSet::from([AxiomKind::SameIndividual]);
        let out = deduplicate(&ont, &kinds, buffers);
        assert_eq!(out.inferences.len(), 1);
    }

    #[test]
    fn test_unlisted_kind_falls_back_to_ontology_lookup() {
        let mut ont = Ontology::new("ex:o");
        ont.add_axiom(class_assertion("ex:A", "ex:x"));
        let buffers = vec![vec![Inference::new("r", class_assertion("ex:A", "ex:x"))]];
        let out = deduplicate(&ont, &BTreeSet::new(), buffers);
        assert!(out.inferences.is_empty());
        assert_eq!(out.explicit_duplicates, 1);
    }
}
