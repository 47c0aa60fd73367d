//! Reasoning budget, diagnostics, results and the LRU result cache
//!
//! A reasoner run over the same ontology state with the same rule set and
//! options always produces the same inferences, so results can be cached and
//! shared by `Arc` across callers.

use lru::LruCache;
use parking_lot::RwLock;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use crate::inference::Inference;

/// Cache key for reasoning results
///
/// MUST include all state that affects the output. A cache hit should only
/// occur when all these values match.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReasoningCacheKey {
    /// Ontology identifier
    pub ontology_iri: Arc<str>,
    /// Digest of the stored axiom set
    pub ontology_digest: u64,
    /// Number of stored axioms
    pub axiom_count: usize,
    /// Hash of rule identifiers and rule texts
    pub rule_set_hash: u64,
    /// Budget hash for fixpoint runs, `None` for single passes
    pub budget_hash: Option<u64>,
}

/// Budget constraints for the fixpoint driver
///
/// Single-pass reasoning ignores the budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReasoningBudget {
    /// Max number of passes
    pub max_iterations: usize,
    /// Max wall-clock time across all passes
    pub max_duration: Duration,
    /// Max total inferences before stopping
    pub max_inferences: usize,
}

impl Default for ReasoningBudget {
    fn default() -> Self {
        Self {
            max_iterations: 32,
            max_duration: Duration::from_secs(30),
            max_inferences: 1_000_000,
        }
    }
}

impl ReasoningBudget {
    /// Create a budget with custom limits
    pub fn new(max_iterations: usize, max_duration: Duration, max_inferences: usize) -> Self {
        Self {
            max_iterations,
            max_duration,
            max_inferences,
        }
    }

    /// Create an unlimited budget (for testing or small ontologies)
    pub fn unlimited() -> Self {
        Self {
            max_iterations: usize::MAX,
            max_duration: Duration::from_secs(3600), // 1 hour
            max_inferences: usize::MAX,
        }
    }

    /// Compute a hash of budget settings for cache key
    pub fn config_hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut h = DefaultHasher::new();
        self.max_iterations.hash(&mut h);
        self.max_duration.as_millis().hash(&mut h);
        self.max_inferences.hash(&mut h);
        h.finish()
    }
}

/// Diagnostics from a reasoning run
///
/// Always returned alongside the inferences so callers can see why an
/// expected inference is missing (rows dropped, duplicates removed, capping).
#[derive(Clone, Debug, Default)]
pub struct ReasoningDiagnostics {
    /// Number of passes performed (1 for single-pass reasoning)
    pub iterations: usize,
    /// Rule evaluations across all passes
    pub rules_evaluated: usize,
    /// Inferences produced by consequents before deduplication
    pub candidates: usize,
    /// Candidates dropped because the axiom was already explicit
    pub explicit_duplicates: usize,
    /// Candidates dropped because an earlier rule produced the same axiom
    pub cross_rule_duplicates: usize,
    /// Inferences in the final result
    pub inferences: usize,
    /// Whether the fixpoint driver stopped on a budget cap
    pub capped: bool,
    /// Reason for capping, if applicable
    pub capped_reason: Option<String>,
    /// Wall-clock duration of reasoning
    pub duration: Duration,
    /// Surviving inferences per rule identifier
    pub rules_fired: hashbrown::HashMap<String, usize>,
}

impl ReasoningDiagnostics {
    /// Mark diagnostics as capped
    pub fn capped(mut self, reason: impl Into<String>) -> Self {
        self.capped = true;
        self.capped_reason = Some(reason.into());
        self
    }

    /// Fold one pass into cumulative diagnostics
    pub fn absorb(&mut self, pass: &ReasoningDiagnostics) {
        self.iterations += pass.iterations;
        self.rules_evaluated += pass.rules_evaluated;
        self.candidates += pass.candidates;
        self.explicit_duplicates += pass.explicit_duplicates;
        self.cross_rule_duplicates += pass.cross_rule_duplicates;
        self.inferences += pass.inferences;
        for (rule, count) in &pass.rules_fired {
            *self.rules_fired.entry(rule.clone()).or_insert(0) += count;
        }
    }

    /// Record surviving inferences for a rule
    pub fn record_rule_fired(&mut self, rule_name: &str, count: usize) {
        if count > 0 {
            *self.rules_fired.entry(rule_name.to_string()).or_insert(0) += count;
        }
    }
}

/// Combined result of reasoning: inferences + diagnostics
#[derive(Clone, Debug, Default)]
pub struct ReasoningResult {
    /// Deduplicated inferences, grouped by rule in rule-set order
    pub inferences: Vec<Inference>,
    /// Diagnostics about the reasoning process
    pub diagnostics: ReasoningDiagnostics,
}

impl ReasoningResult {
    pub fn new(inferences: Vec<Inference>, diagnostics: ReasoningDiagnostics) -> Self {
        Self {
            inferences,
            diagnostics,
        }
    }

    pub fn len(&self) -> usize {
        self.inferences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inferences.is_empty()
    }
}

/// Thread-safe LRU cache for reasoning results
///
/// Uses a read-write lock to allow concurrent peeks while serializing writes.
/// The cache stores `Arc<ReasoningResult>` for cheap cloning.
pub struct ReasoningCache {
    inner: RwLock<LruCache<ReasoningCacheKey, Arc<ReasoningResult>>>,
}

impl ReasoningCache {
    /// Create a new cache with the specified capacity (at least one entry)
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: RwLock::new(LruCache::new(cap)),
        }
    }

    /// Create a cache with default capacity (16 entries)
    pub fn with_default_capacity() -> Self {
        Self::new(16)
    }

    /// Get a cached result if present
    ///
    /// This promotes the entry to most-recently-used.
    pub fn get(&self, key: &ReasoningCacheKey) -> Option<Arc<ReasoningResult>> {
        self.inner.write().get(key).cloned()
    }

    /// Peek at a cached result without updating LRU order
    pub fn peek(&self, key: &ReasoningCacheKey) -> Option<Arc<ReasoningResult>> {
        self.inner.read().peek(key).cloned()
    }

    pub fn insert(&self, key: ReasoningCacheKey, result: Arc<ReasoningResult>) {
        self.inner.write().put(key, result);
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().cap().get()
    }
}

impl Default for ReasoningCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key(iri: &str, digest: u64) -> ReasoningCacheKey {
        ReasoningCacheKey {
            ontology_iri: iri.into(),
            ontology_digest: digest,
            axiom_count: 1,
            rule_set_hash: 0,
            budget_hash: None,
        }
    }

    #[test]
    fn test_cache_insert_get() {
        let cache = ReasoningCache::new(4);
        let key = make_key("ex:o", 1);
        assert!(cache.get(&key).is_none());

        cache.insert(key.clone(), Arc::new(ReasoningResult::default()));
        assert!(cache.get(&key).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_lru_eviction() {
        let cache = ReasoningCache::new(2);
        for i in 0..3 {
            cache.insert(make_key("ex:o", i), Arc::new(ReasoningResult::default()));
        }

        // Oldest entry is evicted
        assert!(cache.peek(&make_key("ex:o", 0)).is_none());
        assert!(cache.peek(&make_key("ex:o", 1)).is_some());
        assert!(cache.peek(&make_key("ex:o", 2)).is_some());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        assert_eq!(ReasoningCache::new(0).capacity(), 1);
    }

    #[test]
    fn test_budget_hash_tracks_limits() {
        let a = ReasoningBudget::default();
        assert_eq!(a.config_hash(), ReasoningBudget::default().config_hash());
        assert_ne!(a.config_hash(), ReasoningBudget::unlimited().config_hash());
    }

    #[test]
    fn test_single_pass_and_fixpoint_keys_differ() {
        let single = make_key("ex:o", 7);
        let fixpoint = ReasoningCacheKey {
            budget_hash: Some(ReasoningBudget::default().config_hash()),
            ..single.clone()
        };
        let cache = ReasoningCache::new(4);
        cache.insert(single.clone(), Arc::new(ReasoningResult::default()));
        assert!(cache.peek(&fixpoint).is_none());
        assert!(cache.peek(&single).is_some());
    }

    #[test]
    fn test_diagnostics_absorb() {
        let mut total = ReasoningDiagnostics::default();
        let mut pass = ReasoningDiagnostics {
            iterations: 1,
            candidates: 5,
            inferences: 3,
            ..Default::default()
        };
        pass.record_rule_fired("ex:r1", 3);
        pass.record_rule_fired("ex:r2", 0);
        total.absorb(&pass);
        total.absorb(&pass);
        assert_eq!(total.iterations, 2);
        assert_eq!(total.candidates, 10);
        assert_eq!(total.rules_fired.get("ex:r1"), Some(&6));
        assert!(!total.rules_fired.contains_key("ex:r2"));

        let capped = total.capped("max_iterations");
        assert!(capped.capped);
    }
}
