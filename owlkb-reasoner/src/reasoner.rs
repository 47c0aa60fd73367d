//! Concurrent single-pass reasoner
//!
//! One run moves through four phases:
//! 1. build the shared class membership index and one output slot per rule
//! 2. fan out: every rule is evaluated on the blocking pool, bounded by a
//!    semaphore, reading the ontology and index and writing only its own slot
//! 3. barrier: all rule tasks are joined before anything is observed
//! 4. dedup: candidates already stored in the ontology, or produced by an
//!    earlier rule, are removed
//!
//! Rules are never re-run against their own inferences within one run; see
//! [`Reasoner::apply_until_fixpoint`] for the iterating driver.

use owlkb_core::Ontology;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::atom::EvalContext;
use crate::cache::{ReasoningCache, ReasoningCacheKey, ReasoningDiagnostics, ReasoningResult};
use crate::class_index::ClassMembershipIndex;
use crate::dedup;
use crate::error::{ReasonerError, Result};
use crate::fixpoint;
use crate::inference::Inference;
use crate::rule::{Rule, RuleSet};
use crate::ReasonerOptions;

/// Applies a rule set to ontologies
#[derive(Clone, Debug)]
pub struct Reasoner {
    rules: Arc<RuleSet>,
    options: ReasonerOptions,
}

impl Reasoner {
    pub fn new(rules: RuleSet) -> Self {
        Self::with_options(rules, ReasonerOptions::default())
    }

    pub fn with_options(rules: RuleSet, options: ReasonerOptions) -> Self {
        Self {
            rules: Arc::new(rules),
            options,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn options(&self) -> &ReasonerOptions {
        &self.options
    }

    /// Cache key for a single pass over `ontology` in its current state.
    ///
    /// Concurrency, the class index and the budget do not change single-pass
    /// output and are left out.
    pub fn cache_key(&self, ontology: &Ontology) -> ReasoningCacheKey {
        ReasoningCacheKey {
            ontology_iri: Arc::from(ontology.iri().as_str()),
            ontology_digest: ontology.content_digest(),
            axiom_count: ontology.len(),
            rule_set_hash: self.rules.fingerprint_hash(),
            budget_hash: None,
        }
    }

    /// Cache key for a fixpoint run, which also depends on the budget
    pub fn fixpoint_cache_key(&self, ontology: &Ontology) -> ReasoningCacheKey {
        ReasoningCacheKey {
            budget_hash: Some(self.options.budget.config_hash()),
            ..self.cache_key(ontology)
        }
    }

    /// Run every rule once against the ontology.
    ///
    /// An absent ontology yields an empty result rather than an error.
    pub async fn apply_to_ontology(
        &self,
        ontology: impl Into<Option<Arc<Ontology>>>,
    ) -> Result<ReasoningResult> {
        let Some(ontology) = ontology.into() else {
            return Ok(ReasoningResult::default());
        };

        let span = tracing::debug_span!(
            "swrl_reasoner_apply",
            rules = self.rules.len(),
            ontology = %ontology.iri(),
        );
        self.run(ontology).instrument(span).await
    }

    /// Single pass, served from `cache` when the same axiom set and rule set
    /// have been seen before
    pub async fn apply_cached(
        &self,
        ontology: Arc<Ontology>,
        cache: &ReasoningCache,
    ) -> Result<Arc<ReasoningResult>> {
        let key = self.cache_key(&ontology);
        if let Some(cached) = cache.get(&key) {
            tracing::debug!(ontology = %ontology.iri(), digest = key.ontology_digest, "reasoning cache hit");
            return Ok(cached);
        }

        let result = Arc::new(self.apply_to_ontology(ontology).await?);
        cache.insert(key, result.clone());
        Ok(result)
    }

    /// Repeat single passes, folding inferences back into a private copy of
    /// the ontology, until a pass derives nothing new or the options' budget
    /// is spent
    pub async fn apply_until_fixpoint(
        &self,
        ontology: impl Into<Option<Arc<Ontology>>>,
    ) -> Result<ReasoningResult> {
        match ontology.into() {
            Some(ontology) => fixpoint::run_fixpoint(self, ontology).await,
            None => Ok(ReasoningResult::default()),
        }
    }

    /// [`Reasoner::apply_until_fixpoint`] served from `cache` when possible
    pub async fn apply_until_fixpoint_cached(
        &self,
        ontology: Arc<Ontology>,
        cache: &ReasoningCache,
    ) -> Result<Arc<ReasoningResult>> {
        let key = self.fixpoint_cache_key(&ontology);
        if let Some(cached) = cache.get(&key) {
            tracing::debug!(ontology = %ontology.iri(), digest = key.ontology_digest, "fixpoint cache hit");
            return Ok(cached);
        }

        let result = Arc::new(self.apply_until_fixpoint(ontology).await?);
        cache.insert(key, result.clone());
        Ok(result)
    }

    async fn run(&self, ontology: Arc<Ontology>) -> Result<ReasoningResult> {
        let start = Instant::now();
        let rules: Vec<Arc<Rule>> = self.rules.iter().cloned().collect();

        // -- Shared read-only state, built once before fan-out --

        let class_index = self.options.use_class_cache.then(|| {
            Arc::new(ClassMembershipIndex::build(
                &ontology,
                self.rules.referenced_classes(),
            ))
        });
        // One write-once slot per rule, addressed by rule position
        let mut slots: Vec<Option<Vec<Inference>>> = (0..rules.len()).map(|_| None).collect();

        // -- Fan out --

        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrency.max(1)));
        let mut join_set: JoinSet<(usize, Result<Vec<Inference>>)> = JoinSet::new();
        for (slot, rule) in rules.iter().enumerate() {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| ReasonerError::task_join("rule semaphore closed"))?;
            let rule = Arc::clone(rule);
            let ontology = Arc::clone(&ontology);
            let class_index = class_index.clone();
            let parent_span = tracing::Span::current();

            join_set.spawn_blocking(move || {
                let _guard = parent_span.enter(); // safe: spawn_blocking pins to one thread
                let _permit = permit;
                tracing::debug!(rule = %rule.id(), "rule started");
                let ctx = EvalContext::new(&ontology).with_class_index(class_index.as_deref());
                (slot, rule.apply(&ctx))
            });
        }

        // -- Barrier --

        while let Some(joined) = join_set.join_next().await {
            let (slot, result) = joined.map_err(|e| ReasonerError::task_join(e.to_string()))?;
            let inferences = result?;
            tracing::debug!(
                rule = %rules[slot].id(),
                candidates = inferences.len(),
                "rule completed"
            );
            debug_assert!(slots[slot].is_none(), "rule slot written twice");
            slots[slot] = Some(inferences);
        }

        let buffers: Vec<Vec<Inference>> = slots.into_iter().map(Option::unwrap_or_default).collect();
        let candidates: usize = buffers.iter().map(Vec::len).sum();

        // -- Dedup --

        let kinds = self.rules.produced_kinds();
        let dedup_ontology = Arc::clone(&ontology);
        let parent_span = tracing::Span::current();
        let outcome = tokio::task::spawn_blocking(move || {
            let _guard = parent_span.enter();
            dedup::deduplicate(&dedup_ontology, &kinds, buffers)
        })
        .await
        .map_err(|e| ReasonerError::task_join(format!("dedup task failed: {}", e)))?;

        tracing::debug!(
            explicit_duplicates = outcome.explicit_duplicates,
            cross_rule_duplicates = outcome.cross_rule_duplicates,
            "deduplicated inferences"
        );

        // -- Done --

        let mut diagnostics = ReasoningDiagnostics {
            iterations: 1,
            rules_evaluated: rules.len(),
            candidates,
            explicit_duplicates: outcome.explicit_duplicates,
            cross_rule_duplicates: outcome.cross_rule_duplicates,
            inferences: outcome.inferences.len(),
            duration: start.elapsed(),
            ..Default::default()
        };
        for (rule, survivors) in rules.iter().zip(&outcome.per_buffer) {
            diagnostics.record_rule_fired(rule.id().as_str(), *survivors);
        }

        tracing::info!(
            inferences = diagnostics.inferences,
            candidates,
            ms = diagnostics.duration.as_millis() as u64,
            "reasoning completed"
        );

        Ok(ReasoningResult::new(outcome.inferences, diagnostics))
    }
}
