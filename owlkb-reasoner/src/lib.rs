//! # owlkb reasoner
//!
//! SWRL-style rule engine for owlkb ontologies.
//!
//! This crate provides:
//! - Atoms over classes, properties, (in)equality and annotations
//! - Comparison, math, string and language built-ins that filter bindings
//! - Hash-joined binding tables for antecedent evaluation
//! - A concurrent single-pass reasoner with deduplication against stored
//!   axioms and across rules
//! - An opt-in fixpoint driver with time/iteration/inference budgets
//! - LRU caching of reasoning results
//!
//! ## Key Types
//!
//! - [`Atom`], [`BuiltIn`]: the rule language
//! - [`Rule`], [`RuleSet`]: immutable rules, unique by identifier
//! - [`Reasoner`]: fan-out/barrier/dedup execution over a rule set
//! - [`ReasoningCache`]: results keyed by axiom set, rule set and budget
//!
//! ## Example
//!
//! ```ignore
//! use owlkb_reasoner::{Argument, Atom, Reasoner, Rule, RuleSet};
//!
//! let rule = Rule::builder("ex:wizardsArePeople")
//!     .antecedent(vec![Atom::class("ex:Wizard", Argument::variable("W"))])
//!     .consequent(vec![Atom::class("ex:Person", Argument::variable("W"))])
//!     .build()?;
//!
//! let reasoner = Reasoner::new(RuleSet::new().with_rule(rule));
//! let result = reasoner.apply_to_ontology(Arc::new(ontology)).await?;
//! for inference in &result.inferences {
//!     println!("{}", inference);
//! }
//! ```

pub mod antecedent;
pub mod atom;
pub mod binding;
pub mod builtin;
pub mod cache;
pub mod class_index;
pub mod consequent;
mod dedup;
pub mod error;
mod fixpoint;
pub mod inference;
pub mod reasoner;
pub mod rule;

// Re-exports for convenience
pub use antecedent::Antecedent;
pub use atom::{Argument, Atom, AtomKind, EvalContext};
pub use binding::{BindingRow, BindingTable, Variable};
pub use builtin::{compare_terms, BuiltIn, BuiltInFamily, BuiltInKind, CaseSensitivity};
pub use cache::{
    ReasoningBudget, ReasoningCache, ReasoningCacheKey, ReasoningDiagnostics, ReasoningResult,
};
pub use class_index::ClassMembershipIndex;
pub use consequent::Consequent;
pub use error::{ReasonerError, Result};
pub use inference::Inference;
pub use reasoner::Reasoner;
pub use rule::{Rule, RuleBuilder, RuleSet};

use std::num::NonZeroUsize;

/// Options for rule application
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReasonerOptions {
    /// Max rule tasks running at once
    pub max_concurrency: usize,
    /// Precompute individuals-of-class for class atoms before fan-out
    pub use_class_cache: bool,
    /// Caps for [`Reasoner::apply_until_fixpoint`]; single passes ignore it
    pub budget: ReasoningBudget,
}

impl Default for ReasonerOptions {
    fn default() -> Self {
        Self {
            max_concurrency: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(4),
            use_class_cache: true,
            budget: ReasoningBudget::default(),
        }
    }
}

impl ReasonerOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_class_cache(mut self, enabled: bool) -> Self {
        self.use_class_cache = enabled;
        self
    }

    pub fn with_budget(mut self, budget: ReasoningBudget) -> Self {
        self.budget = budget;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reasoner_options_default() {
        let opts = ReasonerOptions::default();
        assert!(opts.max_concurrency >= 1);
        assert!(opts.use_class_cache);
    }

    #[test]
    fn test_reasoner_options_builders() {
        let opts = ReasonerOptions::new()
            .with_max_concurrency(0)
            .with_class_cache(false)
            .with_budget(ReasoningBudget::unlimited());
        assert_eq!(opts.max_concurrency, 1);
        assert!(!opts.use_class_cache);
        assert_eq!(opts.budget, ReasoningBudget::unlimited());
    }
}
