//! Opt-in fixpoint iteration
//!
//! Runs single passes until one derives nothing new or the budget is
//! exhausted. Each pass sees the inferences of all earlier passes; the
//! caller's ontology is never modified.

use owlkb_core::Ontology;
use std::sync::Arc;
use std::time::Instant;

use crate::cache::{ReasoningDiagnostics, ReasoningResult};
use crate::error::Result;
use crate::reasoner::Reasoner;

/// Iterate `reasoner` to a fixpoint over a private copy of `ontology`, within
/// the budget of the reasoner's options
pub(crate) async fn run_fixpoint(
    reasoner: &Reasoner,
    ontology: Arc<Ontology>,
) -> Result<ReasoningResult> {
    let budget = &reasoner.options().budget;
    let start = Instant::now();
    let mut working = ontology;
    let mut inferences = Vec::new();
    let mut diagnostics = ReasoningDiagnostics::default();

    loop {
        // Check budget
        let cap = if diagnostics.iterations >= budget.max_iterations {
            Some("iterations")
        } else if start.elapsed() > budget.max_duration {
            Some("time")
        } else if inferences.len() >= budget.max_inferences {
            Some("inferences")
        } else {
            None
        };
        if let Some(reason) = cap {
            tracing::info!(
                iterations = diagnostics.iterations,
                inferences = inferences.len(),
                reason,
                "fixpoint capped by budget"
            );
            diagnostics = diagnostics.capped(reason);
            break;
        }

        let pass = reasoner.apply_to_ontology(Arc::clone(&working)).await?;
        diagnostics.absorb(&pass.diagnostics);
        if pass.is_empty() {
            break;
        }

        // Rule tasks have released their handles, so this only copies the
        // caller's ontology on the first pass
        let added = Arc::make_mut(&mut working)
            .extend_with_inferences(pass.inferences.iter().map(|i| i.axiom.clone()));
        tracing::info!(
            iteration = diagnostics.iterations,
            added,
            total = inferences.len() + pass.len(),
            "fixpoint iteration"
        );
        inferences.extend(pass.inferences);
    }

    diagnostics.inferences = inferences.len();
    diagnostics.duration = start.elapsed();
    Ok(ReasoningResult::new(inferences, diagnostics))
}
