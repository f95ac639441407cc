//! Engine error types
//!
//! Only two things can abort a run: a malformed catalog (surfaced before
//! any collaborator call) and an orchestrator invariant violation, which
//! indicates a defect in the scheduler itself. Collaborator and render
//! failures never appear here; they are absorbed lower down.

use dossier_plan::ConfigurationError;
use dossier_types::SectionId;

/// Fatal run failure
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed or cyclic catalog; raised before execution starts
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Scheduler invariant violated; an orchestrator defect
    #[error("aggregation error: {0}")]
    Aggregation(#[from] AggregationError),
}

/// Orchestrator invariant violation
///
/// Guarded by runtime checks; must never occur in a correct
/// implementation.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    /// A terminal slot was written twice
    #[error("slot for section {0} was already written")]
    SlotRewrite(SectionId),

    /// Dependency gate failed for a section a valid order already admitted
    #[error("dependency gate rejected {0} after a valid topological sort")]
    GateViolation(SectionId),

    /// No section is ready but the plan is unfinished
    #[error("scheduler stalled with {remaining} sections unfinished")]
    Stalled { remaining: usize },

    /// A section task panicked or was aborted
    #[error("section task failed: {0}")]
    TaskFailure(String),
}
