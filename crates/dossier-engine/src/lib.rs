//! Dossier Engine - dependency-ordered document assembly
//!
//! The runtime half of the system:
//! - Per-section Maker/Checker convergence loop with a bounded budget
//! - Wave scheduling of independent sections over a worker pool
//! - Write-once section ledger and cross-section fact propagation
//! - Result assembly, quality gating, and the rendering hand-off
//! - Checkpoint-based idempotent resume
//!
//! # Example
//!
//! ```rust,ignore
//! use dossier_engine::{StubChecker, StubMaker, WorkflowOrchestrator};
//! use dossier_plan::PlanBuilder;
//! use dossier_types::EngineConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = WorkflowOrchestrator::new(
//!     PlanBuilder::new(),
//!     Arc::new(StubMaker),
//!     Arc::new(StubChecker::default()),
//!     EngineConfig::default(),
//! );
//!
//! let result = orchestrator.run("9", "SIC").await?;
//! println!("generated {} sections", result.sections_generated());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod assembler;
pub mod checkpoint;
pub mod error;
pub mod executor;
pub mod ledger;
pub mod orchestrator;
pub mod propagation;
pub mod stub;

// Re-exports for convenience
pub use assembler::ResultAssembler;
pub use checkpoint::{CheckpointError, CheckpointStore, MemoryCheckpointStore};
pub use error::{AggregationError, EngineError};
pub use executor::{SectionExecutor, SectionOutcome};
pub use ledger::SectionLedger;
pub use orchestrator::WorkflowOrchestrator;
pub use propagation::{reconcile, resolve_facts, FactSample};
pub use stub::{NullCheckpointStore, NullRenderer, StubChecker, StubMaker};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the engine
    pub use crate::{
        CheckpointStore, EngineError, MemoryCheckpointStore, ResultAssembler, SectionExecutor,
        SectionLedger, WorkflowOrchestrator,
    };
    pub use dossier_plan::{DependencyGate, PlanBuilder};
    pub use dossier_types::{EngineConfig, ReconcilePolicy, WorkflowResult};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
