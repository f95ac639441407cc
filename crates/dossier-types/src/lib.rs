//! Dossier Types - core data model
//!
//! The shared vocabulary of the assembly engine:
//! - Section identity, specs, and artifacts
//! - Checker quality reports
//! - Terminal section states
//! - Plans and propagation rules
//! - Workflow results and manifests
//! - Engine configuration
//!
//! # Example
//!
//! ```rust
//! use dossier_types::{Phase, SectionSpec};
//!
//! let spec = SectionSpec::new("SIC_16", "Capital Costs", Phase::Costs)
//!     .with_dependencies(["SIC_11", "SIC_03"]);
//! assert_eq!(spec.dependency_ids.len(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod plan;
pub mod report;
pub mod result;
pub mod section;
pub mod state;

// Re-exports for convenience
pub use config::{EngineConfig, ReconcilePolicy};
pub use plan::{DocumentPlan, PropagationRule};
pub use report::QualityReport;
pub use result::{ManifestEntry, RenderOutcome, RunId, RunManifest, WorkflowResult};
pub use section::{KeyValue, Phase, SectionArtifact, SectionId, SectionSpec};
pub use state::{SectionState, SectionStatus};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with dossier types
    pub use crate::{
        DocumentPlan, EngineConfig, KeyValue, Phase, PropagationRule, QualityReport,
        ReconcilePolicy, SectionArtifact, SectionId, SectionSpec, SectionState, SectionStatus,
        WorkflowResult,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
