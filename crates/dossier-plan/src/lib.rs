//! Dossier Plan - catalogs, validation, and dependency gating
//!
//! Builds the static dependency graph behind a run:
//! - Section catalogs per document type (built-in SIC set, YAML loading)
//! - Fail-fast plan validation (unique ids, declared deps, acyclicity)
//! - Petgraph-backed topological ordering
//! - The pure `DependencyGate` readiness check
//!
//! # Example
//!
//! ```rust
//! use dossier_plan::{PlanBuilder, SectionGraph};
//!
//! let plan = PlanBuilder::new().generate_plan("9", "SIC")?;
//! let order = SectionGraph::from_sections(&plan.sections)?.topological_sort()?;
//! assert_eq!(order.len(), plan.sections.len());
//! # Ok::<(), dossier_plan::ConfigurationError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod builder;
pub mod catalog;
pub mod error;
pub mod gate;
pub mod graph;

// Re-exports for convenience
pub use builder::PlanBuilder;
pub use catalog::{Catalog, SIC_CATALOG};
pub use error::ConfigurationError;
pub use gate::DependencyGate;
pub use graph::SectionGraph;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
