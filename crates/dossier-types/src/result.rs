//! Terminal run output: workflow results and the rendering manifest

use crate::section::SectionId;
use crate::state::{SectionState, SectionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ulid::Ulid;

/// Unique run identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub Ulid);

impl RunId {
    /// Generate a new run id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of handing the assembled document to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// Rendered successfully; storage path returned by the renderer
    Rendered {
        /// Location reported by the rendering collaborator
        path: String,
    },
    /// Renderer failed; never invalidates the workflow result
    RenderFailed {
        /// Failure description
        reason: String,
    },
    /// No renderer was configured for the run
    NotRendered,
}

/// Per-section manifest entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Terminal status of the section
    pub status: SectionStatus,
    /// Retained quality score
    pub score: f64,
}

/// Status manifest for one assembled document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// One entry per section, keyed and ordered by section id
    pub sections: BTreeMap<SectionId, ManifestEntry>,
    /// Hex sha256 digest of the assembled document text
    pub document_digest: String,
    /// Result of the rendering hand-off
    pub render: RenderOutcome,
}

/// Terminal, immutable output of a run
///
/// Always produced unless plan validation fails; a degraded run simply
/// carries partial completeness and a lower aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// Run identifier
    pub run_id: RunId,
    /// Project the run belongs to
    pub project_id: String,
    /// Document type that selected the catalog
    pub document_type: String,
    /// Run start time
    pub started_at: DateTime<Utc>,
    /// Run completion time
    pub finished_at: DateTime<Utc>,
    /// Terminal state per section
    pub states: BTreeMap<SectionId, SectionState>,
    /// Mean of per-section scores; `Missing` contributes 0
    pub aggregate_score: f64,
    /// Whether every section produced a valid artifact
    pub completeness: bool,
    /// Completeness and aggregate score above the global threshold
    pub global_approved: bool,
    /// Assembled document text in canonical catalog order
    pub document: String,
    /// Status manifest including the render outcome
    pub manifest: RunManifest,
}

impl WorkflowResult {
    /// Count of sections that produced a valid artifact
    #[must_use]
    pub fn sections_generated(&self) -> usize {
        self.states
            .values()
            .filter(|s| s.status != SectionStatus::Missing)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_ids_are_unique_and_sortable() {
        let a = RunId::new();
        let b = RunId::new();
        assert_ne!(a, b);
        assert!(a.to_string().len() == 26);
    }

    #[test]
    fn render_outcome_serde_is_tagged() {
        let rendered = RenderOutcome::Rendered {
            path: "output_pdfs/doc.pdf".into(),
        };
        let json = serde_json::to_string(&rendered).unwrap();
        assert!(json.contains(r#""outcome":"rendered""#));
        let back: RenderOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rendered);
    }

    #[test]
    fn sections_generated_excludes_missing() {
        let mut states = BTreeMap::new();
        states.insert(SectionId::new("A"), SectionState::missing());
        states.insert(
            SectionId::new("B"),
            SectionState::accepted(
                crate::section::SectionArtifact::new("B", "body"),
                crate::report::QualityReport::new(90.0, true),
            ),
        );
        let result = WorkflowResult {
            run_id: RunId::new(),
            project_id: "9".into(),
            document_type: "SIC".into(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            states,
            aggregate_score: 45.0,
            completeness: false,
            global_approved: false,
            document: String::new(),
            manifest: RunManifest {
                sections: BTreeMap::new(),
                document_digest: String::new(),
                render: RenderOutcome::NotRendered,
            },
        };
        assert_eq!(result.sections_generated(), 1);
    }
}
