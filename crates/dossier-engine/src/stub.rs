//! Deterministic stub collaborators
//!
//! Used by the `dossier run` dry-run mode and as a smoke-test harness:
//! drafts are synthesized from the request alone, every critique approves,
//! and rendering is skipped. No network, no nondeterminism.

use crate::checkpoint::{CheckpointError, CheckpointStore};
use dossier_collab::{
    Checker, CheckerRequest, CollaboratorError, Maker, MakerRequest, RenderError, Renderer,
};
use dossier_types::{SectionId, SectionState};
use serde_json::{json, Value};

/// Maker that synthesizes a draft from the request fields
#[derive(Debug, Default)]
pub struct StubMaker;

#[async_trait::async_trait]
impl Maker for StubMaker {
    async fn draft(&self, request: &MakerRequest) -> Result<Value, CollaboratorError> {
        let mut content = format!(
            "Draft for {} ({}) of project {}.",
            request.title, request.section_id, request.project_id
        );
        for (key, value) in &request.propagated_facts {
            content.push_str(&format!("\n{key}: {value}"));
        }
        if let Some(prior) = &request.prior_recommendation {
            content.push_str(&format!("\nRevised per: {prior}"));
        }
        let metadata: Vec<Value> = request
            .propagated_facts
            .iter()
            .map(|(key, value)| json!({ "key": key, "value": value }))
            .collect();
        Ok(json!({
            "section_id": request.section_id,
            "metadata": metadata,
            "key_tables": "",
            "content": content,
        }))
    }
}

/// Checker that approves everything with a fixed score
#[derive(Debug)]
pub struct StubChecker {
    score: f64,
}

impl StubChecker {
    /// Checker approving with the given score
    #[inline]
    #[must_use]
    pub fn new(score: f64) -> Self {
        Self { score }
    }
}

impl Default for StubChecker {
    fn default() -> Self {
        Self::new(96.0)
    }
}

#[async_trait::async_trait]
impl Checker for StubChecker {
    async fn review(&self, request: &CheckerRequest) -> Result<Value, CollaboratorError> {
        tracing::debug!(
            section = %request.section_id,
            chars = request.content.chars().count(),
            "stub review"
        );
        Ok(json!({
            "score": self.score,
            "approved": true,
            "root_cause": "",
            "actionable_recommendation": "",
            "critical_gaps": [],
            "regulatory_compliance": true,
        }))
    }
}

/// Renderer that acknowledges without producing anything
#[derive(Debug, Default)]
pub struct NullRenderer;

#[async_trait::async_trait]
impl Renderer for NullRenderer {
    async fn render(&self, _document: &str, filename: &str) -> Result<String, RenderError> {
        Ok(format!("null://{filename}"))
    }
}

/// Checkpoint store that persists nothing
///
/// Loads always miss and saves always succeed; useful when resume
/// semantics must be disabled without changing call sites.
#[derive(Debug, Default)]
pub struct NullCheckpointStore;

#[async_trait::async_trait]
impl CheckpointStore for NullCheckpointStore {
    async fn load(
        &self,
        _project_id: &str,
        _section_id: &SectionId,
    ) -> Result<Option<SectionState>, CheckpointError> {
        Ok(None)
    }

    async fn save(
        &self,
        _project_id: &str,
        _section_id: &SectionId,
        _state: &SectionState,
    ) -> Result<(), CheckpointError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_collab::decode;
    use dossier_types::{Phase, SectionSpec};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn stub_draft_decodes_and_echoes_facts() {
        let spec = SectionSpec::new("SIC_16", "Capital Costs", Phase::Costs);
        let mut facts = BTreeMap::new();
        facts.insert("ETP".to_string(), "12.5".to_string());
        let request = MakerRequest::from_spec("9", &spec).with_facts(facts);

        let payload = StubMaker.draft(&request).await.unwrap();
        let artifact = decode::artifact(payload).unwrap();
        assert_eq!(artifact.section_id, SectionId::new("SIC_16"));
        assert!(artifact.content.contains("ETP: 12.5"));
        assert_eq!(artifact.metadata_value("etp"), Some("12.5"));
    }

    #[tokio::test]
    async fn stub_review_decodes_as_approved() {
        let request = CheckerRequest::new("SIC_02", "body");
        let payload = StubChecker::default().review(&request).await.unwrap();
        let report = decode::report(payload).unwrap();
        assert!(report.approved);
        assert_eq!(report.score, 96.0);
    }
}
