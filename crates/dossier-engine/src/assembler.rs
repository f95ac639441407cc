//! Result assembler
//!
//! Concatenates terminal section content into one deliverable in canonical
//! catalog order (not execution order), builds the status manifest, and
//! hands the text to the rendering collaborator. Rendering failures are
//! recorded in the manifest and never invalidate the result. Assembly is
//! deterministic: the same inputs produce byte-identical text and
//! manifest.

use crate::ledger::SectionLedger;
use dossier_collab::Renderer;
use dossier_types::{DocumentPlan, ManifestEntry, RenderOutcome, RunManifest, SectionStatus};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Assembles the final document and manifest
pub struct ResultAssembler {
    renderer: Option<Arc<dyn Renderer>>,
}

impl ResultAssembler {
    /// Assembler without a renderer; manifests record `NotRendered`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { renderer: None }
    }

    /// Assembler that hands the document to a rendering collaborator
    #[inline]
    #[must_use]
    pub fn with_renderer(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            renderer: Some(renderer),
        }
    }

    /// Pure assembly: document text plus manifest, no rendering
    #[must_use]
    pub fn assemble(&self, plan: &DocumentPlan, ledger: &SectionLedger) -> (String, RunManifest) {
        let mut parts = Vec::with_capacity(plan.sections.len());
        let mut sections = BTreeMap::new();

        for spec in &plan.sections {
            let state = ledger.get(&spec.id);
            let (status, score) = state
                .as_ref()
                .map_or((SectionStatus::Missing, 0.0), |s| (s.status, s.score()));
            sections.insert(spec.id.clone(), ManifestEntry { status, score });

            let Some(artifact) = state.and_then(|s| s.artifact) else {
                continue;
            };
            let mut part = format!("# {}: {}\n\n{}", spec.id, spec.title, artifact.content);
            if !artifact.key_tables.is_empty() {
                part.push_str("\n\n");
                part.push_str(&artifact.key_tables);
            }
            parts.push(part);
        }

        let document = parts.join("\n\n");
        let manifest = RunManifest {
            sections,
            document_digest: hex::encode(Sha256::digest(document.as_bytes())),
            render: RenderOutcome::NotRendered,
        };
        (document, manifest)
    }

    /// Assemble and hand the document to the renderer
    ///
    /// The render outcome is recorded in the manifest; failure is
    /// non-fatal.
    pub async fn assemble_and_render(
        &self,
        plan: &DocumentPlan,
        ledger: &SectionLedger,
        filename: &str,
    ) -> (String, RunManifest) {
        let (document, mut manifest) = self.assemble(plan, ledger);

        if let Some(renderer) = &self.renderer {
            manifest.render = match renderer.render(&document, filename).await {
                Ok(path) => {
                    tracing::info!(path, "document rendered");
                    RenderOutcome::Rendered { path }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "rendering failed; result remains valid");
                    RenderOutcome::RenderFailed {
                        reason: e.to_string(),
                    }
                }
            };
        }
        (document, manifest)
    }
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new()
    }
}
