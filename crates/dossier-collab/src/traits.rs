//! Collaborator traits
//!
//! The seams to external reasoning and rendering services. Implementations
//! are shared, rate-limited resources; the engine bounds concurrent
//! in-flight calls with its worker pool and treats every failure here as
//! recoverable at the section level.

use crate::error::{CollaboratorError, RenderError};
use crate::request::{CheckerRequest, MakerRequest};
use serde_json::Value;

/// Drafts section content
///
/// Returns an untyped payload; the engine runs the validated decode step
/// and treats a structurally invalid payload as a spent attempt.
#[async_trait::async_trait]
pub trait Maker: Send + Sync {
    /// Produce a candidate artifact payload for one section
    async fn draft(&self, request: &MakerRequest) -> Result<Value, CollaboratorError>;
}

/// Critiques a candidate and emits a quality report payload
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    /// Review capped candidate content
    async fn review(&self, request: &CheckerRequest) -> Result<Value, CollaboratorError>;
}

/// Renders the assembled document to external storage
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    /// Render the document; returns the storage location
    async fn render(&self, document: &str, filename: &str) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoMaker;

    #[async_trait::async_trait]
    impl Maker for EchoMaker {
        async fn draft(&self, request: &MakerRequest) -> Result<Value, CollaboratorError> {
            Ok(json!({
                "section_id": request.section_id,
                "content": format!("# {}", request.title),
            }))
        }
    }

    #[tokio::test]
    async fn traits_are_object_safe() {
        let maker: Box<dyn Maker> = Box::new(EchoMaker);
        let spec = dossier_types::SectionSpec::new(
            "SIC_02",
            "Business Case",
            dossier_types::Phase::Justification,
        );
        let payload = maker
            .draft(&MakerRequest::from_spec("9", &spec))
            .await
            .unwrap();
        assert_eq!(payload["content"], "# Business Case");
    }
}
