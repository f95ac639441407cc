//! Collaborator failure modes
//!
//! Everything here is recoverable at the section level: collaborator
//! errors are caught per attempt and counted against the budget, render
//! errors are recorded in the manifest. Nothing in this module ever aborts
//! a run.

/// Failure while invoking a Maker or Checker
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    /// Call did not complete in time
    #[error("collaborator timed out after {0}s")]
    Timeout(u64),

    /// Transport-level failure (connection, quota, service error)
    #[error("collaborator transport failure: {0}")]
    Transport(String),

    /// Response arrived but was not usable as a payload
    #[error("malformed collaborator payload: {0}")]
    MalformedPayload(String),
}

/// Structurally invalid payload at a collaborator boundary
///
/// Distinct from `CollaboratorError`: the call succeeded, but the payload
/// does not decode into the expected shape. Counts as a spent attempt.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Payload does not match the expected schema
    #[error("payload does not decode as {expected}: {detail}")]
    Schema {
        expected: &'static str,
        detail: String,
    },

    /// Required field missing or empty
    #[error("payload missing required field {0}")]
    MissingField(&'static str),
}

/// Failure while rendering the assembled document
#[derive(Debug, thiserror::Error)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert!(CollaboratorError::Timeout(30).to_string().contains("30s"));
        let decode = DecodeError::Schema {
            expected: "SectionArtifact",
            detail: "missing content".into(),
        };
        assert!(decode.to_string().contains("SectionArtifact"));
    }
}
