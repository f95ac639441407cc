//! Checkpoint store for idempotent resume
//!
//! One record per `(project_id, section_id)` holding a terminal section
//! state. The orchestrator consults the store before executing a section
//! and persists every terminal outcome, so an interrupted run resumes
//! without repeating collaborator calls. A store failure is logged and
//! treated as a cache miss; checkpointing never degrades a run.

use dashmap::DashMap;
use dossier_types::{SectionId, SectionState};

/// Storage of terminal section states keyed by project and section
#[async_trait::async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Load a previously persisted terminal state
    async fn load(
        &self,
        project_id: &str,
        section_id: &SectionId,
    ) -> Result<Option<SectionState>, CheckpointError>;

    /// Persist a terminal state; overwriting the same key is idempotent
    async fn save(
        &self,
        project_id: &str,
        section_id: &SectionId,
        state: &SectionState,
    ) -> Result<(), CheckpointError>;
}

/// Checkpoint backend failure
#[derive(Debug, thiserror::Error)]
#[error("checkpoint store failure: {0}")]
pub struct CheckpointError(pub String);

/// In-memory checkpoint store
///
/// Suitable for tests and single-process deployments; durable backends
/// implement the same trait externally.
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    records: DashMap<(String, SectionId), SectionState>,
}

impl MemoryCheckpointStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn load(
        &self,
        project_id: &str,
        section_id: &SectionId,
    ) -> Result<Option<SectionState>, CheckpointError> {
        Ok(self
            .records
            .get(&(project_id.to_string(), section_id.clone()))
            .map(|entry| entry.value().clone()))
    }

    async fn save(
        &self,
        project_id: &str,
        section_id: &SectionId,
        state: &SectionState,
    ) -> Result<(), CheckpointError> {
        self.records
            .insert((project_id.to_string(), section_id.clone()), state.clone());
        Ok(())
    }
}
