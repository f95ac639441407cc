//! Dependency gate
//!
//! Pure precondition check: may a section run given what is already
//! terminal. Exposed standalone so callers can probe readiness without
//! executing anything.

use dossier_types::{DocumentPlan, SectionId, SectionSpec};
use std::collections::HashSet;

/// Readiness check over declared dependencies
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyGate;

impl DependencyGate {
    /// True iff every declared dependency of `spec` is in `completed`
    ///
    /// O(|deps|); `completed` holds ids of sections in a terminal state.
    #[must_use]
    pub fn can_execute(spec: &SectionSpec, completed: &HashSet<SectionId>) -> bool {
        spec.dependency_ids.iter().all(|dep| completed.contains(dep))
    }

    /// Plan-level variant by section id
    ///
    /// Unknown ids are never executable.
    #[must_use]
    pub fn can_execute_in(
        plan: &DocumentPlan,
        section_id: &SectionId,
        completed: &HashSet<SectionId>,
    ) -> bool {
        match plan.section(section_id) {
            Some(spec) => Self::can_execute(spec, completed),
            None => {
                tracing::warn!(%section_id, "readiness probe for unknown section");
                false
            }
        }
    }
}
