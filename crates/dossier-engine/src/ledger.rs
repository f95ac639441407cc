//! Write-once section ledger
//!
//! The sole shared mutable resource of a run. The orchestrator is the only
//! writer; executors get the ledger purely to read terminal predecessor
//! states, and every read copies values out. A slot, once written, is
//! never rewritten; attempting to is an orchestrator defect.

use crate::error::AggregationError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use dossier_types::{SectionId, SectionState};
use std::collections::HashSet;

/// Terminal state slots for one run
#[derive(Debug, Default)]
pub struct SectionLedger {
    slots: DashMap<SectionId, SectionState>,
}

impl SectionLedger {
    /// Create an empty ledger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a section's terminal state exactly once
    ///
    /// An occupied slot is left untouched and the attempt is an error.
    pub fn record(
        &self,
        section_id: SectionId,
        state: SectionState,
    ) -> Result<(), AggregationError> {
        debug_assert!(state.status.is_terminal());
        match self.slots.entry(section_id) {
            Entry::Occupied(entry) => Err(AggregationError::SlotRewrite(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(state);
                Ok(())
            }
        }
    }

    /// Copy a section's terminal state out, if written
    #[must_use]
    pub fn get(&self, section_id: &SectionId) -> Option<SectionState> {
        self.slots.get(section_id).map(|entry| entry.value().clone())
    }

    /// Degrade an unwritten slot to `Missing`
    ///
    /// Used when a run-level timeout fires with sections still in flight;
    /// already-written slots are left untouched.
    pub fn fill_missing(&self, section_id: &SectionId) {
        self.slots
            .entry(section_id.clone())
            .or_insert_with(SectionState::missing);
    }

    /// Ids of all sections with a terminal state
    #[must_use]
    pub fn completed_ids(&self) -> HashSet<SectionId> {
        self.slots.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of written slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot has been written
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drain the ledger into an ordered map for the workflow result
    #[must_use]
    pub fn into_states(self) -> std::collections::BTreeMap<SectionId, SectionState> {
        self.slots.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_types::{QualityReport, SectionArtifact};

    fn accepted(id: &str) -> SectionState {
        SectionState::accepted(
            SectionArtifact::new(id, "body"),
            QualityReport::new(90.0, true),
        )
    }

    #[test]
    fn slots_are_write_once() {
        let ledger = SectionLedger::new();
        ledger.record(SectionId::new("A"), accepted("A")).unwrap();
        let err = ledger
            .record(SectionId::new("A"), SectionState::missing())
            .unwrap_err();
        assert!(matches!(err, AggregationError::SlotRewrite(_)));
        assert_eq!(ledger.len(), 1);
        // The rejected write left the original state in place
        let state = ledger.get(&SectionId::new("A")).unwrap();
        assert_eq!(state.status, dossier_types::SectionStatus::Accepted);
    }

    #[test]
    fn reads_copy_values_out() {
        let ledger = SectionLedger::new();
        ledger.record(SectionId::new("A"), accepted("A")).unwrap();
        let first = ledger.get(&SectionId::new("A")).unwrap();
        let second = ledger.get(&SectionId::new("A")).unwrap();
        assert_eq!(first, second);
        assert!(ledger.get(&SectionId::new("B")).is_none());
    }

    #[test]
    fn completed_ids_tracks_written_slots() {
        let ledger = SectionLedger::new();
        assert!(ledger.completed_ids().is_empty());
        ledger.record(SectionId::new("A"), accepted("A")).unwrap();
        ledger
            .record(SectionId::new("B"), SectionState::missing())
            .unwrap();
        let ids = ledger.completed_ids();
        assert!(ids.contains(&SectionId::new("A")));
        assert!(ids.contains(&SectionId::new("B")));
    }
}
