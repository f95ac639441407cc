//! Section execution state
//!
//! A section's slot is created when its turn in the schedule begins and is
//! written exactly once with a terminal state. Terminal slots are never
//! mutated afterward, which is what makes concurrent reads by dependent
//! sections safe.

use crate::report::QualityReport;
use crate::section::SectionArtifact;
use serde::{Deserialize, Serialize};

/// Lifecycle status of one section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// Not yet scheduled
    Pending,
    /// Maker is producing a candidate
    Drafting,
    /// Checker is reviewing the candidate
    Critiquing,
    /// Accepted within the attempt budget
    Accepted,
    /// Budget spent without acceptance; best-effort artifact retained
    Exhausted,
    /// No attempt ever produced a valid artifact
    Missing,
}

impl SectionStatus {
    /// Whether no further attempts will occur for this section
    ///
    /// All three terminal states count as "terminal enough to read from"
    /// for dependents; `Missing` simply supplies no facts.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SectionStatus::Accepted | SectionStatus::Exhausted | SectionStatus::Missing
        )
    }
}

impl std::fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SectionStatus::Pending => "pending",
            SectionStatus::Drafting => "drafting",
            SectionStatus::Critiquing => "critiquing",
            SectionStatus::Accepted => "accepted",
            SectionStatus::Exhausted => "exhausted",
            SectionStatus::Missing => "missing",
        };
        write!(f, "{label}")
    }
}

/// Terminal record for one section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionState {
    /// Terminal status
    pub status: SectionStatus,
    /// Last produced artifact, if any attempt yielded one
    pub artifact: Option<SectionArtifact>,
    /// Last quality report (sentinel for `Missing`)
    pub report: Option<QualityReport>,
}

impl SectionState {
    /// Accepted within budget
    #[inline]
    #[must_use]
    pub fn accepted(artifact: SectionArtifact, report: QualityReport) -> Self {
        Self {
            status: SectionStatus::Accepted,
            artifact: Some(artifact),
            report: Some(report),
        }
    }

    /// Budget exhausted; retain the best-effort candidate and critique
    #[inline]
    #[must_use]
    pub fn exhausted(artifact: SectionArtifact, report: QualityReport) -> Self {
        Self {
            status: SectionStatus::Exhausted,
            artifact: Some(artifact),
            report: Some(report),
        }
    }

    /// No valid artifact was ever produced
    #[inline]
    #[must_use]
    pub fn missing() -> Self {
        Self {
            status: SectionStatus::Missing,
            artifact: None,
            report: Some(QualityReport::missing_sentinel()),
        }
    }

    /// Retained score for aggregation (`Missing` contributes 0)
    #[inline]
    #[must_use]
    pub fn score(&self) -> f64 {
        self.report.as_ref().map_or(0.0, |r| r.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(SectionStatus::Accepted.is_terminal());
        assert!(SectionStatus::Exhausted.is_terminal());
        assert!(SectionStatus::Missing.is_terminal());
        assert!(!SectionStatus::Pending.is_terminal());
        assert!(!SectionStatus::Drafting.is_terminal());
        assert!(!SectionStatus::Critiquing.is_terminal());
    }

    #[test]
    fn missing_state_is_distinguishable_from_exhausted() {
        let missing = SectionState::missing();
        let exhausted = SectionState::exhausted(
            SectionArtifact::new("SIC_05", "draft"),
            QualityReport::new(40.0, false),
        );

        assert_eq!(missing.status, SectionStatus::Missing);
        assert!(missing.artifact.is_none());
        assert_eq!(missing.score(), 0.0);

        assert_eq!(exhausted.status, SectionStatus::Exhausted);
        assert!(exhausted.artifact.is_some());
        assert_eq!(exhausted.score(), 40.0);
    }
}
