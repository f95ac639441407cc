//! Checker quality reports

use serde::{Deserialize, Serialize};

/// Critique emitted by the Checker for one candidate artifact
///
/// `score` is always within `[0, 100]`; constructors clamp out-of-range
/// values rather than erroring, matching the boundary decode behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Technical quality score, 0..=100
    pub score: f64,
    /// Whether the checker approved the candidate outright
    pub approved: bool,
    /// Causal analysis of the dominant defect
    #[serde(default)]
    pub root_cause: String,
    /// Recommendation carried verbatim into the next attempt
    #[serde(default)]
    pub actionable_recommendation: String,
    /// Critical gaps that block approval
    #[serde(default)]
    pub critical_gaps: Vec<String>,
    /// Regulatory compliance verdict
    #[serde(default)]
    pub regulatory_compliance: bool,
}

impl QualityReport {
    /// Create a report with a clamped score
    #[inline]
    #[must_use]
    pub fn new(score: f64, approved: bool) -> Self {
        Self {
            score: score.clamp(0.0, 100.0),
            approved,
            root_cause: String::new(),
            actionable_recommendation: String::new(),
            critical_gaps: Vec::new(),
            regulatory_compliance: false,
        }
    }

    /// With root cause analysis
    #[inline]
    #[must_use]
    pub fn with_root_cause(mut self, root_cause: impl Into<String>) -> Self {
        self.root_cause = root_cause.into();
        self
    }

    /// With an actionable recommendation
    #[inline]
    #[must_use]
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.actionable_recommendation = recommendation.into();
        self
    }

    /// With critical gaps
    #[inline]
    #[must_use]
    pub fn with_critical_gaps(mut self, gaps: Vec<String>) -> Self {
        self.critical_gaps = gaps;
        self
    }

    /// Mark regulatory compliance
    #[inline]
    #[must_use]
    pub fn compliant(mut self) -> Self {
        self.regulatory_compliance = true;
        self
    }

    /// Zero-score sentinel for sections where no attempt ever produced a
    /// valid artifact
    ///
    /// Distinguishable from an exhausted section, which retains the last
    /// real checker report.
    #[must_use]
    pub fn missing_sentinel() -> Self {
        Self::new(0.0, false).with_root_cause("no valid draft was ever produced")
    }

    /// Normalize an externally-supplied score into range
    #[inline]
    pub fn clamp_score(&mut self) {
        self.score = self.score.clamp(0.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn score_is_clamped_on_construction() {
        assert_eq!(QualityReport::new(150.0, true).score, 100.0);
        assert_eq!(QualityReport::new(-3.0, false).score, 0.0);
        assert_eq!(QualityReport::new(40.0, false).score, 40.0);
    }

    #[test]
    fn missing_sentinel_scores_zero_and_is_unapproved() {
        let sentinel = QualityReport::missing_sentinel();
        assert_eq!(sentinel.score, 0.0);
        assert!(!sentinel.approved);
        assert!(!sentinel.root_cause.is_empty());
    }

    #[test]
    fn optional_fields_default_on_deserialize() {
        let report: QualityReport =
            serde_json::from_str(r#"{"score": 88.0, "approved": true}"#).unwrap();
        assert_eq!(report.score, 88.0);
        assert!(report.critical_gaps.is_empty());
        assert!(!report.regulatory_compliance);
    }
}
