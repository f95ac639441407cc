//! Engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Policy for reconciling disagreeing predecessor facts
///
/// Swappable by configuration; applied by the pure `reconcile` function in
/// the engine whenever multiple sources supply the same fact key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Take the value from the last contributing source
    MostRecent,
    /// Equal-weight numeric average; falls back to most recent when any
    /// sample is non-numeric
    WeightedAverage,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        ReconcilePolicy::MostRecent
    }
}

/// Tunable parameters for one engine instance
///
/// The per-section acceptance threshold and the whole-plan threshold are
/// independent knobs; no relationship between them is assumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maker/Checker attempt pairs allowed per section
    pub attempt_budget: u32,
    /// A section is accepted when `approved` or score strictly above this
    pub accept_threshold: f64,
    /// The run is approved when complete and aggregate strictly above this
    pub global_threshold: f64,
    /// Character cap applied to checker input for cost bounding
    pub checker_content_cap: usize,
    /// Worker pool bound on concurrently executing sections
    pub max_concurrent_sections: usize,
    /// Optional run-level timeout; unfinished sections degrade to missing
    #[serde(default, with = "humantime_opt")]
    pub run_timeout: Option<Duration>,
    /// Fact reconciliation policy
    #[serde(default)]
    pub reconcile_policy: ReconcilePolicy,
}

impl EngineConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With attempt budget
    #[inline]
    #[must_use]
    pub fn with_attempt_budget(mut self, budget: u32) -> Self {
        self.attempt_budget = budget;
        self
    }

    /// With per-section acceptance threshold
    #[inline]
    #[must_use]
    pub fn with_accept_threshold(mut self, threshold: f64) -> Self {
        self.accept_threshold = threshold;
        self
    }

    /// With whole-plan approval threshold
    #[inline]
    #[must_use]
    pub fn with_global_threshold(mut self, threshold: f64) -> Self {
        self.global_threshold = threshold;
        self
    }

    /// With checker input cap in characters
    #[inline]
    #[must_use]
    pub fn with_checker_content_cap(mut self, cap: usize) -> Self {
        self.checker_content_cap = cap;
        self
    }

    /// With worker pool size
    #[inline]
    #[must_use]
    pub fn with_max_concurrent_sections(mut self, max: usize) -> Self {
        self.max_concurrent_sections = max.max(1);
        self
    }

    /// With run-level timeout
    #[inline]
    #[must_use]
    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = Some(timeout);
        self
    }

    /// With reconcile policy
    #[inline]
    #[must_use]
    pub fn with_reconcile_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.reconcile_policy = policy;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            attempt_budget: 2,
            accept_threshold: 85.0,
            global_threshold: 95.0,
            checker_content_cap: 10_000,
            max_concurrent_sections: 4,
            run_timeout: None,
            reconcile_policy: ReconcilePolicy::default(),
        }
    }
}

mod humantime_opt {
    //! Serialize optional durations as whole seconds
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub(super) fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_secs()).serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let config = EngineConfig::new();
        assert_eq!(config.attempt_budget, 2);
        assert_eq!(config.accept_threshold, 85.0);
        assert_eq!(config.global_threshold, 95.0);
        assert_eq!(config.checker_content_cap, 10_000);
        assert_eq!(config.reconcile_policy, ReconcilePolicy::MostRecent);
        assert!(config.run_timeout.is_none());
    }

    #[test]
    fn builders_compose() {
        let config = EngineConfig::new()
            .with_attempt_budget(3)
            .with_accept_threshold(70.0)
            .with_max_concurrent_sections(0)
            .with_run_timeout(Duration::from_secs(30));
        assert_eq!(config.attempt_budget, 3);
        assert_eq!(config.accept_threshold, 70.0);
        // A zero-size pool would deadlock the scheduler
        assert_eq!(config.max_concurrent_sections, 1);
        assert_eq!(config.run_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn timeout_serde_roundtrip() {
        let config = EngineConfig::new().with_run_timeout(Duration::from_secs(45));
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.run_timeout, Some(Duration::from_secs(45)));
    }
}
