//! Cross-section fact propagation
//!
//! Resolves the facts a section's maker request must carry: each
//! propagation rule targeting the section reads one named fact from a
//! completed predecessor's artifact metadata, by value. When several
//! sources supply the same fact key, a pure reconcile step with an
//! explicit policy picks the final value.

use crate::ledger::SectionLedger;
use dossier_types::{PropagationRule, ReconcilePolicy, SectionId, SectionSpec};
use std::collections::BTreeMap;

/// One candidate value for a fact, with its contributing section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactSample {
    /// Propagated value, verbatim from the source metadata
    pub value: String,
    /// Section that supplied it
    pub source: SectionId,
}

/// Reconcile disagreeing samples for one fact key
///
/// Pure function; `MostRecent` takes the last contributing source in rule
/// declaration order, `WeightedAverage` averages numeric samples with
/// equal weights and falls back to most recent when any sample is
/// non-numeric.
#[must_use]
pub fn reconcile(samples: &[FactSample], policy: ReconcilePolicy) -> Option<String> {
    let last = samples.last()?;
    if samples.len() == 1 {
        return Some(last.value.clone());
    }
    match policy {
        ReconcilePolicy::MostRecent => Some(last.value.clone()),
        ReconcilePolicy::WeightedAverage => {
            let parsed: Option<Vec<f64>> = samples
                .iter()
                .map(|s| s.value.trim().parse::<f64>().ok())
                .collect();
            match parsed {
                Some(values) => {
                    let mean = values.iter().sum::<f64>() / values.len() as f64;
                    Some(format!("{mean}"))
                }
                None => Some(last.value.clone()),
            }
        }
    }
}

/// Resolve the propagated facts for one section
///
/// Reads each rule's source slot from the ledger; sources that are not yet
/// written or reached `Missing` contribute nothing. Values are copied out,
/// never referenced.
#[must_use]
pub fn resolve_facts(
    spec: &SectionSpec,
    rules: &[PropagationRule],
    ledger: &SectionLedger,
    policy: ReconcilePolicy,
) -> BTreeMap<String, String> {
    let mut samples: BTreeMap<String, Vec<FactSample>> = BTreeMap::new();

    for rule in rules.iter().filter(|r| r.target == spec.id) {
        let Some(state) = ledger.get(&rule.source) else {
            tracing::debug!(target_section = %spec.id, source = %rule.source, "fact source not terminal yet");
            continue;
        };
        let Some(artifact) = state.artifact else {
            // Missing sources supply empty facts to dependents
            tracing::debug!(target_section = %spec.id, source = %rule.source, "fact source has no artifact");
            continue;
        };
        match artifact.metadata_value(&rule.fact_key) {
            Some(value) => {
                samples.entry(rule.fact_key.clone()).or_default().push(FactSample {
                    value: value.to_string(),
                    source: rule.source.clone(),
                });
            }
            None => {
                tracing::debug!(
                    target_section = %spec.id,
                    source = %rule.source,
                    fact_key = %rule.fact_key,
                    "fact key absent in source metadata"
                );
            }
        }
    }

    samples
        .into_iter()
        .filter_map(|(key, samples)| reconcile(&samples, policy).map(|v| (key, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_types::{KeyValue, Phase, QualityReport, SectionArtifact, SectionState};

    fn sample(value: &str, source: &str) -> FactSample {
        FactSample {
            value: value.into(),
            source: SectionId::new(source),
        }
    }

    #[test]
    fn reconcile_single_sample_ignores_policy() {
        let samples = [sample("12.5", "A")];
        assert_eq!(
            reconcile(&samples, ReconcilePolicy::MostRecent).as_deref(),
            Some("12.5")
        );
        assert_eq!(
            reconcile(&samples, ReconcilePolicy::WeightedAverage).as_deref(),
            Some("12.5")
        );
    }

    #[test]
    fn reconcile_most_recent_takes_last_source() {
        let samples = [sample("10", "A"), sample("20", "B")];
        assert_eq!(
            reconcile(&samples, ReconcilePolicy::MostRecent).as_deref(),
            Some("20")
        );
    }

    #[test]
    fn reconcile_weighted_average_means_numeric_samples() {
        let samples = [sample("10", "A"), sample("20", "B")];
        assert_eq!(
            reconcile(&samples, ReconcilePolicy::WeightedAverage).as_deref(),
            Some("15")
        );
    }

    #[test]
    fn reconcile_weighted_average_falls_back_on_non_numeric() {
        let samples = [sample("10", "A"), sample("high", "B")];
        assert_eq!(
            reconcile(&samples, ReconcilePolicy::WeightedAverage).as_deref(),
            Some("high")
        );
    }

    #[test]
    fn reconcile_empty_is_none() {
        assert_eq!(reconcile(&[], ReconcilePolicy::MostRecent), None);
    }

    #[test]
    fn facts_are_read_by_value_from_terminal_sources() {
        let ledger = SectionLedger::new();
        ledger
            .record(
                SectionId::new("RISK"),
                SectionState::accepted(
                    SectionArtifact::new("RISK", "risk body").with_metadata(vec![KeyValue::new(
                        "ETP_CAPEX (%)",
                        "12.5",
                    )]),
                    QualityReport::new(96.0, true),
                ),
            )
            .unwrap();

        let spec = SectionSpec::new("COSTS", "Capital Costs", Phase::Costs)
            .with_dependencies(["RISK"]);
        let rules = [PropagationRule::new("RISK", "COSTS", "ETP")];

        let facts = resolve_facts(&spec, &rules, &ledger, ReconcilePolicy::MostRecent);
        assert_eq!(facts.get("ETP").map(String::as_str), Some("12.5"));
    }

    #[test]
    fn missing_source_supplies_no_facts() {
        let ledger = SectionLedger::new();
        ledger
            .record(SectionId::new("RISK"), SectionState::missing())
            .unwrap();
        let spec = SectionSpec::new("COSTS", "Capital Costs", Phase::Costs);
        let rules = [PropagationRule::new("RISK", "COSTS", "ETP")];
        let facts = resolve_facts(&spec, &rules, &ledger, ReconcilePolicy::MostRecent);
        assert!(facts.is_empty());
    }

    #[test]
    fn rules_for_other_targets_are_ignored() {
        let ledger = SectionLedger::new();
        let spec = SectionSpec::new("SUMMARY", "Summary", Phase::Integration);
        let rules = [PropagationRule::new("RISK", "COSTS", "ETP")];
        assert!(resolve_facts(&spec, &rules, &ledger, ReconcilePolicy::MostRecent).is_empty());
    }
}
