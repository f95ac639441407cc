//! Section executor
//!
//! Runs the Maker/Checker convergence loop for one section:
//! Drafting -> Critiquing -> {Accepted | Retrying | Exhausted | Missing}.
//!
//! Each attempt is a fresh pair of stateless requests. The only context
//! that crosses an attempt boundary is the prior checker's actionable
//! recommendation, carried verbatim as a request field; no conversational
//! history accumulates, which bounds cost growth across retries.
//!
//! Collaborator failures are recovered here: logged, counted against the
//! attempt budget, never surfaced to the orchestrator.

use crate::ledger::SectionLedger;
use crate::propagation::resolve_facts;
use dossier_collab::{decode, Checker, CheckerRequest, Maker, MakerRequest};
use dossier_types::{
    EngineConfig, PropagationRule, QualityReport, SectionArtifact, SectionSpec, SectionState,
    SectionStatus,
};
use std::sync::Arc;

/// Terminal result of executing one section
#[derive(Debug, Clone)]
pub struct SectionOutcome {
    /// Terminal state, written once into the ledger by the orchestrator
    pub state: SectionState,
    /// Retained quality report (sentinel for `Missing`)
    pub report: QualityReport,
    /// Attempts actually spent
    pub attempts: u32,
}

/// Per-section Maker/Checker convergence loop
pub struct SectionExecutor {
    maker: Arc<dyn Maker>,
    checker: Arc<dyn Checker>,
    config: EngineConfig,
}

impl SectionExecutor {
    /// Create an executor over the given collaborators
    #[must_use]
    pub fn new(maker: Arc<dyn Maker>, checker: Arc<dyn Checker>, config: EngineConfig) -> Self {
        Self {
            maker,
            checker,
            config,
        }
    }

    /// Engine configuration in effect
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the convergence loop for one section
    ///
    /// Never errors: every failure mode degrades to a terminal state.
    /// Issues at most `attempt_budget` Maker/Checker call pairs.
    pub async fn execute(
        &self,
        project_id: &str,
        spec: &SectionSpec,
        ledger: &SectionLedger,
        rules: &[PropagationRule],
    ) -> SectionOutcome {
        let facts = resolve_facts(spec, rules, ledger, self.config.reconcile_policy);
        let mut last_artifact: Option<SectionArtifact> = None;
        let mut last_report: Option<QualityReport> = None;

        for attempt in 1..=self.config.attempt_budget {
            tracing::info!(section = %spec.id, attempt, status = %SectionStatus::Drafting, "drafting");

            let mut request = MakerRequest::from_spec(project_id, spec).with_facts(facts.clone());
            if let Some(prior) = last_report
                .as_ref()
                .filter(|r| !r.actionable_recommendation.is_empty())
            {
                request = request.with_prior_recommendation(&prior.actionable_recommendation);
            }

            let candidate = match self.maker.draft(&request).await {
                Ok(payload) => match decode::artifact(payload) {
                    Ok(artifact) => artifact,
                    Err(e) => {
                        tracing::warn!(section = %spec.id, attempt, error = %e, "maker payload invalid");
                        continue;
                    }
                },
                Err(e) => {
                    tracing::warn!(section = %spec.id, attempt, error = %e, "maker call failed");
                    continue;
                }
            };

            tracing::info!(section = %spec.id, attempt, status = %SectionStatus::Critiquing, "critiquing");
            let capped = cap_chars(&candidate.content, self.config.checker_content_cap);
            let review = CheckerRequest::new(spec.id.clone(), capped);

            // The candidate is retained even if the critique fails; an
            // exhausted section keeps its best-effort artifact.
            last_artifact = Some(candidate);

            let report = match self.checker.review(&review).await {
                Ok(payload) => match decode::report(payload) {
                    Ok(report) => report,
                    Err(e) => {
                        tracing::warn!(section = %spec.id, attempt, error = %e, "checker payload invalid");
                        continue;
                    }
                },
                Err(e) => {
                    tracing::warn!(section = %spec.id, attempt, error = %e, "checker call failed");
                    continue;
                }
            };

            let accepted = report.approved || report.score > self.config.accept_threshold;
            tracing::info!(
                section = %spec.id,
                attempt,
                score = report.score,
                approved = report.approved,
                accepted,
                "critique received"
            );

            if accepted {
                // last_artifact holds this attempt's candidate
                if let Some(artifact) = last_artifact.take() {
                    return SectionOutcome {
                        state: SectionState::accepted(artifact, report.clone()),
                        report,
                        attempts: attempt,
                    };
                }
            }
            last_report = Some(report);
        }

        let attempts = self.config.attempt_budget;
        match last_artifact {
            Some(artifact) => {
                // Best effort: keep whatever critique we last saw, or the
                // sentinel when every checker call failed.
                let report = last_report.unwrap_or_else(QualityReport::missing_sentinel);
                tracing::warn!(section = %spec.id, score = report.score, "attempt budget exhausted");
                SectionOutcome {
                    state: SectionState::exhausted(artifact, report.clone()),
                    report,
                    attempts,
                }
            }
            None => {
                tracing::warn!(section = %spec.id, "no attempt produced a valid artifact");
                let report = QualityReport::missing_sentinel();
                SectionOutcome {
                    state: SectionState::missing(),
                    report,
                    attempts,
                }
            }
        }
    }
}

/// Truncate to at most `cap` characters on a char boundary
fn cap_chars(content: &str, cap: usize) -> String {
    match content.char_indices().nth(cap) {
        Some((byte_idx, _)) => content[..byte_idx].to_string(),
        None => content.to_string(),
    }
}
