//! Workflow orchestrator
//!
//! Drives the section executor over the plan graph. Scheduling is
//! ready-set based over an explicitly computed topological order: each
//! round starts every section whose dependencies are all terminal,
//! running independent branches concurrently under a fixed-size worker
//! pool. The orchestrator is the only writer of the section ledger;
//! slots are written exactly once.
//!
//! A run always yields a `WorkflowResult`, possibly degraded; only plan
//! validation or a scheduler invariant violation can abort it.

use crate::assembler::ResultAssembler;
use crate::checkpoint::CheckpointStore;
use crate::error::{AggregationError, EngineError};
use crate::executor::SectionExecutor;
use crate::ledger::SectionLedger;
use chrono::Utc;
use dossier_collab::{Checker, Maker, Renderer};
use dossier_plan::{DependencyGate, PlanBuilder, SectionGraph};
use dossier_types::{
    DocumentPlan, EngineConfig, RunId, SectionId, SectionSpec, SectionStatus, WorkflowResult,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Top-level coordinator of one document run
///
/// Constructed once by the service layer with its collaborators passed in
/// explicitly; holds no ambient global state.
pub struct WorkflowOrchestrator {
    plan_builder: PlanBuilder,
    executor: Arc<SectionExecutor>,
    assembler: ResultAssembler,
    checkpoints: Option<Arc<dyn CheckpointStore>>,
    config: EngineConfig,
}

impl WorkflowOrchestrator {
    /// Create an orchestrator over the given collaborators
    #[must_use]
    pub fn new(
        plan_builder: PlanBuilder,
        maker: Arc<dyn Maker>,
        checker: Arc<dyn Checker>,
        config: EngineConfig,
    ) -> Self {
        Self {
            plan_builder,
            executor: Arc::new(SectionExecutor::new(maker, checker, config.clone())),
            assembler: ResultAssembler::new(),
            checkpoints: None,
            config,
        }
    }

    /// Attach a rendering collaborator
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.assembler = ResultAssembler::with_renderer(renderer);
        self
    }

    /// Attach a checkpoint store for idempotent resume
    #[must_use]
    pub fn with_checkpoints(mut self, store: Arc<dyn CheckpointStore>) -> Self {
        self.checkpoints = Some(store);
        self
    }

    /// Execute one full run
    pub async fn run(
        &self,
        project_id: &str,
        document_type: &str,
    ) -> Result<WorkflowResult, EngineError> {
        let run_id = RunId::new();
        let started_at = Utc::now();
        tracing::info!(%run_id, project_id, document_type, "run started");

        let plan = self.plan_builder.generate_plan(project_id, document_type)?;
        let order = SectionGraph::from_sections(&plan.sections)?.topological_sort()?;
        tracing::debug!(?order, "execution order computed");

        let ledger = Arc::new(SectionLedger::new());
        let driven = self.drive(&plan, &order, &ledger);
        match self.config.run_timeout {
            Some(limit) => match tokio::time::timeout(limit, driven).await {
                Ok(result) => result?,
                Err(_) => {
                    tracing::warn!(timeout_secs = limit.as_secs(), "run timed out; degrading")
                }
            },
            None => driven.await?,
        }
        // Timeout path: sections still in flight degrade to missing
        for spec in &plan.sections {
            ledger.fill_missing(&spec.id);
        }

        let total = plan.sections.len() as f64;
        let mut states = BTreeMap::new();
        let mut score_sum = 0.0;
        let mut generated = 0usize;
        for spec in &plan.sections {
            // Every slot is written by now
            let Some(state) = ledger.get(&spec.id) else {
                return Err(AggregationError::Stalled { remaining: 1 }.into());
            };
            score_sum += state.score();
            if state.status != SectionStatus::Missing {
                generated += 1;
            }
            states.insert(spec.id.clone(), state);
        }
        let aggregate_score = if plan.sections.is_empty() {
            0.0
        } else {
            score_sum / total
        };
        let completeness = generated == plan.sections.len();
        let global_approved = completeness && aggregate_score > self.config.global_threshold;

        let filename = format!("{document_type}_{project_id}.pdf");
        let (document, manifest) = self
            .assembler
            .assemble_and_render(&plan, &ledger, &filename)
            .await;

        if global_approved {
            tracing::info!(%run_id, aggregate_score, "run approved: {}/{} sections", generated, plan.sections.len());
        } else {
            tracing::warn!(%run_id, aggregate_score, completeness, "run degraded: {}/{} sections", generated, plan.sections.len());
        }

        Ok(WorkflowResult {
            run_id,
            project_id: project_id.to_string(),
            document_type: document_type.to_string(),
            started_at,
            finished_at: Utc::now(),
            states,
            aggregate_score,
            completeness,
            global_approved,
            document,
            manifest,
        })
    }

    /// Scheduling loop: rounds of ready sections until every slot is
    /// terminal
    async fn drive(
        &self,
        plan: &DocumentPlan,
        order: &[SectionId],
        ledger: &Arc<SectionLedger>,
    ) -> Result<(), EngineError> {
        let pool = Arc::new(Semaphore::new(self.config.max_concurrent_sections));
        let mut started: HashSet<SectionId> = HashSet::new();

        while ledger.len() < plan.sections.len() {
            let completed = ledger.completed_ids();
            let ready: Vec<SectionSpec> = order
                .iter()
                .filter(|id| !started.contains(*id))
                .filter_map(|id| plan.section(id))
                .filter(|spec| DependencyGate::can_execute(spec, &completed))
                .cloned()
                .collect();
            if ready.is_empty() {
                // Unreachable for a validated plan
                return Err(AggregationError::Stalled {
                    remaining: plan.sections.len() - ledger.len(),
                }
                .into());
            }

            let mut round = JoinSet::new();
            for spec in ready {
                // Gate invariant: must hold for anything the ready set
                // admitted, given a valid topological order
                if !DependencyGate::can_execute(&spec, &completed) {
                    return Err(AggregationError::GateViolation(spec.id).into());
                }
                started.insert(spec.id.clone());

                if let Some(state) = self.load_checkpoint(&plan.project_id, &spec.id).await {
                    tracing::info!(section = %spec.id, status = %state.status, "resumed from checkpoint");
                    ledger.record(spec.id.clone(), state)?;
                    continue;
                }

                let executor = Arc::clone(&self.executor);
                let ledger = Arc::clone(ledger);
                let pool = Arc::clone(&pool);
                let rules = plan.propagation_rules.clone();
                let project_id = plan.project_id.clone();
                round.spawn(async move {
                    let _permit = pool.acquire_owned().await.ok();
                    let outcome = executor
                        .execute(&project_id, &spec, &ledger, &rules)
                        .await;
                    (spec.id, outcome)
                });
            }

            while let Some(joined) = round.join_next().await {
                let (section_id, outcome) =
                    joined.map_err(|e| AggregationError::TaskFailure(e.to_string()))?;
                ledger.record(section_id.clone(), outcome.state.clone())?;
                self.save_checkpoint(&plan.project_id, &section_id, &outcome.state)
                    .await;
            }
        }
        Ok(())
    }

    async fn load_checkpoint(
        &self,
        project_id: &str,
        section_id: &SectionId,
    ) -> Option<dossier_types::SectionState> {
        let store = self.checkpoints.as_ref()?;
        match store.load(project_id, section_id).await {
            Ok(state) => state.filter(|s| s.status.is_terminal()),
            Err(e) => {
                tracing::warn!(section = %section_id, error = %e, "checkpoint load failed; executing");
                None
            }
        }
    }

    async fn save_checkpoint(
        &self,
        project_id: &str,
        section_id: &SectionId,
        state: &dossier_types::SectionState,
    ) {
        let Some(store) = &self.checkpoints else {
            return;
        };
        if let Err(e) = store.save(project_id, section_id, state).await {
            tracing::warn!(section = %section_id, error = %e, "checkpoint save failed");
        }
    }
}
