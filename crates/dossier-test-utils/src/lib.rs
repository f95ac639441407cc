//! Testing utilities for the dossier workspace
//!
//! Scripted collaborators, payload constructors, and small catalogs.

#![allow(missing_docs)]

use dossier_collab::{CheckerRequest, CollaboratorError, Maker, MakerRequest, RenderError, Renderer};
use dossier_plan::Catalog;
use dossier_types::{Phase, PropagationRule, SectionSpec};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Canned response: a payload or a collaborator failure message.
pub type Scripted = Result<Value, String>;

fn to_error(message: String) -> CollaboratorError {
    if message.contains("timeout") {
        CollaboratorError::Timeout(30)
    } else {
        CollaboratorError::Transport(message)
    }
}

/// Maker that replays a script and counts calls.
///
/// With a sequence script, responses are consumed in order and the last
/// one repeats once the queue is drained.
pub struct ScriptedMaker {
    script: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<Scripted>>,
    calls: AtomicUsize,
    /// Captured requests, for asserting on propagated context.
    pub seen: Mutex<Vec<MakerRequest>>,
}

impl ScriptedMaker {
    pub fn always(response: Scripted) -> Self {
        Self::sequence(vec![response])
    }

    pub fn sequence(responses: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Scripted {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(next) = script.pop_front() {
            *last = Some(next.clone());
            next
        } else {
            last.clone().expect("scripted maker has no responses")
        }
    }
}

#[async_trait::async_trait]
impl Maker for ScriptedMaker {
    async fn draft(&self, request: &MakerRequest) -> Result<Value, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        self.next().map_err(to_error)
    }
}

/// Checker that replays a script and counts calls.
pub struct ScriptedChecker {
    script: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<Scripted>>,
    calls: AtomicUsize,
    /// Captured requests, for asserting on content capping.
    pub seen: Mutex<Vec<CheckerRequest>>,
}

impl ScriptedChecker {
    pub fn always(response: Scripted) -> Self {
        Self::sequence(vec![response])
    }

    pub fn sequence(responses: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> Scripted {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(next) = script.pop_front() {
            *last = Some(next.clone());
            next
        } else {
            last.clone().expect("scripted checker has no responses")
        }
    }
}

#[async_trait::async_trait]
impl dossier_collab::Checker for ScriptedChecker {
    async fn review(&self, request: &CheckerRequest) -> Result<Value, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.clone());
        self.next().map_err(to_error)
    }
}

/// Renderer that records render calls and returns a deterministic path.
#[derive(Default)]
pub struct RecordingRenderer {
    pub rendered: Mutex<Vec<(String, usize)>>,
}

#[async_trait::async_trait]
impl Renderer for RecordingRenderer {
    async fn render(&self, document: &str, filename: &str) -> Result<String, RenderError> {
        self.rendered
            .lock()
            .unwrap()
            .push((filename.to_string(), document.len()));
        Ok(format!("output_pdfs/{filename}"))
    }
}

/// Renderer that always fails.
pub struct FailingRenderer;

#[async_trait::async_trait]
impl Renderer for FailingRenderer {
    async fn render(&self, _document: &str, _filename: &str) -> Result<String, RenderError> {
        Err(RenderError("converter unavailable".into()))
    }
}

/// Valid artifact payload for a section.
pub fn artifact_payload(section_id: &str, metadata: &[(&str, &str)], content: &str) -> Value {
    json!({
        "section_id": section_id,
        "metadata": metadata
            .iter()
            .map(|(k, v)| json!({"key": k, "value": v}))
            .collect::<Vec<_>>(),
        "key_tables": "",
        "content": content,
    })
}

/// Valid report payload.
pub fn report_payload(score: f64, approved: bool, recommendation: &str) -> Value {
    json!({
        "score": score,
        "approved": approved,
        "root_cause": if approved { "" } else { "content below template" },
        "actionable_recommendation": recommendation,
        "critical_gaps": [],
        "regulatory_compliance": approved,
    })
}

/// Three-section chain catalog: Risk -> Costs -> Summary, with the ETP
/// fact propagated from Risk into Costs.
pub fn chain_catalog() -> Catalog {
    Catalog {
        document_type: "TEST".into(),
        sections: vec![
            SectionSpec::new("RISK", "Risk Assessment", Phase::Justification),
            SectionSpec::new("COSTS", "Capital Costs", Phase::Costs).with_dependencies(["RISK"]),
            SectionSpec::new("SUMMARY", "Summary", Phase::Integration)
                .with_dependencies(["COSTS"]),
        ],
        propagation_rules: vec![PropagationRule::new("RISK", "COSTS", "ETP")],
    }
}

/// Single-section catalog with no dependencies.
pub fn solo_catalog(id: &str, title: &str) -> Catalog {
    Catalog {
        document_type: "TEST".into(),
        sections: vec![SectionSpec::new(id, title, Phase::Justification)],
        propagation_rules: Vec::new(),
    }
}
