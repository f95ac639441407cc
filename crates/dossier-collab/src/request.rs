//! Collaborator requests
//!
//! Collaborators are modeled as stateless request/response calls: every
//! piece of context that crosses an attempt boundary is an explicit field
//! here, never implicit conversational history. A retry therefore costs
//! one request, not an ever-growing transcript.

use dossier_types::{SectionId, SectionSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input to one Maker draft call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakerRequest {
    /// Project the section belongs to
    pub project_id: String,
    /// Section to draft
    pub section_id: SectionId,
    /// Section title
    pub title: String,
    /// Declared dependency ids, for the maker's framing
    pub dependency_ids: Vec<SectionId>,
    /// Facts resolved from completed predecessors, by fact key
    pub propagated_facts: BTreeMap<String, String>,
    /// Prior attempt's actionable recommendation, verbatim; empty on the
    /// first attempt
    pub prior_recommendation: Option<String>,
}

impl MakerRequest {
    /// Build a first-attempt request from a section spec
    #[must_use]
    pub fn from_spec(project_id: impl Into<String>, spec: &SectionSpec) -> Self {
        Self {
            project_id: project_id.into(),
            section_id: spec.id.clone(),
            title: spec.title.clone(),
            dependency_ids: spec.dependency_ids.clone(),
            propagated_facts: BTreeMap::new(),
            prior_recommendation: None,
        }
    }

    /// With propagated facts
    #[inline]
    #[must_use]
    pub fn with_facts(mut self, facts: BTreeMap<String, String>) -> Self {
        self.propagated_facts = facts;
        self
    }

    /// With the prior attempt's recommendation
    #[inline]
    #[must_use]
    pub fn with_prior_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.prior_recommendation = Some(recommendation.into());
        self
    }
}

/// Input to one Checker review call
///
/// `content` is already truncated to the configured cap by the caller; the
/// checker never sees unbounded input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerRequest {
    /// Section under review
    pub section_id: SectionId,
    /// Candidate content, capped
    pub content: String,
}

impl CheckerRequest {
    /// Create a review request
    #[inline]
    #[must_use]
    pub fn new(section_id: impl Into<SectionId>, content: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            content: content.into(),
        }
    }
}
