//! Plan builder
//!
//! Turns a registered catalog into a validated `DocumentPlan`. All
//! structural invariants are enforced here, before any collaborator call:
//! unique ids, declared dependencies, no self-edges, acyclic graph, and
//! propagation rules that reference real sections and whose sources
//! precede their targets.

use crate::catalog::{Catalog, SIC_CATALOG};
use crate::error::ConfigurationError;
use crate::graph::SectionGraph;
use dossier_types::{DocumentPlan, SectionId};
use std::collections::{HashMap, HashSet};

/// Deterministic builder of validated document plans
#[derive(Debug)]
pub struct PlanBuilder {
    catalogs: HashMap<String, Catalog>,
}

impl PlanBuilder {
    /// Create a builder with the built-in catalogs registered
    #[must_use]
    pub fn new() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert(SIC_CATALOG.document_type.clone(), SIC_CATALOG.clone());
        Self { catalogs }
    }

    /// Create a builder with no catalogs registered
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            catalogs: HashMap::new(),
        }
    }

    /// Register (or replace) a catalog for its document type
    pub fn register(&mut self, catalog: Catalog) {
        self.catalogs.insert(catalog.document_type.clone(), catalog);
    }

    /// Build a validated plan for one run
    ///
    /// Deterministic and free of external calls; fails fast with a
    /// `ConfigurationError` on any malformed catalog.
    pub fn generate_plan(
        &self,
        project_id: &str,
        document_type: &str,
    ) -> Result<DocumentPlan, ConfigurationError> {
        let catalog = self
            .catalogs
            .get(document_type)
            .ok_or_else(|| ConfigurationError::UnknownDocumentType(document_type.to_string()))?;

        validate_catalog(catalog)?;

        let edges = catalog
            .sections
            .iter()
            .flat_map(|s| {
                s.dependency_ids
                    .iter()
                    .map(|dep| (dep.clone(), s.id.clone()))
            })
            .collect();

        let plan = DocumentPlan {
            project_id: project_id.to_string(),
            document_type: document_type.to_string(),
            sections: catalog.sections.clone(),
            edges,
            propagation_rules: catalog.propagation_rules.clone(),
        };
        tracing::info!(
            project_id,
            document_type,
            sections = plan.sections.len(),
            "plan validated"
        );
        Ok(plan)
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigurationError> {
    if catalog.sections.is_empty() {
        return Err(ConfigurationError::EmptyCatalog(
            catalog.document_type.clone(),
        ));
    }

    let mut seen: HashSet<&SectionId> = HashSet::with_capacity(catalog.sections.len());
    for spec in &catalog.sections {
        if !seen.insert(&spec.id) {
            return Err(ConfigurationError::DuplicateSection(spec.id.clone()));
        }
    }
    for spec in &catalog.sections {
        for dep in &spec.dependency_ids {
            if dep == &spec.id {
                return Err(ConfigurationError::SelfDependency(spec.id.clone()));
            }
            if !seen.contains(dep) {
                return Err(ConfigurationError::UnknownDependency {
                    section: spec.id.clone(),
                    dependency: dep.clone(),
                });
            }
        }
    }
    let deps: HashMap<&SectionId, &[SectionId]> = catalog
        .sections
        .iter()
        .map(|s| (&s.id, s.dependency_ids.as_slice()))
        .collect();
    for rule in &catalog.propagation_rules {
        for id in [&rule.source, &rule.target] {
            if !seen.contains(id) {
                return Err(ConfigurationError::UnknownRuleSection(id.clone()));
            }
        }
        // A fact is read from a completed predecessor, so the source must
        // precede the target in the dependency graph; otherwise the two
        // could run concurrently and the fact would silently vanish.
        if !is_ancestor(&deps, &rule.source, &rule.target) {
            return Err(ConfigurationError::RulePrecedence {
                source_section: rule.source.clone(),
                target: rule.target.clone(),
            });
        }
    }

    // Cycle check via graph construction
    SectionGraph::from_sections(&catalog.sections)?;
    Ok(())
}

/// Whether `source` is reachable from `target` through dependency edges
fn is_ancestor(
    deps: &HashMap<&SectionId, &[SectionId]>,
    source: &SectionId,
    target: &SectionId,
) -> bool {
    let mut stack: Vec<&SectionId> = vec![target];
    let mut visited: HashSet<&SectionId> = HashSet::new();
    while let Some(id) = stack.pop() {
        for dep in deps.get(id).copied().unwrap_or_default() {
            if dep == source {
                return true;
            }
            if visited.insert(dep) {
                stack.push(dep);
            }
        }
    }
    false
}
