//! Plan configuration errors
//!
//! All of these are fatal and raised before any collaborator call; a run
//! never starts on a malformed catalog.

use dossier_types::SectionId;

/// Catalog or plan validation failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// No catalog registered for the requested document type
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    /// Catalog has no sections
    #[error("catalog for {0} declares no sections")]
    EmptyCatalog(String),

    /// Section id declared more than once
    #[error("duplicate section id: {0}")]
    DuplicateSection(SectionId),

    /// Dependency id not declared anywhere in the catalog
    #[error("section {section} depends on undeclared section {dependency}")]
    UnknownDependency {
        section: SectionId,
        dependency: SectionId,
    },

    /// Section depends on itself
    #[error("section {0} depends on itself")]
    SelfDependency(SectionId),

    /// Dependency graph contains a cycle
    #[error("dependency cycle detected through section {0}")]
    CycleDetected(SectionId),

    /// Propagation rule references a section outside the catalog
    #[error("propagation rule references undeclared section {0}")]
    UnknownRuleSection(SectionId),

    /// Propagation rule whose source does not precede its target, so the
    /// fact could never be read from a completed predecessor
    #[error("propagation rule source {source_section} is not a dependency ancestor of target {target}")]
    RulePrecedence {
        source_section: SectionId,
        target: SectionId,
    },

    /// Catalog file could not be read
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file could not be parsed
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_section_ids() {
        let err = ConfigurationError::UnknownDependency {
            section: SectionId::new("SIC_16"),
            dependency: SectionId::new("SIC_99"),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("SIC_16"));
        assert!(rendered.contains("SIC_99"));
    }
}
