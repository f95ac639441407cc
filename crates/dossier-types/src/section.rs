//! Section identity and specification
//!
//! Sections are the fixed document parts a deliverable is built from. Each
//! one is identified by a catalog code and declares which other sections
//! must be terminal before it may run.

use serde::{Deserialize, Serialize};

/// Unique section identifier (catalog code, e.g. `SIC_03`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

impl SectionId {
    /// Create a section id from a catalog code
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The underlying catalog code
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SectionId {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Catalog phase a section belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Business justification
    Justification,
    /// Regulatory and stakeholder compliance
    Compliance,
    /// Engineering and technical definition
    Engineering,
    /// Capital and operating cost estimation
    Costs,
    /// Execution planning and summary
    Integration,
    /// Supporting annexes
    Annex,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Justification => "justification",
            Phase::Compliance => "compliance",
            Phase::Engineering => "engineering",
            Phase::Costs => "costs",
            Phase::Integration => "integration",
            Phase::Annex => "annex",
        };
        write!(f, "{label}")
    }
}

/// Static specification of one document section
///
/// Immutable once loaded from the catalog. Dependencies are ids of other
/// sections that must reach a terminal state before this one starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Unique catalog code
    pub id: SectionId,
    /// Human-readable title
    pub title: String,
    /// Sections that must be terminal before this one runs
    #[serde(default)]
    pub dependency_ids: Vec<SectionId>,
    /// Catalog phase label
    pub phase: Phase,
}

impl SectionSpec {
    /// Create a section spec with no dependencies
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>, phase: Phase) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            dependency_ids: Vec::new(),
            phase,
        }
    }

    /// Declare dependencies
    #[inline]
    #[must_use]
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = impl Into<SectionId>>) -> Self {
        self.dependency_ids = deps.into_iter().map(Into::into).collect();
        self
    }
}

impl From<String> for SectionId {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Ordered key/value metadata entry
///
/// Kept as an explicit pair list rather than a map so metadata order
/// survives serialization and strict structured-output schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Parameter name
    pub key: String,
    /// Parameter value
    pub value: String,
}

impl KeyValue {
    /// Create a metadata entry
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Structured output of a Maker draft for one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionArtifact {
    /// Section this artifact belongs to
    pub section_id: SectionId,
    /// Ordered technical metadata (facts readable by dependents)
    #[serde(default)]
    pub metadata: Vec<KeyValue>,
    /// Critical tables in markdown
    #[serde(default)]
    pub key_tables: String,
    /// Full section content in markdown
    pub content: String,
}

impl SectionArtifact {
    /// Create an artifact with empty metadata and tables
    #[inline]
    #[must_use]
    pub fn new(section_id: impl Into<SectionId>, content: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            metadata: Vec::new(),
            key_tables: String::new(),
            content: content.into(),
        }
    }

    /// Attach metadata entries
    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, metadata: Vec<KeyValue>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach key tables markdown
    #[inline]
    #[must_use]
    pub fn with_key_tables(mut self, tables: impl Into<String>) -> Self {
        self.key_tables = tables.into();
        self
    }

    /// Look up a metadata value by case-insensitive substring match on the key
    ///
    /// This is the lookup dependents use when resolving propagated facts,
    /// so `ETP` matches a metadata key like `ETP_CAPEX (%)`.
    #[must_use]
    pub fn metadata_value(&self, fact_key: &str) -> Option<&str> {
        let needle = fact_key.to_ascii_uppercase();
        self.metadata
            .iter()
            .find(|kv| kv.key.to_ascii_uppercase().contains(&needle))
            .map(|kv| kv.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_id_display_roundtrip() {
        let id = SectionId::new("SIC_03");
        assert_eq!(id.to_string(), "SIC_03");
        assert_eq!(id.as_str(), "SIC_03");
    }

    #[test]
    fn spec_builder_sets_dependencies() {
        let spec = SectionSpec::new("SIC_16", "Capital Costs", Phase::Costs)
            .with_dependencies(["SIC_11", "SIC_03"]);
        assert_eq!(spec.dependency_ids.len(), 2);
        assert_eq!(spec.dependency_ids[0], SectionId::new("SIC_11"));
    }

    #[test]
    fn metadata_lookup_is_case_insensitive_substring() {
        let artifact = SectionArtifact::new("SIC_03", "risk body").with_metadata(vec![
            KeyValue::new("Etp_Capex (%)", "12.5"),
            KeyValue::new("RISK_LEVEL", "high"),
        ]);
        assert_eq!(artifact.metadata_value("ETP"), Some("12.5"));
        assert_eq!(artifact.metadata_value("risk_level"), Some("high"));
        assert_eq!(artifact.metadata_value("capex_total"), None);
    }

    #[test]
    fn artifact_serde_roundtrip() {
        let artifact = SectionArtifact::new("SIC_02", "# Business Case")
            .with_metadata(vec![KeyValue::new("NPV_KUSD", "1500")])
            .with_key_tables("| a | b |");
        let json = serde_json::to_string(&artifact).unwrap();
        let back: SectionArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, artifact);
    }
}
