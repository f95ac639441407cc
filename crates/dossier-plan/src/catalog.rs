//! Section catalogs
//!
//! A catalog is the static configuration behind a document type: the fixed
//! set of sections, their precedence edges, and the declared cross-section
//! fact propagations. Catalogs load at startup; changing one requires a
//! reload, not a runtime API.

use crate::error::ConfigurationError;
use dossier_types::{Phase, PropagationRule, SectionSpec};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

/// Static catalog for one document type
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// Document type this catalog serves
    pub document_type: String,
    /// Sections in canonical order
    pub sections: Vec<SectionSpec>,
    /// Declared cross-section fact propagations
    #[serde(default)]
    pub propagation_rules: Vec<PropagationRule>,
}

impl Catalog {
    /// Load a catalog from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    /// Parse a catalog from YAML text
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

/// The built-in SIC catalog: 22 interdependent sections of a capital
/// project submission, with the precedence table used for planning.
pub static SIC_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let section = |id: &str, title: &str, phase: Phase, deps: &[&str]| {
        SectionSpec::new(id, title, phase).with_dependencies(deps.iter().copied())
    };

    Catalog {
        document_type: "SIC".to_string(),
        sections: vec![
            section("SIC_02", "Business Case", Phase::Justification, &[]),
            section("SIC_03", "Risk Assessment", Phase::Justification, &["SIC_02"]),
            section(
                "SIC_04",
                "Occupational Health and Safety",
                Phase::Compliance,
                &["SIC_03"],
            ),
            section("SIC_05", "Environment", Phase::Compliance, &["SIC_03"]),
            section(
                "SIC_06",
                "External and Community Relations",
                Phase::Compliance,
                &["SIC_03"],
            ),
            section(
                "SIC_10",
                "Waste and Water Management",
                Phase::Compliance,
                &["SIC_03"],
            ),
            section(
                "SIC_07",
                "Geology and Mineral Resources",
                Phase::Engineering,
                &["SIC_02"],
            ),
            section(
                "SIC_08",
                "Mining and Mineral Reserves",
                Phase::Engineering,
                &["SIC_02"],
            ),
            section("SIC_09", "Mineral Processing", Phase::Engineering, &["SIC_02"]),
            section("SIC_18", "Products", Phase::Engineering, &["SIC_02"]),
            section(
                "SIC_11",
                "Infrastructure and Services",
                Phase::Engineering,
                &["SIC_02"],
            ),
            section(
                "SIC_13",
                "Technology and Information Systems",
                Phase::Engineering,
                &["SIC_02"],
            ),
            section(
                "SIC_19",
                "Property and Legal Aspects",
                Phase::Compliance,
                &["SIC_02"],
            ),
            section("SIC_20", "Commercial Agreements", Phase::Compliance, &["SIC_02"]),
            section(
                "SIC_16",
                "Capital Costs",
                Phase::Costs,
                &["SIC_11", "SIC_03"],
            ),
            section("SIC_21", "Financial Annex", Phase::Annex, &["SIC_16"]),
            section(
                "SIC_14",
                "Project Execution Plan",
                Phase::Integration,
                &["SIC_03", "SIC_16", "SIC_11"],
            ),
            section("SIC_15", "Operations", Phase::Integration, &["SIC_14"]),
            section("SIC_12", "Human Resources", Phase::Integration, &["SIC_15"]),
            section(
                "SIC_17",
                "Operating Costs",
                Phase::Costs,
                &["SIC_16", "SIC_12"],
            ),
            section(
                "SIC_01",
                "Summary and Recommendations",
                Phase::Integration,
                &["SIC_14", "SIC_16", "SIC_03"],
            ),
            section("SIC_22", "Technical Annex", Phase::Annex, &["SIC_11"]),
        ],
        // Total project exposure flows from the risk section into the
        // capital-cost contingency table.
        propagation_rules: vec![PropagationRule::new("SIC_03", "SIC_16", "ETP")],
    }
});
