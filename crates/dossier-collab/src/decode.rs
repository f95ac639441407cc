//! Validated decode at collaborator boundaries
//!
//! Each collaborator returns an untyped JSON payload; decoding happens in
//! exactly one place per boundary and produces a tagged result. Wire field
//! aliases accept the legacy payload shape (`sic_code`,
//! `key_tables_markdown`, `summary_markdown`) alongside the canonical one.

use crate::error::DecodeError;
use dossier_types::{KeyValue, QualityReport, SectionArtifact, SectionId};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ArtifactWire {
    #[serde(alias = "sic_code")]
    section_id: SectionId,
    #[serde(default)]
    metadata: Vec<KeyValue>,
    #[serde(default, alias = "key_tables_markdown")]
    key_tables: String,
    #[serde(alias = "summary_markdown")]
    content: String,
}

#[derive(Deserialize)]
struct ReportWire {
    #[serde(alias = "qc_score")]
    score: f64,
    approved: bool,
    #[serde(default)]
    root_cause: String,
    #[serde(default)]
    actionable_recommendation: String,
    #[serde(default)]
    critical_gaps: Vec<String>,
    #[serde(default)]
    regulatory_compliance: bool,
}

/// Decode a Maker payload into a section artifact
pub fn artifact(payload: Value) -> Result<SectionArtifact, DecodeError> {
    let wire: ArtifactWire =
        serde_json::from_value(payload).map_err(|e| DecodeError::Schema {
            expected: "SectionArtifact",
            detail: e.to_string(),
        })?;
    if wire.content.trim().is_empty() {
        return Err(DecodeError::MissingField("content"));
    }
    Ok(SectionArtifact {
        section_id: wire.section_id,
        metadata: wire.metadata,
        key_tables: wire.key_tables,
        content: wire.content,
    })
}

/// Decode a Checker payload into a quality report
///
/// Out-of-range scores are clamped rather than rejected; a checker that
/// reports 104 still made a usable judgement.
pub fn report(payload: Value) -> Result<QualityReport, DecodeError> {
    let wire: ReportWire = serde_json::from_value(payload).map_err(|e| DecodeError::Schema {
        expected: "QualityReport",
        detail: e.to_string(),
    })?;
    if !wire.score.is_finite() {
        return Err(DecodeError::MissingField("score"));
    }
    let mut report = QualityReport::new(wire.score, wire.approved)
        .with_root_cause(wire.root_cause)
        .with_recommendation(wire.actionable_recommendation)
        .with_critical_gaps(wire.critical_gaps);
    if wire.regulatory_compliance {
        report = report.compliant();
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn canonical_artifact_decodes() {
        let artifact = artifact(json!({
            "section_id": "SIC_03",
            "metadata": [{"key": "ETP_CAPEX", "value": "12.5"}],
            "key_tables": "| risk | score |",
            "content": "# Risk Assessment",
        }))
        .unwrap();
        assert_eq!(artifact.section_id.as_str(), "SIC_03");
        assert_eq!(artifact.metadata_value("etp"), Some("12.5"));
    }

    #[test]
    fn legacy_aliases_decode() {
        let artifact = artifact(json!({
            "sic_code": "SIC_16",
            "key_tables_markdown": "| item | kusd |",
            "summary_markdown": "# Capital Costs",
        }))
        .unwrap();
        assert_eq!(artifact.section_id.as_str(), "SIC_16");
        assert_eq!(artifact.key_tables, "| item | kusd |");
        assert_eq!(artifact.content, "# Capital Costs");
    }

    #[test]
    fn empty_content_is_rejected() {
        let err = artifact(json!({"section_id": "SIC_02", "content": "  "})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField("content")));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(artifact(json!("just a string")).is_err());
        assert!(report(json!(42)).is_err());
    }

    #[test]
    fn report_decodes_and_clamps() {
        let report = report(json!({
            "qc_score": 104.0,
            "approved": false,
            "actionable_recommendation": "tighten the contingency table",
            "regulatory_compliance": true,
        }))
        .unwrap();
        assert_eq!(report.score, 100.0);
        assert!(report.regulatory_compliance);
        assert_eq!(report.actionable_recommendation, "tighten the contingency table");
    }

    #[test]
    fn report_without_score_is_rejected() {
        let err = report(json!({"approved": true})).unwrap_err();
        assert!(matches!(err, DecodeError::Schema { .. }));
    }
}
