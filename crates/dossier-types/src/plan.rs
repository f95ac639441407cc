//! Document plans and cross-section propagation rules

use crate::section::{SectionId, SectionSpec};
use serde::{Deserialize, Serialize};

/// Declared cross-section data dependency
///
/// Beyond mere execution ordering: a named fact must be read from the
/// source section's terminal metadata and injected into the target
/// section's generation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationRule {
    /// Section whose metadata supplies the fact
    pub source: SectionId,
    /// Section that consumes the fact
    pub target: SectionId,
    /// Fact key, matched case-insensitively against metadata keys
    pub fact_key: String,
}

impl PropagationRule {
    /// Create a propagation rule
    #[inline]
    #[must_use]
    pub fn new(
        source: impl Into<SectionId>,
        target: impl Into<SectionId>,
        fact_key: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            fact_key: fact_key.into(),
        }
    }
}

/// Validated execution plan for one run
///
/// Constructed only by the plan builder after the catalog passes
/// validation: ids unique, every dependency declared, graph acyclic.
/// Owned by a single run and discarded after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPlan {
    /// Project the run belongs to
    pub project_id: String,
    /// Document type the catalog was selected for
    pub document_type: String,
    /// Sections in canonical catalog order
    pub sections: Vec<SectionSpec>,
    /// Derived dependency edges `(dependency, dependent)`
    pub edges: Vec<(SectionId, SectionId)>,
    /// Cross-section fact propagation rules
    pub propagation_rules: Vec<PropagationRule>,
}

impl DocumentPlan {
    /// Look up a section spec by id
    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Number of sections in the plan
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the plan has no sections
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Rules whose target is the given section, in declaration order
    pub fn rules_for<'a>(
        &'a self,
        target: &'a SectionId,
    ) -> impl Iterator<Item = &'a PropagationRule> + 'a {
        self.propagation_rules.iter().filter(move |r| &r.target == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Phase;

    fn two_section_plan() -> DocumentPlan {
        let risk = SectionSpec::new("SIC_03", "Risk Assessment", Phase::Justification);
        let capex = SectionSpec::new("SIC_16", "Capital Costs", Phase::Costs)
            .with_dependencies(["SIC_03"]);
        DocumentPlan {
            project_id: "9".into(),
            document_type: "SIC".into(),
            sections: vec![risk, capex],
            edges: vec![(SectionId::new("SIC_03"), SectionId::new("SIC_16"))],
            propagation_rules: vec![PropagationRule::new("SIC_03", "SIC_16", "ETP")],
        }
    }

    #[test]
    fn section_lookup() {
        let plan = two_section_plan();
        assert!(plan.section(&SectionId::new("SIC_03")).is_some());
        assert!(plan.section(&SectionId::new("SIC_99")).is_none());
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn rules_for_filters_by_target() {
        let plan = two_section_plan();
        let capex = SectionId::new("SIC_16");
        let rules: Vec<_> = plan.rules_for(&capex).collect();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].fact_key, "ETP");
        assert_eq!(plan.rules_for(&SectionId::new("SIC_03")).count(), 0);
    }
}
