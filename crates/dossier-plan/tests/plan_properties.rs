//! Property tests over generated catalogs.
//!
//! - Any catalog whose dependencies only point at earlier sections is
//!   valid, and its computed execution order respects every edge.
//! - Injecting a back-edge that closes a loop is always rejected.

use dossier_plan::{Catalog, ConfigurationError, PlanBuilder, SectionGraph};
use dossier_types::{Phase, SectionId, SectionSpec};
use proptest::prelude::*;

/// Generate an acyclic catalog: section `i` may depend on any subset of
/// sections `0..i`.
fn arb_acyclic_sections() -> impl Strategy<Value = Vec<SectionSpec>> {
    (2usize..12)
        .prop_flat_map(|n| {
            let deps = (0..n)
                .map(|i| proptest::collection::vec(0..i.max(1), 0..=i.min(3)))
                .collect::<Vec<_>>();
            (Just(n), deps)
        })
        .prop_map(|(n, deps)| {
            (0..n)
                .map(|i| {
                    let mut dep_ids: Vec<usize> = deps[i].clone();
                    dep_ids.retain(|d| *d < i);
                    dep_ids.sort_unstable();
                    dep_ids.dedup();
                    SectionSpec::new(
                        format!("S_{i:02}"),
                        format!("Section {i}"),
                        Phase::Engineering,
                    )
                    .with_dependencies(dep_ids.into_iter().map(|d| format!("S_{d:02}")))
                })
                .collect()
        })
}

fn register(sections: Vec<SectionSpec>) -> PlanBuilder {
    let mut builder = PlanBuilder::empty();
    builder.register(Catalog {
        document_type: "GEN".into(),
        sections,
        propagation_rules: Vec::new(),
    });
    builder
}

proptest! {
    #[test]
    fn generated_catalogs_validate_and_order_respects_edges(sections in arb_acyclic_sections()) {
        let builder = register(sections.clone());
        let plan = builder.generate_plan("p", "GEN").expect("acyclic catalog must validate");

        let graph = SectionGraph::from_sections(&plan.sections).unwrap();
        let order = graph.topological_sort().unwrap();
        prop_assert_eq!(order.len(), sections.len());

        let position = |id: &SectionId| order.iter().position(|s| s == id).unwrap();
        for (dependency, dependent) in &plan.edges {
            prop_assert!(
                position(dependency) < position(dependent),
                "{} must come strictly before {}",
                dependency,
                dependent
            );
        }
    }

    #[test]
    fn closing_a_loop_is_always_rejected(mut sections in arb_acyclic_sections()) {
        // Make the first section depend on the last, closing a cycle
        // through every chain that reaches the last section; ensure the
        // last actually (transitively) depends on the first by adding a
        // direct edge when absent.
        let first = sections.first().unwrap().id.clone();
        let last = sections.last().unwrap().id.clone();
        prop_assume!(first != last);

        let n = sections.len();
        if !sections[n - 1].dependency_ids.contains(&first) {
            sections[n - 1].dependency_ids.push(first);
        }
        sections[0].dependency_ids.push(last);

        let builder = register(sections);
        let err = builder.generate_plan("p", "GEN").unwrap_err();
        prop_assert!(matches!(err, ConfigurationError::CycleDetected(_)));
    }
}

#[test]
fn builtin_sic_order_places_every_dependency_first() {
    let plan = PlanBuilder::new().generate_plan("9", "SIC").unwrap();
    let order = SectionGraph::from_sections(&plan.sections)
        .unwrap()
        .topological_sort()
        .unwrap();
    let position = |id: &SectionId| order.iter().position(|s| s == id).unwrap();
    for (dependency, dependent) in &plan.edges {
        assert!(position(dependency) < position(dependent));
    }
}
