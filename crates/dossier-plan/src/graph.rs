//! Dependency graph over section ids
//!
//! Thin wrapper around petgraph that keeps the id-to-node mapping and
//! exposes the operations the scheduler needs. The execution order is
//! always a computed topological sort; catalog declaration order is never
//! trusted to agree with the dependency edges.

use crate::error::ConfigurationError;
use dossier_types::{SectionId, SectionSpec};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// Directed acyclic graph of section dependencies
///
/// Edges point from a dependency to its dependent, so a topological sort
/// yields a valid execution order.
#[derive(Debug, Clone)]
pub struct SectionGraph {
    inner: DiGraph<SectionId, ()>,
    nodes: HashMap<SectionId, NodeIndex>,
}

impl SectionGraph {
    /// Build the graph from validated section specs
    ///
    /// Assumes ids are unique and dependencies declared; those invariants
    /// are checked by the plan builder before this runs. Cycles are still
    /// detected here.
    pub fn from_sections(sections: &[SectionSpec]) -> Result<Self, ConfigurationError> {
        let mut inner = DiGraph::new();
        let mut nodes = HashMap::with_capacity(sections.len());

        for spec in sections {
            let idx = inner.add_node(spec.id.clone());
            nodes.insert(spec.id.clone(), idx);
        }
        for spec in sections {
            let to = nodes[&spec.id];
            for dep in &spec.dependency_ids {
                let from = *nodes
                    .get(dep)
                    .ok_or_else(|| ConfigurationError::UnknownDependency {
                        section: spec.id.clone(),
                        dependency: dep.clone(),
                    })?;
                inner.add_edge(from, to, ());
            }
        }

        let graph = Self { inner, nodes };
        // Surface cycles at construction so no caller holds a cyclic graph
        graph.topological_sort()?;
        Ok(graph)
    }

    /// Compute an explicit topological execution order
    pub fn topological_sort(&self) -> Result<Vec<SectionId>, ConfigurationError> {
        match toposort(&self.inner, None) {
            Ok(order) => Ok(order.into_iter().map(|i| self.inner[i].clone()).collect()),
            Err(cycle) => Err(ConfigurationError::CycleDetected(
                self.inner[cycle.node_id()].clone(),
            )),
        }
    }

    /// Sections with no dependencies (schedulable immediately)
    #[must_use]
    pub fn entry_nodes(&self) -> Vec<SectionId> {
        self.inner
            .node_indices()
            .filter(|i| {
                self.inner
                    .neighbors_directed(*i, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|i| self.inner[i].clone())
            .collect()
    }

    /// Declared dependencies of a section
    #[must_use]
    pub fn dependencies(&self, id: &SectionId) -> Vec<SectionId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Sections that depend on the given one
    #[must_use]
    pub fn dependents(&self, id: &SectionId) -> Vec<SectionId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Number of sections
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of dependency edges
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn neighbors(&self, id: &SectionId, direction: Direction) -> Vec<SectionId> {
        let Some(&idx) = self.nodes.get(id) else {
            return Vec::new();
        };
        self.inner
            .neighbors_directed(idx, direction)
            .map(|i| self.inner[i].clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dossier_types::Phase;

    fn diamond() -> Vec<SectionSpec> {
        vec![
            SectionSpec::new("A", "Root", Phase::Justification),
            SectionSpec::new("B", "Left", Phase::Engineering).with_dependencies(["A"]),
            SectionSpec::new("C", "Right", Phase::Engineering).with_dependencies(["A"]),
            SectionSpec::new("D", "Join", Phase::Integration).with_dependencies(["B", "C"]),
        ]
    }

    #[test]
    fn toposort_respects_edges() {
        let graph = SectionGraph::from_sections(&diamond()).unwrap();
        let order = graph.topological_sort().unwrap();
        let pos = |id: &str| order.iter().position(|s| s.as_str() == id).unwrap();
        assert!(pos("A") < pos("B"));
        assert!(pos("A") < pos("C"));
        assert!(pos("B") < pos("D"));
        assert!(pos("C") < pos("D"));
    }

    #[test]
    fn entry_nodes_have_no_dependencies() {
        let graph = SectionGraph::from_sections(&diamond()).unwrap();
        assert_eq!(graph.entry_nodes(), vec![SectionId::new("A")]);
    }

    #[test]
    fn dependents_and_dependencies() {
        let graph = SectionGraph::from_sections(&diamond()).unwrap();
        let mut deps = graph.dependencies(&SectionId::new("D"));
        deps.sort();
        assert_eq!(deps, vec![SectionId::new("B"), SectionId::new("C")]);
        let mut dependents = graph.dependents(&SectionId::new("A"));
        dependents.sort();
        assert_eq!(dependents, vec![SectionId::new("B"), SectionId::new("C")]);
    }

    #[test]
    fn cycle_is_rejected_at_construction() {
        let sections = vec![
            SectionSpec::new("A", "A", Phase::Justification).with_dependencies(["B"]),
            SectionSpec::new("B", "B", Phase::Justification).with_dependencies(["A"]),
        ];
        let err = SectionGraph::from_sections(&sections).unwrap_err();
        assert!(matches!(err, ConfigurationError::CycleDetected(_)));
    }
}
