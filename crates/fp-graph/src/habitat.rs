//! Habitat subnetwork pruning.
//!
//! Dropping every from-to row whose upstream reach is not habitat means an
//! upstream lookup never returns a non-habitat reach, so traversal halts at
//! the first unsuitable reach without any special casing in the model.

use std::collections::HashSet;

use fp_core::{FpResult, ReachId};

use crate::error::GraphError;
use crate::graph::ReachGraph;

impl ReachGraph {
    /// Restrict the graph to edges whose upstream (`from`) reach is habitat.
    pub fn habitat_subnetwork(&self, habitat: &HashSet<ReachId>) -> FpResult<ReachGraph> {
        if habitat.is_empty() {
            return Err(GraphError::EmptyHabitat.into());
        }

        let kept: Vec<_> = self
            .edges
            .iter()
            .filter(|edge| habitat.contains(&edge.from))
            .cloned()
            .collect();

        if kept.is_empty() {
            return Err(GraphError::NoHabitatEdges {
                habitat: habitat.len(),
            }
            .into());
        }

        ReachGraph::from_edges(kept.into_iter().map(|edge| (edge.from, edge.to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[u64]) -> HashSet<ReachId> {
        values.iter().map(|&v| ReachId::from(v)).collect()
    }

    #[test]
    fn pruned_reach_disappears_upstream() {
        // 1 <- 2 <- 3, 2 also fed by 4
        let graph = ReachGraph::from_edges([(2, 1), (3, 2), (4, 2)]).unwrap();
        let pruned = graph.habitat_subnetwork(&ids(&[1, 2, 3])).unwrap();

        assert_eq!(pruned.edge_count(), 2);
        assert_eq!(pruned.upstream_of(&ReachId::from(2)), &[ReachId::from(3)]);
    }

    #[test]
    fn empty_habitat_is_invalid() {
        let graph = ReachGraph::from_edges([(2, 1)]).unwrap();
        assert!(graph.habitat_subnetwork(&HashSet::new()).is_err());
    }

    #[test]
    fn habitat_without_edges_is_invalid() {
        let graph = ReachGraph::from_edges([(2, 1)]).unwrap();
        let err = graph.habitat_subnetwork(&ids(&[1])).unwrap_err();
        assert!(err.to_string().contains("habitat"));
    }
}
