//! Incremental graph builder.

use std::collections::HashMap;

use fp_core::{FpResult, ReachId};

use crate::graph::{Edge, ReachGraph};
use crate::validate;

/// Builder for constructing a reach graph incrementally.
///
/// Use `add_edge` to append from-to rows, then call `build()` to validate
/// and freeze them into an immutable `ReachGraph`.
#[derive(Debug, Default)]
pub struct ReachGraphBuilder {
    edges: Vec<Edge>,
}

impl ReachGraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `from` flows into `to`.
    pub fn add_edge(&mut self, from: impl Into<ReachId>, to: impl Into<ReachId>) -> &mut Self {
        self.edges.push(Edge::new(from, to));
        self
    }

    /// Append an already constructed edge.
    pub fn push(&mut self, edge: Edge) -> &mut Self {
        self.edges.push(edge);
        self
    }

    /// Number of edges recorded so far.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// True if no edges have been recorded.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Validate and index the edges, returning an immutable `ReachGraph`.
    pub fn build(self) -> FpResult<ReachGraph> {
        validate::validate_edges(&self.edges)?;

        let (upstream, downstream) = Self::build_adjacency(&self.edges);

        Ok(ReachGraph {
            edges: self.edges,
            upstream,
            downstream,
        })
    }

    /// Index every edge by its `to` (upstream lookup) and `from` (downstream lookup).
    #[allow(clippy::type_complexity)]
    fn build_adjacency(
        edges: &[Edge],
    ) -> (
        HashMap<ReachId, Vec<ReachId>>,
        HashMap<ReachId, Vec<ReachId>>,
    ) {
        let mut upstream: HashMap<ReachId, Vec<ReachId>> = HashMap::new();
        let mut downstream: HashMap<ReachId, Vec<ReachId>> = HashMap::new();

        for edge in edges {
            upstream
                .entry(edge.to.clone())
                .or_default()
                .push(edge.from.clone());
            downstream
                .entry(edge.from.clone())
                .or_default()
                .push(edge.to.clone());
        }

        (upstream, downstream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let mut builder = ReachGraphBuilder::new();
        builder.add_edge(1, 2).add_edge(2, 3);

        assert_eq!(builder.len(), 2);
        assert!(!builder.is_empty());
    }

    #[test]
    fn builder_build_simple() {
        let mut builder = ReachGraphBuilder::new();
        builder.add_edge("a", "b");
        builder.push(Edge::new("c", "b"));

        let graph = builder.build().unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.upstream_of(&"b".into()).len(), 2);
    }

    #[test]
    fn builder_rejects_empty() {
        let err = ReachGraphBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("length zero"));
    }

    #[test]
    fn duplicate_edges_are_kept() {
        let mut builder = ReachGraphBuilder::new();
        builder.add_edge(1, 2).add_edge(1, 2);
        let graph = builder.build().unwrap();
        assert_eq!(graph.upstream_of(&2.into()).len(), 2);
    }
}
