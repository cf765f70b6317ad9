//! Core graph data structures.

use std::collections::HashMap;

use fp_core::{FpResult, ReachId};

use crate::builder::ReachGraphBuilder;

/// A directed "flows into" relation: reach `from` drains into reach `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: ReachId,
    pub to: ReachId,
}

impl Edge {
    /// Create a new edge.
    pub fn new(from: impl Into<ReachId>, to: impl Into<ReachId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// The reach graph: an immutable from-to table indexed by both endpoints.
///
/// The graph is normally a forest in the downstream direction, but nothing
/// here relies on that: braided reaches may have several downstream edges,
/// and duplicate edges are kept as given. Lookups for reaches that never
/// appear in the table return empty slices.
#[derive(Debug, Clone)]
pub struct ReachGraph {
    pub(crate) edges: Vec<Edge>,

    /// `to` -> every `from` draining into it, in edge order.
    pub(crate) upstream: HashMap<ReachId, Vec<ReachId>>,

    /// `from` -> every `to` it drains into, in edge order.
    pub(crate) downstream: HashMap<ReachId, Vec<ReachId>>,
}

impl ReachGraph {
    /// Build a graph from `(from, to)` pairs.
    ///
    /// Fails with `InvalidInput` if no pairs are supplied.
    pub fn from_edges<I, A, B>(pairs: I) -> FpResult<Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<ReachId>,
        B: Into<ReachId>,
    {
        let mut builder = ReachGraphBuilder::new();
        for (from, to) in pairs {
            builder.add_edge(from, to);
        }
        builder.build()
    }

    /// Return all edges in input order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Reaches that flow directly into `reach` (its upstream neighbours).
    pub fn upstream_of(&self, reach: &ReachId) -> &[ReachId] {
        self.upstream.get(reach).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Reaches that `reach` flows directly into.
    pub fn downstream_of(&self, reach: &ReachId) -> &[ReachId] {
        self.downstream.get(reach).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if `reach` appears on either side of any edge.
    pub fn contains(&self, reach: &ReachId) -> bool {
        self.upstream.contains_key(reach) || self.downstream.contains_key(reach)
    }

    /// Iterate over every distinct reach mentioned by the edge table.
    pub fn reaches(&self) -> impl Iterator<Item = &ReachId> {
        self.downstream.keys().chain(
            self.upstream
                .keys()
                .filter(|r| !self.downstream.contains_key(*r)),
        )
    }

    /// Number of distinct reaches mentioned by the edge table.
    pub fn reach_count(&self) -> usize {
        self.reaches().count()
    }
}
