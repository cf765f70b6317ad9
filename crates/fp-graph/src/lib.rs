//! fp-graph: reach network layer for fishpass.
//!
//! Provides:
//! - The immutable `ReachGraph` built from "from -> to" reach pairs
//! - Upstream/downstream lookups indexed by both endpoints
//! - Habitat subnetwork pruning
//!
//! # Example
//!
//! ```
//! use fp_core::ReachId;
//! use fp_graph::ReachGraph;
//!
//! // 3 and 4 join at 2, which flows into 1
//! let graph = ReachGraph::from_edges([(3, 2), (4, 2), (2, 1)]).unwrap();
//!
//! assert_eq!(graph.upstream_of(&ReachId::from(2)).len(), 2);
//! assert_eq!(graph.downstream_of(&ReachId::from(2)), &[ReachId::from(1)]);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod habitat;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::ReachGraphBuilder;
pub use error::GraphError;
pub use graph::{Edge, ReachGraph};
