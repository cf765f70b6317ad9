//! Origin identification: where population leaves a main stem and heads up
//! a tributary.

use fp_core::{FpError, FpResult, ReachSet};
use fp_graph::ReachGraph;
use tracing::info;

use crate::main_stem::MainStemSet;

/// Reaches from which upstream propagation starts.
pub type OriginSet = ReachSet;

/// Find every reach that drains into a main stem without being one itself.
///
/// A single scan over the from-to table; no traversal state.
pub fn find_origins(main_stems: &MainStemSet, graph: &ReachGraph) -> FpResult<OriginSet> {
    if main_stems.is_empty() {
        return Err(FpError::invalid("main stem set has length zero"));
    }
    if graph.edge_count() == 0 {
        return Err(FpError::invalid("from-to edge set has length zero"));
    }

    let origins: OriginSet = graph
        .edges()
        .iter()
        .filter(|edge| main_stems.contains(&edge.to) && !main_stems.contains(&edge.from))
        .map(|edge| edge.from.clone())
        .collect();

    info!(
        origins = origins.len(),
        "Found unique origin reaches flowing into main stems"
    );
    Ok(origins)
}
