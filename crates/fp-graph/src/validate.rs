//! Graph validation logic.
//!
//! Only the shape of the edge table is checked. Self-loops, cycles and
//! hydrologic plausibility are left to the traversal guards.

use fp_core::FpResult;

use crate::error::GraphError;
use crate::graph::Edge;

/// Validate the edge table before indexing it.
pub(crate) fn validate_edges(edges: &[Edge]) -> FpResult<()> {
    if edges.is_empty() {
        return Err(GraphError::EmptyEdgeSet.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_empty_edges() {
        let result = validate_edges(&[]);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_invalid_input());
    }

    #[test]
    fn self_loop_is_not_rejected() {
        let edges = vec![Edge::new(1, 1)];
        assert!(validate_edges(&edges).is_ok());
    }
}
