//! Graph-specific error types.

use fp_core::FpError;

/// Reach graph construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No edges were supplied.
    EmptyEdgeSet,

    /// The habitat set passed for pruning was empty.
    EmptyHabitat,

    /// Pruning to the habitat subnetwork left no edges behind.
    NoHabitatEdges { habitat: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::EmptyEdgeSet => {
                write!(f, "from-to edge set has length zero")
            }
            GraphError::EmptyHabitat => {
                write!(f, "habitat reach set has length zero")
            }
            GraphError::NoHabitatEdges { habitat } => {
                write!(
                    f,
                    "none of the {} habitat reaches flows into another reach",
                    habitat
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for FpError {
    fn from(err: GraphError) -> Self {
        FpError::InvalidInput {
            what: err.to_string(),
        }
    }
}
