use thiserror::Error;

use crate::ids::ReachId;

pub type FpResult<T> = Result<T, FpError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FpError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// The traversal hit its step cap. Either the network has a cycle or a
    /// braided network has more upstream paths than the cap allows.
    #[error(
        "Traversal upstream of origin {origin} exceeded {steps} steps: the network has a cycle, or braids multiply its paths past the step cap"
    )]
    CycleSuspected { origin: ReachId, steps: usize },
}

impl FpError {
    /// Shorthand for building an `InvalidInput` error.
    pub fn invalid(what: impl Into<String>) -> Self {
        FpError::InvalidInput { what: what.into() }
    }

    /// True for every validation failure (including non-finite numbers).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            FpError::InvalidInput { .. } | FpError::NonFinite { .. }
        )
    }
}
