//! fp-core: stable foundation for fishpass.
//!
//! Contains:
//! - ids (opaque reach identifiers)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FpError, FpResult};
pub use ids::*;
pub use numeric::*;
