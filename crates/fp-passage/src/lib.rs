//! Upstream passage model for branching river networks.
//!
//! Starting at each origin with a population of 100 percent, the model walks
//! upstream through a [`ReachGraph`](fp_graph::ReachGraph) breadth first:
//! - every restriction on a reach multiplies the surviving percentage by the
//!   per-restriction pass rate
//! - at a confluence the population is split across the upstream branches,
//!   either proportionally to a continuous reach attribute or not at all
//! - a branch whose surviving percentage is not strictly above the cutoff is
//!   dropped together with everything upstream of it
//!
//! Origins are independent of one another and are traced in parallel.

pub mod model;
pub mod params;
pub mod restrictions;
pub mod results;
pub mod splitting;

pub use model::{PassageModel, run_passage_model};
pub use params::{DEFAULT_MAX_STEPS, INITIAL_POPULATION, PassageParams};
pub use restrictions::RestrictionTable;
pub use results::{PassageResult, PassageResults, ReachFraction};
pub use splitting::{AttributeValues, SplittingAttribute};
