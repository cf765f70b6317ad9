//! Network preparation for passage modelling.
//!
//! Before population can be pushed upstream the network needs starting
//! points. This crate derives them in two steps over a [`ReachGraph`]:
//!
//! 1. [`find_main_stems`] walks each hydrologic unit from where flow enters
//!    it to where flow leaves it, collecting the pass-through "main stem".
//! 2. [`find_origins`] picks every non-main-stem reach that drains straight
//!    into a main stem: the mouths of the tributaries.
//!
//! Both steps are optional. Callers that already know their main stems or
//! origins (stream order, stream name, manual GIS work) can skip them.
//!
//! [`ReachGraph`]: fp_graph::ReachGraph

pub mod main_stem;
pub mod origins;
pub mod units;

pub use main_stem::{MainStemSet, find_main_stems, units_with_main_stem};
pub use origins::{OriginSet, find_origins};
pub use units::{HydroUnits, UnitId};
