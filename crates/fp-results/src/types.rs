//! Result data types.

use fp_core::ReachId;
use fp_project::ParametersDef;
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub study_name: String,
    pub timestamp: String,
    pub model_version: String,
    pub parameters: ParametersDef,
    pub origin_count: usize,
    pub record_count: usize,
}

/// Remaining population (percent) at one reach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReachRow {
    pub reach: ReachId,
    pub remaining_pct: f64,
}

/// The result table of one origin, rows in discovery order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OriginTable {
    pub origin: ReachId,
    pub rows: Vec<ReachRow>,
}

impl OriginTable {
    pub fn new(origin: ReachId, rows: Vec<ReachRow>) -> Self {
        Self { origin, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
