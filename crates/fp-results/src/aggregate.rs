//! Caller-side aggregation over origin tables.

use std::collections::BTreeMap;

use fp_core::ReachId;

use crate::types::{OriginTable, ReachRow};

/// Sum remaining percent per reach across every table.
///
/// In braided networks a reach can appear more than once within a table as
/// well as across tables; all of those rows are added. Output is ordered by
/// reach ID.
pub fn combine_by_reach(tables: &[OriginTable]) -> Vec<ReachRow> {
    let mut totals: BTreeMap<&ReachId, f64> = BTreeMap::new();
    for row in tables.iter().flat_map(|t| &t.rows) {
        *totals.entry(&row.reach).or_insert(0.0) += row.remaining_pct;
    }
    totals
        .into_iter()
        .map(|(reach, remaining_pct)| ReachRow {
            reach: reach.clone(),
            remaining_pct,
        })
        .collect()
}
