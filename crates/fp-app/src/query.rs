//! Query helpers for loaded runs.

use std::collections::HashSet;

use fp_results::{OriginTable, combine_by_reach};

use crate::error::{AppError, AppResult};

/// Summary of a run's result tables.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub origin_count: usize,
    pub record_count: usize,
    pub distinct_reaches: usize,
    pub largest_table: usize,
}

pub fn get_run_summary(tables: &[OriginTable]) -> AppResult<RunSummary> {
    if tables.is_empty() {
        return Err(AppError::InvalidInput("No origin tables in run".to_string()));
    }

    let distinct: HashSet<_> = tables
        .iter()
        .flat_map(|t| t.rows.iter().map(|r| &r.reach))
        .collect();

    Ok(RunSummary {
        origin_count: tables.len(),
        record_count: tables.iter().map(OriginTable::len).sum(),
        distinct_reaches: distinct.len(),
        largest_table: tables.iter().map(OriginTable::len).max().unwrap_or(0),
    })
}

/// The table of a single origin.
pub fn find_table<'a>(tables: &'a [OriginTable], origin: &str) -> AppResult<&'a OriginTable> {
    tables
        .iter()
        .find(|t| t.origin.as_str() == origin)
        .ok_or_else(|| AppError::InvalidInput(format!("No table for origin '{}'", origin)))
}

/// `origin,reach,remaining_pct` rows for every table.
///
/// Reach IDs are free text, so fields are quoted wherever CSV needs it.
pub fn tables_csv(tables: &[OriginTable]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["origin", "reach", "remaining_pct"])?;
    for table in tables {
        for row in &table.rows {
            let pct = row.remaining_pct.to_string();
            writer.write_record([table.origin.as_str(), row.reach.as_str(), pct.as_str()])?;
        }
    }
    finish_csv(writer)
}

/// `reach,remaining_pct` rows summed across all tables.
pub fn combined_csv(tables: &[OriginTable]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["reach", "remaining_pct"])?;
    for row in combine_by_reach(tables) {
        let pct = row.remaining_pct.to_string();
        writer.write_record([row.reach.as_str(), pct.as_str()])?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> AppResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::Io(err.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|err| AppError::InvalidInput(format!("CSV output is not UTF-8: {}", err)))
}
