//! Shared application service layer for fishpass.
//!
//! Front ends (currently the CLI) go through this crate to load studies,
//! resolve origins, run the passage model with caching, and query stored
//! results.

pub mod error;
pub mod progress;
pub mod query;
pub mod run_service;
pub mod study_service;

pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};
pub use query::{RunSummary, combined_csv, find_table, get_run_summary, tables_csv};
pub use run_service::{
    MODEL_VERSION, RunOptions, RunRequest, RunResponse, ensure_run, ensure_run_with_progress,
    list_runs, load_run, results_to_tables,
};
pub use study_service::{
    CompiledStudy, StudySummary, compile_study, load_study, resolve_main_stems, resolve_origins,
    summarize_study,
};
