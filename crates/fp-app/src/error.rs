//! Error types for the fp-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Study error: {0}")]
    Study(String),

    #[error("Failed to read study file: {path}")]
    StudyFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Study validation failed: {0}")]
    Validation(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fp-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<fp_project::ProjectError> for AppError {
    fn from(err: fp_project::ProjectError) -> Self {
        match err {
            fp_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Study(other.to_string()),
        }
    }
}

impl From<fp_core::FpError> for AppError {
    fn from(err: fp_core::FpError) -> Self {
        if err.is_invalid_input() {
            AppError::InvalidInput(err.to_string())
        } else {
            AppError::Model(err.to_string())
        }
    }
}

impl From<fp_results::ResultsError> for AppError {
    fn from(err: fp_results::ResultsError) -> Self {
        match err {
            fp_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
