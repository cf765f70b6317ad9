//! Content-based hashing for run IDs.

use fp_project::Study;
use sha2::{Digest, Sha256};

use crate::ResultsResult;

pub fn compute_run_id(study: &Study, model_version: &str) -> ResultsResult<String> {
    let mut hasher = Sha256::new();

    let study_json = serde_json::to_string(study)?;
    hasher.update(study_json.as_bytes());

    hasher.update(model_version.as_bytes());

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}
