//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use fp_passage::{PassageModel, PassageResults};
use fp_results::{OriginTable, ReachRow, RunManifest, RunStore};
use tracing::info;

use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage};
use crate::study_service;

/// Version string mixed into run IDs; a new model version invalidates the cache.
pub const MODEL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for running the model.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub model_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            model_version: MODEL_VERSION.to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub study_path: &'a Path,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub tables: Vec<OriginTable>,
    pub loaded_from_cache: bool,
    pub elapsed_s: f64,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingStudy,
        started,
        Some("Loading study".to_string()),
    );
    let study = study_service::load_study(request.study_path)?;

    emit_progress(
        &mut progress_cb,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
    );
    let run_id = fp_results::compute_run_id(&study, &request.options.model_version)?;
    let store = RunStore::for_study(request.study_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            Some("Loading cached run".to_string()),
        );
        let manifest = store.load_manifest(&run_id)?;
        let tables = store.load_tables(&run_id)?;
        info!(run_id = %run_id, "Loaded cached run");

        emit_progress(&mut progress_cb, RunStage::Completed, started, None);
        return Ok(RunResponse {
            run_id,
            manifest,
            tables,
            loaded_from_cache: true,
            elapsed_s: started.elapsed().as_secs_f64(),
        });
    }

    emit_progress(
        &mut progress_cb,
        RunStage::ResolvingOrigins,
        started,
        Some("Resolving origins".to_string()),
    );
    let compiled = study_service::compile_study(&study)?;
    let origins = study_service::resolve_origins(&study, &compiled)?;

    emit_progress(
        &mut progress_cb,
        RunStage::RunningModel,
        started,
        Some(format!("Tracing {} origins", origins.len())),
    );
    let model = PassageModel::new(
        &compiled.passage_graph,
        &compiled.restrictions,
        &compiled.splitting,
        compiled.params,
    )?;
    let results = model.run(&origins)?;
    let tables = results_to_tables(&results);

    emit_progress(
        &mut progress_cb,
        RunStage::SavingResults,
        started,
        Some("Saving results".to_string()),
    );
    let manifest = RunManifest {
        run_id: run_id.clone(),
        study_name: study.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        model_version: request.options.model_version.clone(),
        parameters: study.parameters.clone(),
        origin_count: tables.len(),
        record_count: results.total_records(),
    };
    store.save_run(&manifest, &tables)?;
    info!(run_id = %run_id, origins = manifest.origin_count, "Saved run");

    emit_progress(&mut progress_cb, RunStage::Completed, started, None);
    Ok(RunResponse {
        run_id,
        manifest,
        tables,
        loaded_from_cache: false,
        elapsed_s: started.elapsed().as_secs_f64(),
    })
}

/// One table per origin, in origin order.
pub fn results_to_tables(results: &PassageResults) -> Vec<OriginTable> {
    results
        .iter()
        .map(|result| {
            let rows = result
                .to_table()
                .into_iter()
                .map(|(reach, remaining_pct)| ReachRow {
                    reach,
                    remaining_pct,
                })
                .collect();
            OriginTable::new(result.origin().clone(), rows)
        })
        .collect()
}

/// List cached runs for a study, most recent first.
pub fn list_runs(study_path: &Path) -> AppResult<Vec<RunManifest>> {
    let study = study_service::load_study(study_path)?;
    let store = RunStore::for_study(study_path)?;

    let mut runs = store.list_runs(&study.name)?;
    runs.reverse();
    Ok(runs)
}

/// Load a specific run.
pub fn load_run(study_path: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<OriginTable>)> {
    let store = RunStore::for_study(study_path)?;

    let manifest = store.load_manifest(run_id)?;
    let tables = store.load_tables(run_id)?;

    Ok((manifest, tables))
}
