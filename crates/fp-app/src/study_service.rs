//! Study loading, compilation into model inputs, and origin resolution.

use std::collections::HashSet;
use std::path::Path;

use fp_core::{ReachId, ReachSet};
use fp_graph::ReachGraph;
use fp_network::{HydroUnits, MainStemSet, OriginSet, find_main_stems, find_origins};
use fp_passage::{AttributeValues, PassageParams, RestrictionTable, SplittingAttribute};
use fp_project::{OriginSource, ProjectError, SplittingDef, Study};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Summary of a study for listing.
#[derive(Debug, Clone)]
pub struct StudySummary {
    pub name: String,
    pub version: u32,
    pub edge_count: usize,
    pub reach_count: usize,
    pub restriction_count: usize,
    pub restricted_reaches: usize,
    pub unit_count: usize,
    pub habitat_reaches: Option<usize>,
    pub origin_source: OriginSource,
    pub splitting: String,
}

/// A study turned into the typed inputs of the network and passage crates.
#[derive(Debug, Clone)]
pub struct CompiledStudy {
    /// The full network; main stems and origins are found on this.
    pub network: ReachGraph,
    /// The network the model walks, pruned to habitat when one is given.
    pub passage_graph: ReachGraph,
    pub units: Option<HydroUnits>,
    pub restrictions: RestrictionTable,
    pub splitting: SplittingAttribute,
    pub params: PassageParams,
}

/// Load, migrate and validate a study file (YAML or JSON).
pub fn load_study(path: &Path) -> AppResult<Study> {
    fp_project::load_study(path).map_err(|err| match err {
        ProjectError::Io(source) => AppError::StudyFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

pub fn compile_study(study: &Study) -> AppResult<CompiledStudy> {
    let network = ReachGraph::from_edges(
        study
            .network
            .edges
            .iter()
            .map(|e| (e.from.clone(), e.to.clone())),
    )?;

    let passage_graph = match &study.network.habitat {
        Some(habitat) => {
            let habitat: HashSet<ReachId> = habitat.iter().cloned().collect();
            let pruned = network.habitat_subnetwork(&habitat)?;
            debug!(
                edges = network.edge_count(),
                kept = pruned.edge_count(),
                "Pruned network to habitat"
            );
            pruned
        }
        None => network.clone(),
    };

    let units = if study.units.is_empty() {
        None
    } else {
        Some(HydroUnits::from_rows(
            study
                .units
                .iter()
                .map(|m| (m.unit.as_str(), m.reach.clone())),
        )?)
    };

    let restrictions = RestrictionTable::from_rows(
        study
            .restrictions
            .iter()
            .map(|r| (r.reach.clone(), r.id.clone())),
    );

    let splitting = match &study.splitting {
        SplittingDef::None => SplittingAttribute::NoSplit,
        SplittingDef::Proportional { attribute, values } => {
            let mut values =
                AttributeValues::new(values.iter().map(|v| (v.reach.clone(), v.value)))?;
            if let Some(name) = attribute {
                values = values.named(name.clone());
            }
            SplittingAttribute::Proportional(values)
        }
    };

    let mut params = PassageParams::new(study.parameters.pass_rate, study.parameters.cutoff);
    if let Some(max_steps) = study.parameters.max_steps {
        params = params.with_max_steps(max_steps);
    }
    params.validate()?;

    Ok(CompiledStudy {
        network,
        passage_graph,
        units,
        restrictions,
        splitting,
        params,
    })
}

pub fn summarize_study(study: &Study, compiled: &CompiledStudy) -> StudySummary {
    StudySummary {
        name: study.name.clone(),
        version: study.version,
        edge_count: compiled.network.edge_count(),
        reach_count: compiled.network.reach_count(),
        restriction_count: compiled.restrictions.len(),
        restricted_reaches: compiled.restrictions.restricted_reaches(),
        unit_count: compiled.units.as_ref().map_or(0, HydroUnits::len),
        habitat_reaches: study.network.habitat.as_ref().map(Vec::len),
        origin_source: study.origin_source(),
        splitting: compiled.splitting.describe(),
    }
}

/// Main stems of the study: listed directly, or derived from its units.
pub fn resolve_main_stems(study: &Study, compiled: &CompiledStudy) -> AppResult<MainStemSet> {
    if let Some(main_stems) = &study.main_stems {
        return Ok(main_stems.iter().cloned().collect());
    }
    match &compiled.units {
        Some(units) => Ok(find_main_stems(units, &compiled.network)?),
        None => Err(AppError::InvalidInput(
            "study lists neither main_stems nor units".to_string(),
        )),
    }
}

/// Origins of the study, preferring explicit origins, then main stems, then
/// units.
pub fn resolve_origins(study: &Study, compiled: &CompiledStudy) -> AppResult<OriginSet> {
    let source = study.origin_source();
    let origins: ReachSet = match source {
        OriginSource::Explicit => study
            .origins
            .iter()
            .flatten()
            .cloned()
            .collect(),
        OriginSource::MainStems | OriginSource::Units => {
            let main_stems = resolve_main_stems(study, compiled)?;
            find_origins(&main_stems, &compiled.network)?
        }
        OriginSource::Missing => {
            return Err(AppError::Validation(
                "No origin source: list origins, main_stems, or units".to_string(),
            ));
        }
    };

    info!(origins = origins.len(), source = ?source, "Resolved origins");
    Ok(origins)
}
