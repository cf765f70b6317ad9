//! Study validation logic.

use std::collections::{HashMap, HashSet};

use fp_core::ReachId;

use crate::schema::{OriginSource, SplittingDef, Study};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Empty table: {what}")]
    Empty { what: String },

    #[error("No origin source: list origins, main_stems, or units")]
    NoOriginSource,

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_study(study: &Study) -> Result<(), ValidationError> {
    if study.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: study.version,
        });
    }

    if study.network.edges.is_empty() {
        return Err(empty("network.edges"));
    }
    let reaches: HashSet<&ReachId> = study
        .network
        .edges
        .iter()
        .flat_map(|e| [&e.from, &e.to])
        .collect();

    if let Some(habitat) = &study.network.habitat {
        if habitat.is_empty() {
            return Err(empty("network.habitat"));
        }
    }

    if study.restrictions.is_empty() {
        return Err(empty("restrictions"));
    }

    validate_parameters(study)?;
    validate_splitting(&study.splitting)?;
    validate_units(study)?;

    match study.origin_source() {
        OriginSource::Explicit => {
            let origins = study.origins.as_deref().unwrap_or_default();
            validate_reach_list(origins, &reaches, "origins")?;
        }
        OriginSource::MainStems => {
            let main_stems = study.main_stems.as_deref().unwrap_or_default();
            validate_reach_list(main_stems, &reaches, "main_stems")?;
        }
        OriginSource::Units => {}
        OriginSource::Missing => return Err(ValidationError::NoOriginSource),
    }

    Ok(())
}

fn empty(what: &str) -> ValidationError {
    ValidationError::Empty {
        what: what.to_string(),
    }
}

fn validate_parameters(study: &Study) -> Result<(), ValidationError> {
    let params = &study.parameters;
    if !params.pass_rate.is_finite() || !(0.0..=100.0).contains(&params.pass_rate) {
        return Err(ValidationError::InvalidValue {
            field: "parameters.pass_rate".to_string(),
            value: params.pass_rate.to_string(),
            reason: "must be between 0 and 100".to_string(),
        });
    }
    if !params.cutoff.is_finite() || !(1.0..=100.0).contains(&params.cutoff) {
        return Err(ValidationError::InvalidValue {
            field: "parameters.cutoff".to_string(),
            value: params.cutoff.to_string(),
            reason: "must be between 1 and 100".to_string(),
        });
    }
    if params.max_steps == Some(0) {
        return Err(ValidationError::InvalidValue {
            field: "parameters.max_steps".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_splitting(splitting: &SplittingDef) -> Result<(), ValidationError> {
    let values = match splitting {
        SplittingDef::None => return Ok(()),
        SplittingDef::Proportional { values, .. } => values,
    };

    if values.is_empty() {
        return Err(empty("splitting.values"));
    }

    let mut seen = HashSet::new();
    for entry in values {
        if !seen.insert(&entry.reach) {
            return Err(ValidationError::DuplicateId {
                id: entry.reach.to_string(),
                context: "splitting.values".to_string(),
            });
        }
        if !entry.value.is_finite() || entry.value < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: format!("splitting.values[{}]", entry.reach),
                value: entry.value.to_string(),
                reason: "must be a finite, non-negative number".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_units(study: &Study) -> Result<(), ValidationError> {
    let mut unit_of: HashMap<&ReachId, &str> = HashMap::new();
    for member in &study.units {
        match unit_of.get(&member.reach) {
            Some(unit) if *unit != member.unit => {
                return Err(ValidationError::DuplicateId {
                    id: member.reach.to_string(),
                    context: format!("units '{}' and '{}'", unit, member.unit),
                });
            }
            Some(_) => {}
            None => {
                unit_of.insert(&member.reach, &member.unit);
            }
        }
    }
    Ok(())
}

fn validate_reach_list(
    list: &[ReachId],
    reaches: &HashSet<&ReachId>,
    context: &str,
) -> Result<(), ValidationError> {
    if list.is_empty() {
        return Err(empty(context));
    }
    for reach in list {
        if !reaches.contains(reach) {
            return Err(ValidationError::MissingReference {
                id: reach.to_string(),
                context: context.to_string(),
            });
        }
    }
    Ok(())
}
