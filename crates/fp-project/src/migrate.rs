//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Study;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut study: Study) -> Result<Study, ProjectError> {
    while study.version < LATEST_VERSION {
        study = migrate_one_version(study)?;
    }
    Ok(study)
}

fn migrate_one_version(study: Study) -> Result<Study, ProjectError> {
    match study.version {
        0 => migrate_v0_to_v1(study),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files predate the version field; the layout is unchanged.
fn migrate_v0_to_v1(mut study: Study) -> Result<Study, ProjectError> {
    study.version = 1;
    Ok(study)
}
