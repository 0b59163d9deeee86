//! Directory provisioning under the overwrite policy.
//!
//! A per-file target that already holds a `metadata.yaml` is a finished
//! conversion: it is only replaced when the caller passes `overwrite`.
//! A non-empty target without one is leftover from an interrupted run and is
//! always reclaimed.
//!
//! Planning and clearing are separate steps so the caller can convert first
//! and only clear the target once there is something to put in it.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::descriptor::PROJECT_KEY;
use crate::errors::CoreError;
use crate::layout::{ConversionJob, OutputLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provisioned {
    /// Target did not exist or was empty.
    Fresh,
    /// Finished output was removed because `overwrite` was set.
    Replaced,
    /// Partial output without a descriptor was removed.
    Reclaimed,
}

/// Fail unless `path` is an existing directory.
///
/// # Errors
///
/// Returns [`CoreError::MissingDirectory`] when the path is absent or not a
/// directory.
pub fn require_dir(path: &Path, role: &'static str) -> Result<(), CoreError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CoreError::MissingDirectory {
            role,
            path: path.to_path_buf(),
        })
    }
}

/// Create the `input/` and `vlmd/` directories for a study.
///
/// # Errors
///
/// Returns [`CoreError::Io`] if a directory cannot be created.
pub fn provision_study(layout: &OutputLayout) -> Result<(), CoreError> {
    for dir in [&layout.input_dir, &layout.vlmd_dir] {
        fs::create_dir_all(dir).map_err(|e| CoreError::io(dir, e))?;
    }
    tracing::debug!(study_dir = %layout.study_dir.display(), "provisioned study directories");
    Ok(())
}

/// Decide what preparing `job`'s output directory involves, without
/// touching the filesystem.
///
/// # Errors
///
/// Returns [`CoreError::Conflict`] when finished output exists and
/// `overwrite` is false, or [`CoreError::ReservedFolder`] when the folder
/// name would clash with the descriptor's `Project` key.
pub fn plan_job(job: &ConversionJob, overwrite: bool) -> Result<Provisioned, CoreError> {
    if job.folder_name == PROJECT_KEY {
        return Err(CoreError::ReservedFolder {
            folder: job.folder_name.clone(),
        });
    }
    if !has_entries(&job.output_dir)? {
        return Ok(Provisioned::Fresh);
    }
    let finished = job.metadata_path.exists();
    match (finished, overwrite) {
        (true, false) => Err(CoreError::Conflict {
            path: job.output_dir.clone(),
        }),
        (true, true) => Ok(Provisioned::Replaced),
        (false, _) => Ok(Provisioned::Reclaimed),
    }
}

/// Clear and recreate `job`'s output directory as decided by [`plan_job`].
///
/// # Errors
///
/// Returns [`CoreError::Io`] if the directory cannot be removed or created.
pub fn apply_plan(job: &ConversionJob, plan: Provisioned) -> Result<(), CoreError> {
    let dir = &job.output_dir;
    match plan {
        Provisioned::Fresh => {}
        Provisioned::Replaced => {
            fs::remove_dir_all(dir).map_err(|e| CoreError::io(dir, e))?;
            tracing::info!(dir = %dir.display(), "removed previous output");
        }
        Provisioned::Reclaimed => {
            fs::remove_dir_all(dir).map_err(|e| CoreError::io(dir, e))?;
            tracing::warn!(
                dir = %dir.display(),
                "found output without metadata.yaml; treating it as incomplete and replacing it"
            );
        }
    }
    fs::create_dir_all(dir).map_err(|e| CoreError::io(dir, e))
}

fn has_entries(dir: &Path) -> Result<bool, CoreError> {
    match fs::read_dir(dir) {
        Ok(mut entries) => Ok(entries.next().is_some()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CoreError::io(dir, e)),
    }
}
