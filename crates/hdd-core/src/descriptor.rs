//! Metadata YAML descriptors.
//!
//! Each converted file gets `vlmd/<folder>/metadata.yaml`; the study summary
//! at `vlmd/metadata.yaml` is rebuilt from all of them. Both share one shape:
//! a `Project` block plus one entry per data dictionary keyed by folder name.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::identity::StudyIdentity;
use crate::input_type::InputType;
use crate::layout::{
    ConversionJob, DATA_DICTIONARIES_DIR, INPUT_DIR, METADATA_FILE, OutputLayout, VLMD_DIR,
};

pub const DRAFT_STATUS: &str = "Draft";

/// Key of the study block; no per-file entry may use it.
pub const PROJECT_KEY: &str = "Project";

/// Study identity fields as they appear under the `Project` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBlock {
    #[serde(rename = "APPL_ID", default, skip_serializing_if = "Option::is_none")]
    pub appl_id: Option<String>,
    #[serde(rename = "Filename", default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(rename = "HDP_ID")]
    pub hdp_id: String,
    #[serde(rename = "LastModified")]
    pub last_modified: NaiveDate,
    #[serde(rename = "ProjectTitle")]
    pub project_title: String,
    #[serde(rename = "ProjectType")]
    pub project_type: String,
    #[serde(rename = "Status")]
    pub status: String,
}

impl ProjectBlock {
    #[must_use]
    pub fn new(identity: &StudyIdentity, filename: Option<String>, today: NaiveDate) -> Self {
        Self {
            appl_id: identity.appl_id.clone(),
            filename,
            hdp_id: identity.hdp_id.clone(),
            last_modified: today,
            project_title: identity.project_title.clone(),
            project_type: identity.project_type.clone(),
            status: DRAFT_STATUS.to_string(),
        }
    }
}

/// Where one data dictionary and its VLMD output live, both as published
/// repository URLs and relative to the `vlmd/` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    pub inputtype: InputType,
    pub input_filepath: String,
    pub output_filepath: String,
    pub relative_input_filepath: String,
    pub relative_output_filepath: String,
}

impl FileConfig {
    #[must_use]
    pub fn for_job(job: &ConversionJob, layout: &OutputLayout, repository_url: &str) -> Self {
        let study_url = format!(
            "{}/{DATA_DICTIONARIES_DIR}/{}",
            repository_url.trim_end_matches('/'),
            layout.study_name
        );
        let json_name = job.json_file_name();

        Self {
            inputtype: job.input_type,
            input_filepath: format!("{study_url}/{INPUT_DIR}/{}", job.file_name),
            output_filepath: format!("{study_url}/{VLMD_DIR}/{}/{json_name}", job.folder_name),
            relative_input_filepath: format!("../{INPUT_DIR}/{}", job.file_name),
            relative_output_filepath: format!("../{}/{json_name}", job.folder_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(rename = "Project")]
    pub project: ProjectBlock,
    #[serde(flatten)]
    pub files: BTreeMap<String, FileConfig>,
}

impl MetadataDocument {
    /// Descriptor for a single converted file.
    #[must_use]
    pub fn for_file(
        identity: &StudyIdentity,
        job: &ConversionJob,
        config: FileConfig,
        today: NaiveDate,
    ) -> Self {
        Self {
            project: ProjectBlock::new(identity, Some(job.folder_name.clone()), today),
            files: BTreeMap::from([(job.folder_name.clone(), config)]),
        }
    }

    /// Read a descriptor from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] or [`CoreError::Yaml`].
    pub fn read(path: &Path) -> Result<Self, CoreError> {
        let raw = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        serde_yaml::from_str(&raw).map_err(|source| CoreError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize the descriptor to `path`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Yaml`] or [`CoreError::Io`].
    pub fn write(&self, path: &Path) -> Result<(), CoreError> {
        let yaml = serde_yaml::to_string(self).map_err(|source| CoreError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, yaml).map_err(|e| CoreError::io(path, e))?;
        tracing::info!(path = %path.display(), "metadata YAML written");
        Ok(())
    }
}

/// Gather the file entries of every per-file descriptor under `vlmd_dir`.
///
/// Unreadable descriptors are logged and skipped so that one damaged file
/// does not hide the rest of the study.
///
/// # Errors
///
/// Returns [`CoreError::Io`] if `vlmd_dir` cannot be listed.
pub fn collect_file_configs(vlmd_dir: &Path) -> Result<BTreeMap<String, FileConfig>, CoreError> {
    let mut files = BTreeMap::new();
    let entries = fs::read_dir(vlmd_dir).map_err(|e| CoreError::io(vlmd_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::io(vlmd_dir, e))?;
        let descriptor = entry.path().join(METADATA_FILE);
        if !descriptor.is_file() {
            continue;
        }
        match MetadataDocument::read(&descriptor) {
            Ok(doc) => files.extend(doc.files),
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable descriptor");
            }
        }
    }
    Ok(files)
}

/// Rebuild the study summary from the per-file descriptors on disk.
///
/// Returns the number of files listed, or `None` when there is nothing to
/// summarize. In that case no summary is written and any previous one is
/// removed.
///
/// # Errors
///
/// Returns [`CoreError`] if descriptors cannot be listed or the summary
/// cannot be written.
pub fn write_summary(
    layout: &OutputLayout,
    identity: &StudyIdentity,
    today: NaiveDate,
) -> Result<Option<usize>, CoreError> {
    let files = collect_file_configs(&layout.vlmd_dir)?;
    if files.is_empty() {
        let stale = layout.summary_path();
        if stale.exists() {
            fs::remove_file(&stale).map_err(|e| CoreError::io(&stale, e))?;
            tracing::warn!(
                path = %stale.display(),
                "removed study metadata YAML that listed no remaining files"
            );
        }
        tracing::warn!("no converted files found; study metadata YAML not written");
        return Ok(None);
    }

    let count = files.len();
    let summary = MetadataDocument {
        project: ProjectBlock::new(identity, None, today),
        files,
    };
    summary.write(&layout.summary_path())?;
    Ok(Some(count))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    const REPO: &str = "https://github.com/heal-data-stewards/heal-data-dictionaries/tree/main/";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn identity() -> StudyIdentity {
        StudyIdentity::new("HDP00223", Some("BACPAC"))
            .with_appl_id(Some("10391944".into()))
            .with_title("Back Pain Consortium")
    }

    #[test]
    fn file_config_builds_urls_and_relative_paths() {
        let layout = OutputLayout::new(Path::new("/out"), &identity());
        let job = layout.job_for(&PathBuf::from("/in/pain.csv"), InputType::RedcapCsv);
        let config = FileConfig::for_job(&job, &layout, REPO);

        assert_eq!(
            config.input_filepath,
            "https://github.com/heal-data-stewards/heal-data-dictionaries/tree/main/data-dictionaries/BACPAC/input/pain.csv"
        );
        assert_eq!(
            config.output_filepath,
            "https://github.com/heal-data-stewards/heal-data-dictionaries/tree/main/data-dictionaries/BACPAC/vlmd/pain/HDP00223_pain.vlmd.json"
        );
        assert_eq!(config.relative_input_filepath, "../input/pain.csv");
        assert_eq!(config.relative_output_filepath, "../pain/HDP00223_pain.vlmd.json");
    }

    #[test]
    fn yaml_uses_platform_key_names() {
        let layout = OutputLayout::new(Path::new("/out"), &identity());
        let job = layout.job_for(&PathBuf::from("/in/pain.dta"), InputType::Stata);
        let doc = MetadataDocument::for_file(
            &identity(),
            &job,
            FileConfig::for_job(&job, &layout, REPO),
            today(),
        );
        let yaml = serde_yaml::to_string(&doc).unwrap();

        assert!(yaml.starts_with("Project:\n"));
        assert!(yaml.contains("  APPL_ID:"));
        assert!(yaml.contains("10391944"));
        assert!(yaml.contains("  Filename: pain"));
        assert!(yaml.contains("  LastModified:"));
        assert!(yaml.contains("2026-10-18"));
        assert!(yaml.contains("  Status: Draft"));
        assert!(yaml.contains("pain:\n  inputtype: stata"));
    }

    #[test]
    fn missing_appl_id_is_omitted() {
        let identity = StudyIdentity::new("HDP1", None);
        let block = ProjectBlock::new(&identity, None, today());
        let yaml = serde_yaml::to_string(&block).unwrap();
        assert!(!yaml.contains("APPL_ID"));
        assert!(!yaml.contains("Filename"));
    }

    #[test]
    fn write_then_read_preserves_document() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(tmp.path(), &identity());
        let job = layout.job_for(&PathBuf::from("/in/a.csv"), InputType::RedcapCsv);
        let doc = MetadataDocument::for_file(
            &identity(),
            &job,
            FileConfig::for_job(&job, &layout, REPO),
            today(),
        );
        let path = tmp.path().join(METADATA_FILE);

        doc.write(&path).unwrap();
        assert_eq!(MetadataDocument::read(&path).unwrap(), doc);
    }

    #[test]
    fn summary_lists_every_descriptor_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let identity = identity();
        let layout = OutputLayout::new(tmp.path(), &identity);

        for name in ["a.csv", "b.dta"] {
            let path = PathBuf::from("/in").join(name);
            let input_type = InputType::detect(&path).unwrap();
            let job = layout.job_for(&path, input_type);
            fs::create_dir_all(&job.output_dir).unwrap();
            MetadataDocument::for_file(
                &identity,
                &job,
                FileConfig::for_job(&job, &layout, REPO),
                today(),
            )
            .write(&job.metadata_path)
            .unwrap();
        }
        fs::create_dir_all(layout.vlmd_dir.join("no_descriptor")).unwrap();

        assert_eq!(write_summary(&layout, &identity, today()).unwrap(), Some(2));
        let summary = MetadataDocument::read(&layout.summary_path()).unwrap();
        assert_eq!(summary.files.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert!(summary.project.filename.is_none());
    }

    #[test]
    fn empty_study_writes_no_summary() {
        let tmp = tempfile::tempdir().unwrap();
        let identity = identity();
        let layout = OutputLayout::new(tmp.path(), &identity);
        fs::create_dir_all(&layout.vlmd_dir).unwrap();

        assert_eq!(write_summary(&layout, &identity, today()).unwrap(), None);
        assert!(!layout.summary_path().exists());
    }

    #[test]
    fn summary_without_remaining_files_is_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let identity = identity();
        let layout = OutputLayout::new(tmp.path(), &identity);
        fs::create_dir_all(&layout.vlmd_dir).unwrap();
        fs::write(layout.summary_path(), "Project: {}\na: {}\n").unwrap();

        assert_eq!(write_summary(&layout, &identity, today()).unwrap(), None);
        assert!(!layout.summary_path().exists());
    }
}
