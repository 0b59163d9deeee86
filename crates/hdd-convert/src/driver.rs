//! Batch conversion of a clean study directory.
//!
//! Files are processed one at a time in name order. A file that cannot be
//! converted is recorded as failed and the batch moves on; there is no
//! all-or-nothing guarantee.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use hdd_core::descriptor::write_summary;
use hdd_core::provision::{apply_plan, plan_job, provision_study};
use hdd_core::{
    ConversionJob, CoreError, FileConfig, InputType, MetadataDocument, OutputLayout,
    StudyIdentity,
};
use serde::Serialize;

use crate::converter::{ConversionRequest, VlmdConverter};
use crate::error::ConvertError;

/// List the candidate files in `dir`: regular, non-hidden, sorted by name.
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the directory cannot be read.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ConvertError::io(dir, e))? {
        let entry = entry.map_err(|e| ConvertError::io(dir, e))?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Converted {
        file: PathBuf,
        input_type: InputType,
        json: PathBuf,
        csv: PathBuf,
    },
    Skipped {
        file: PathBuf,
        reason: String,
    },
    Failed {
        file: PathBuf,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub found: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub summary: Option<PathBuf>,
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Converted { .. } => self.converted += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
        self.files.push(outcome);
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub repository_url: String,
    pub overwrite: bool,
    pub today: NaiveDate,
}

/// Observer for a running batch. Every method defaults to a no-op.
pub trait BatchProgress {
    fn started(&self, _total: usize) {}
    fn file_started(&self, _file: &Path) {}
    fn file_finished(&self, _outcome: &FileOutcome) {}
    fn finished(&self, _report: &BatchReport) {}
}

impl BatchProgress for () {}

pub struct ConversionDriver<C> {
    converter: C,
    layout: OutputLayout,
    identity: StudyIdentity,
    options: DriverOptions,
}

impl<C: VlmdConverter> ConversionDriver<C> {
    pub const fn new(
        converter: C,
        layout: OutputLayout,
        identity: StudyIdentity,
        options: DriverOptions,
    ) -> Self {
        Self {
            converter,
            layout,
            identity,
            options,
        }
    }

    #[must_use]
    pub const fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    #[must_use]
    pub const fn identity(&self) -> &StudyIdentity {
        &self.identity
    }

    #[must_use]
    pub const fn converter(&self) -> &C {
        &self.converter
    }

    /// Create the study's `input/` and `vlmd/` directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Core`] if a directory cannot be created.
    pub fn prepare(&self) -> Result<(), ConvertError> {
        provision_study(&self.layout)?;
        Ok(())
    }

    /// Convert one file. Never fails the batch: problems become
    /// [`FileOutcome::Skipped`] or [`FileOutcome::Failed`].
    pub async fn process(&self, path: &Path) -> FileOutcome {
        let Some(input_type) = InputType::detect(path) else {
            tracing::info!(file = %path.display(), "skipping unsupported file");
            return FileOutcome::Skipped {
                file: path.to_path_buf(),
                reason: CoreError::UnsupportedFile {
                    path: path.to_path_buf(),
                }
                .to_string(),
            };
        };

        tracing::info!(file = %path.display(), %input_type, "converting");
        match self.convert_job(&self.layout.job_for(path, input_type)).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::error!(file = %path.display(), %error, "conversion failed");
                FileOutcome::Failed {
                    file: path.to_path_buf(),
                    reason: error.to_string(),
                }
            }
        }
    }

    async fn convert_job(&self, job: &ConversionJob) -> Result<FileOutcome, ConvertError> {
        let plan = plan_job(job, self.options.overwrite)?;

        let artifact_stem = job.json_file_name().trim_end_matches(".json").to_string();
        let description = format!("DD converted using heal-dd for input type {}", job.input_type);
        let request = ConversionRequest {
            input_path: &job.input_file_path,
            input_type: job.input_type,
            artifact_stem: &artifact_stem,
            title: &job.folder_name,
            description: &description,
        };
        let payload = self.converter.convert(&request).await?;

        if !payload.checks.is_valid() {
            let detail = payload.checks.messages.join("; ");
            tracing::error!(
                file = %job.input_file_path.display(),
                csv_valid = payload.checks.csv_valid,
                json_valid = payload.checks.json_valid,
                "file requires additional cleaning before processing; metadata YAML not written"
            );
            return Ok(FileOutcome::Failed {
                file: job.input_file_path.clone(),
                reason: if detail.is_empty() {
                    "requires additional cleaning before processing".to_string()
                } else {
                    format!("requires additional cleaning before processing: {detail}")
                },
            });
        }

        let json = serde_json::to_string_pretty(&payload.json).map_err(|source| {
            ConvertError::Json {
                path: job.output_json_path.clone(),
                source,
            }
        })?;
        apply_plan(job, plan)?;
        write_file(&job.output_json_path, json.as_bytes())?;
        write_file(&job.output_csv_path, payload.csv.as_bytes())?;
        fs::copy(&job.input_file_path, &job.input_copy_path)
            .map_err(|e| ConvertError::io(&job.input_copy_path, e))?;

        let config = FileConfig::for_job(job, &self.layout, &self.options.repository_url);
        MetadataDocument::for_file(&self.identity, job, config, self.options.today)
            .write(&job.metadata_path)?;

        Ok(FileOutcome::Converted {
            file: job.input_file_path.clone(),
            input_type: job.input_type,
            json: job.output_json_path.clone(),
            csv: job.output_csv_path.clone(),
        })
    }

    /// Rebuild the study summary descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Core`] if descriptors cannot be read or written.
    pub fn finish(&self) -> Result<Option<PathBuf>, ConvertError> {
        let written = write_summary(&self.layout, &self.identity, self.options.today)?;
        Ok(written.map(|_| self.layout.summary_path()))
    }

    /// Convert every file in `input_dir` and write the study summary.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] only for study-level failures (listing the
    /// input directory, provisioning, summary); per-file failures are in the
    /// report.
    pub async fn run(&self, input_dir: &Path) -> Result<BatchReport, ConvertError> {
        self.run_with(input_dir, &()).await
    }

    /// [`Self::run`], reporting each step to `progress`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::run`].
    pub async fn run_with(
        &self,
        input_dir: &Path,
        progress: &impl BatchProgress,
    ) -> Result<BatchReport, ConvertError> {
        self.prepare()?;
        let files = discover_inputs(input_dir)?;
        tracing::info!(count = files.len(), dir = %input_dir.display(), "found files for study");

        let mut report = BatchReport {
            found: files.len(),
            ..BatchReport::default()
        };
        progress.started(files.len());

        let mut claimed = BTreeMap::new();
        for file in &files {
            progress.file_started(file);
            let outcome = match self.claim_folder(&mut claimed, file) {
                Some(collision) => collision,
                None => self.process(file).await,
            };
            progress.file_finished(&outcome);
            report.record(outcome);
        }
        report.summary = self.finish()?;

        tracing::info!(
            found = report.found,
            converted = report.converted,
            failed = report.failed,
            "conversion finished"
        );
        progress.finished(&report);
        Ok(report)
    }

    /// Reserve `file`'s output folder for this batch. Returns a failed
    /// outcome when an earlier file already took it.
    fn claim_folder(
        &self,
        claimed: &mut BTreeMap<String, PathBuf>,
        file: &Path,
    ) -> Option<FileOutcome> {
        let input_type = InputType::detect(file)?;
        let folder = self.layout.job_for(file, input_type).folder_name;
        if let Some(first) = claimed.get(&folder) {
            let error = CoreError::FolderCollision {
                folder,
                first: first.clone(),
            };
            tracing::error!(file = %file.display(), %error, "conversion failed");
            return Some(FileOutcome::Failed {
                file: file.to_path_buf(),
                reason: error.to_string(),
            });
        }
        claimed.insert(folder, file.to_path_buf());
        None
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ConvertError> {
    fs::write(path, contents).map_err(|e| ConvertError::io(path, e))
}
