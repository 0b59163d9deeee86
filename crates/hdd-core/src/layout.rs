//! Deterministic output paths for one study.
//!
//! ```text
//! <output>/data-dictionaries/<project>/
//!   input/<original file>
//!   vlmd/metadata.yaml                      study summary
//!   vlmd/<folder>/<hdp_id>_<folder>.vlmd.json
//!   vlmd/<folder>/<hdp_id>_<folder>.vlmd.csv
//!   vlmd/<folder>/metadata.yaml             per-file descriptor
//! ```

use std::path::{Path, PathBuf};

use crate::identity::StudyIdentity;
use crate::input_type::InputType;

pub const DATA_DICTIONARIES_DIR: &str = "data-dictionaries";
pub const INPUT_DIR: &str = "input";
pub const VLMD_DIR: &str = "vlmd";
pub const METADATA_FILE: &str = "metadata.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub study_name: String,
    pub study_dir: PathBuf,
    pub input_dir: PathBuf,
    pub vlmd_dir: PathBuf,
    hdp_id: String,
}

impl OutputLayout {
    #[must_use]
    pub fn new(output_root: &Path, identity: &StudyIdentity) -> Self {
        let study_dir = output_root
            .join(DATA_DICTIONARIES_DIR)
            .join(&identity.project_name);
        Self {
            study_name: identity.project_name.clone(),
            input_dir: study_dir.join(INPUT_DIR),
            vlmd_dir: study_dir.join(VLMD_DIR),
            study_dir,
            hdp_id: identity.hdp_id.clone(),
        }
    }

    /// Path of the study-level summary descriptor.
    #[must_use]
    pub fn summary_path(&self) -> PathBuf {
        self.vlmd_dir.join(METADATA_FILE)
    }

    /// Build the job for one input file.
    #[must_use]
    pub fn job_for(&self, input_file_path: &Path, input_type: InputType) -> ConversionJob {
        let folder_name = folder_name_for(input_file_path);
        let file_name = input_file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_dir = self.vlmd_dir.join(&folder_name);
        let artifact_stem = format!("{}_{folder_name}.vlmd", self.hdp_id);

        ConversionJob {
            input_file_path: input_file_path.to_path_buf(),
            input_type,
            input_copy_path: self.input_dir.join(&file_name),
            output_json_path: output_dir.join(format!("{artifact_stem}.json")),
            output_csv_path: output_dir.join(format!("{artifact_stem}.csv")),
            metadata_path: output_dir.join(METADATA_FILE),
            file_name,
            folder_name,
            output_dir,
        }
    }
}

/// One input file and every path its conversion writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input_file_path: PathBuf,
    pub input_type: InputType,
    pub file_name: String,
    pub folder_name: String,
    pub output_dir: PathBuf,
    pub output_json_path: PathBuf,
    pub output_csv_path: PathBuf,
    pub metadata_path: PathBuf,
    pub input_copy_path: PathBuf,
}

impl ConversionJob {
    /// File name of the JSON artifact.
    #[must_use]
    pub fn json_file_name(&self) -> String {
        self.output_json_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Per-file folder name: the file stem with spaces replaced by underscores.
fn folder_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace(' ', "_"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn layout() -> OutputLayout {
        let identity = StudyIdentity::new("HDP00223", None);
        OutputLayout::new(Path::new("/out"), &identity)
    }

    #[test]
    fn study_dirs_follow_project_name() {
        let identity = StudyIdentity::new("HDP00223", Some("BACPAC"));
        let layout = OutputLayout::new(Path::new("/out"), &identity);
        assert_eq!(
            layout.study_dir,
            PathBuf::from("/out/data-dictionaries/BACPAC")
        );
        assert_eq!(
            layout.input_dir,
            PathBuf::from("/out/data-dictionaries/BACPAC/input")
        );
        assert_eq!(
            layout.summary_path(),
            PathBuf::from("/out/data-dictionaries/BACPAC/vlmd/metadata.yaml")
        );
    }

    #[test]
    fn job_paths_use_hdp_id_and_folder() {
        let job = layout().job_for(Path::new("/in/Pain Scale.csv"), InputType::RedcapCsv);
        assert_eq!(job.folder_name, "Pain_Scale");
        assert_eq!(job.file_name, "Pain Scale.csv");
        assert_eq!(
            job.output_csv_path,
            PathBuf::from("/out/data-dictionaries/HDP00223/vlmd/Pain_Scale/HDP00223_Pain_Scale.vlmd.csv")
        );
        assert_eq!(job.json_file_name(), "HDP00223_Pain_Scale.vlmd.json");
        assert_eq!(
            job.input_copy_path,
            PathBuf::from("/out/data-dictionaries/HDP00223/input/Pain Scale.csv")
        );
    }

    #[test]
    fn double_suffix_keeps_inner_extension_in_folder() {
        let job = layout().job_for(Path::new("/in/intake.redcap.csv"), InputType::RedcapCsv);
        assert_eq!(job.folder_name, "intake.redcap");
    }
}
