//! External converter process.
//!
//! Runs the configured program once per file inside a scratch directory and
//! reads back the `.vlmd.csv` / `.vlmd.json` pair it writes there.

use std::path::Path;

use hdd_config::ConverterConfig;
use serde_json::Value;
use tokio::process::Command;

use crate::converter::{ConversionRequest, TemplateChecks, VlmdConverter, VlmdPayload};
use crate::error::ConvertError;

#[derive(Debug, Clone)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// # Errors
    ///
    /// Returns [`ConvertError::Config`] if the argument template is unusable.
    pub fn from_config(config: &ConverterConfig) -> Result<Self, ConvertError> {
        config
            .validate()
            .map_err(|e| ConvertError::Config(e.to_string()))?;
        Ok(Self {
            program: config.program.clone(),
            args: config.args.clone(),
        })
    }

    /// `input` must be absolute: the command runs inside its scratch
    /// directory, not the caller's working directory.
    fn render_args(
        &self,
        request: &ConversionRequest<'_>,
        input: &Path,
        output: &Path,
    ) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace("{inputtype}", request.input_type.as_str())
                    .replace("{input}", &input)
                    .replace("{output}", &output)
                    .replace("{title}", request.title)
                    .replace("{description}", request.description)
            })
            .collect()
    }
}

impl VlmdConverter for CommandConverter {
    async fn convert(&self, request: &ConversionRequest<'_>) -> Result<VlmdPayload, ConvertError> {
        let scratch = tempfile::TempDir::new()
            .map_err(|e| ConvertError::io(std::env::temp_dir(), e))?;
        let csv_path = scratch.path().join(format!("{}.csv", request.artifact_stem));
        let json_path = scratch.path().join(format!("{}.json", request.artifact_stem));

        let input = std::path::absolute(request.input_path)
            .map_err(|e| ConvertError::io(request.input_path, e))?;
        let args = self.render_args(request, &input, &csv_path);
        tracing::debug!(program = %self.program, ?args, "running converter");
        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(scratch.path())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(ConvertError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        let csv = read_artifact(&csv_path)?;
        let raw_json = read_artifact(&json_path)?;
        let json: Value = serde_json::from_str(&raw_json).map_err(|source| ConvertError::Json {
            path: json_path.clone(),
            source,
        })?;

        let checks = TemplateChecks {
            csv_valid: csv.lines().nth(1).is_some(),
            json_valid: json.is_object() || json.as_array().is_some_and(|items| !items.is_empty()),
            messages: stderr
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        };

        Ok(VlmdPayload { json, csv, checks })
    }
}

fn read_artifact(path: &Path) -> Result<String, ConvertError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConvertError::MissingOutput {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(ConvertError::io(path, e)),
    }
}
