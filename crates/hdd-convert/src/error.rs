//! Conversion error types.

use std::path::PathBuf;

use hdd_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Layout, provisioning, or descriptor failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The converter configuration cannot be used.
    #[error("invalid converter configuration: {0}")]
    Config(String),

    /// The converter program could not be started.
    #[error("failed to run converter '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran but exited unsuccessfully.
    #[error("converter '{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The converter succeeded but did not produce an expected artifact.
    #[error("converter produced no output at '{}'", path.display())]
    MissingOutput { path: PathBuf },

    #[error("invalid VLMD JSON at '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
