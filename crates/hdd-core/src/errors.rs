//! Error types for layout, provisioning, and descriptor I/O.
//!
//! Remote lookup and converter errors live in their own crates. The CLI
//! converges everything into `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Output already exists and the overwrite flag was not given.
    #[error("output already exists at '{}' (rerun with --overwrite to replace it)", path.display())]
    Conflict { path: PathBuf },

    /// A required input or output root does not exist.
    #[error("{role} directory does not exist: {}", path.display())]
    MissingDirectory { role: &'static str, path: PathBuf },

    /// Two inputs in one batch map to the same per-file folder.
    #[error("output folder '{folder}' is already used by {}", first.display())]
    FolderCollision { folder: String, first: PathBuf },

    /// The folder name would clash with the descriptor's `Project` block.
    #[error("output folder name '{folder}' is reserved; rename the input file")]
    ReservedFolder { folder: String },

    /// The file name does not map to any converter input type.
    #[error("unsupported file type: {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("io error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("yaml error at '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl CoreError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
