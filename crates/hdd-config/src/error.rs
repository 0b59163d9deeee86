use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `HDD_*` variable could not be parsed.
    #[error("failed to load heal-dd configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the requested command is empty.
    #[error("[{section}] is not configured; set {hint}")]
    NotConfigured {
        section: &'static str,
        hint: &'static str,
    },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
