//! External VLMD converter command.
//!
//! `args` is a template; each element may contain the placeholders
//! `{input}`, `{inputtype}`, `{output}`, `{title}` and `{description}`.

use serde::{Deserialize, Serialize};

fn default_program() -> String {
    String::from("vlmd")
}

fn default_args() -> Vec<String> {
    [
        "extract",
        "--inputtype",
        "{inputtype}",
        "--outputfile",
        "{output}",
        "{input}",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConverterConfig {
    /// Executable name or path.
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

impl ConverterConfig {
    /// Reject templates that could never produce output.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::InvalidValue`] when the program is empty
    /// or no argument references `{input}` or `{output}`.
    pub fn validate(&self) -> Result<(), crate::ConfigError> {
        if self.program.trim().is_empty() {
            return Err(crate::ConfigError::InvalidValue {
                field: "converter.program",
                reason: "must not be empty".into(),
            });
        }
        for placeholder in ["{input}", "{output}"] {
            if !self.args.iter().any(|arg| arg.contains(placeholder)) {
                return Err(crate::ConfigError::InvalidValue {
                    field: "converter.args",
                    reason: format!("must reference {placeholder}"),
                });
            }
        }
        Ok(())
    }
}
