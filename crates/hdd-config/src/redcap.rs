//! REDCap API configuration for dictionary validation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RedcapConfig {
    /// REDCap API endpoint (e.g., `https://redcap.example.org/api/`).
    #[serde(default)]
    pub api_url: String,

    /// Project API token.
    #[serde(default)]
    pub api_token: String,
}

impl RedcapConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_token.is_empty()
    }

    /// # Errors
    ///
    /// Returns [`crate::ConfigError::NotConfigured`] naming the variables to
    /// set when the URL or token is missing.
    pub fn require(&self) -> Result<&Self, crate::ConfigError> {
        if self.api_url.is_empty() || self.api_token.is_empty() {
            return Err(crate::ConfigError::NotConfigured {
                section: "redcap",
                hint: "HDD_REDCAP__API_URL and HDD_REDCAP__API_TOKEN",
            });
        }
        Ok(self)
    }
}
