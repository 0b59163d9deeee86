//! # hdd-config
//!
//! Layered configuration loading for heal-dd using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HDD_*` prefix, `__` as separator)
//! 2. Project-level `.hdd/config.toml`
//! 3. User-level `~/.config/heal-dd/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `HDD_MDS__BASE_URL` -> `mds.base_url`, `HDD_REDCAP__API_TOKEN` -> `redcap.api_token`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use hdd_config::HddConfig;
//!
//! let config = HddConfig::load_with_dotenv().expect("config");
//! println!("MDS: {}", config.mds.base_url);
//! ```

mod converter;
mod error;
mod mds;
mod publish;
mod redcap;

pub use converter::ConverterConfig;
pub use error::ConfigError;
pub use mds::MdsConfig;
pub use publish::PublishConfig;
pub use redcap::RedcapConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "HDD_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HddConfig {
    #[serde(default)]
    pub mds: MdsConfig,
    #[serde(default)]
    pub publish: PublishConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub redcap: RedcapConfig,
}

impl HddConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if any) before building the
    /// figment. This is the entry point used by the CLI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".hdd/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("heal-dd").join("config.toml"))
    }
}
