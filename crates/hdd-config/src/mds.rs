//! HEAL metadata service (MDS) configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    String::from("https://healdata.org/mds")
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MdsConfig {
    /// Service root; `/metadata/{hdp_id}` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MdsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
