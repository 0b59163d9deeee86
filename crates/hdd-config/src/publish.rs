//! Where converted dictionaries are published.

use serde::{Deserialize, Serialize};

fn default_repository_url() -> String {
    String::from("https://github.com/heal-data-stewards/heal-data-dictionaries/tree/main")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublishConfig {
    /// Browse URL of the data-dictionaries repository. Descriptor URLs are
    /// built as `{repository_url}/data-dictionaries/{study}/...`.
    #[serde(default = "default_repository_url")]
    pub repository_url: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            repository_url: default_repository_url(),
        }
    }
}
