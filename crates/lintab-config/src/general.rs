//! General host configuration.

use serde::{Deserialize, Serialize};

/// Default retry budget for rate-limited page requests.
const fn default_max_retries() -> u32 {
    3
}

fn default_format() -> String {
    String::from("json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// How many times a page request is retried after HTTP 429.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Default output format for the CLI (`json`, `table`, `raw`).
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            format: default_format(),
        }
    }
}
