//! Remote API connection configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page the remote API accepts.
pub const MAX_PAGE_SIZE: u32 = 250;

/// Default GraphQL endpoint.
fn default_endpoint() -> String {
    String::from("https://api.linear.app/graphql")
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinearConfig {
    /// Personal API key or OAuth token sent as a bearer token.
    #[serde(default)]
    pub token: String,

    /// Rows requested per remote page (default 50, max 250).
    #[serde(default)]
    pub page_size: Option<u32>,

    /// GraphQL endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            page_size: None,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LinearConfig {
    /// Check if a token is present in configuration.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Configured page size, defaulted and clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn effective_page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Reject values no request could succeed with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-HTTP endpoint or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "linear.endpoint".to_string(),
                reason: format!("expected an http(s) URL, got '{endpoint}'"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "linear.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
