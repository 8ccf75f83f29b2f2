//! # lintab-config
//!
//! Layered configuration loading for lintab using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LINTAB_*` prefix, `__` as separator)
//! 2. Project-level `.lintab/config.toml`
//! 3. User-level `~/.config/lintab/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LINTAB_LINEAR__TOKEN` -> `linear.token`,
//! `LINTAB_LINEAR__PAGE_SIZE` -> `linear.page_size`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! The bare `LINEAR_TOKEN` variable is not read here; it is the connection
//! provider's fallback when `linear.token` is empty.
//!
//! # Usage
//!
//! ```no_run
//! use lintab_config::LintabConfig;
//!
//! let config = LintabConfig::load_with_dotenv().expect("config");
//! println!("page size: {}", config.linear.effective_page_size());
//! ```

mod error;
mod general;
mod linear;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use linear::{DEFAULT_PAGE_SIZE, LinearConfig, MAX_PAGE_SIZE};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LintabConfig {
    #[serde(default)]
    pub linear: LinearConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LintabConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source fails to parse or a value
    /// has the wrong type, [`ConfigError::InvalidValue`] if a value is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract().map_err(ConfigError::from)?;
        config.linear.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".lintab/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("LINTAB_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lintab").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = LintabConfig::default();
        assert!(!config.linear.is_configured());
        assert_eq!(config.linear.effective_page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.general.max_retries, 3);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: LintabConfig = LintabConfig::figment().extract()?;
            assert!(!config.linear.is_configured());
            assert_eq!(config.general.format, "json");
            Ok(())
        });
    }
}
