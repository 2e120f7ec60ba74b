//! # assay-config
//!
//! Layered configuration loading for Assay using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ASSAY_*` prefix, `__` as separator)
//! 2. Project-level `.assay/config.toml`
//! 3. User-level `~/.config/assay/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ASSAY_VALIDATION__DEBUG` -> `validation.debug` and
//! `ASSAY_VALIDATION__ALLOW_USELESS_PROPERTY` -> `validation.allow_useless_property`.
//!
//! # Usage
//!
//! ```no_run
//! use assay_config::AssayConfig;
//!
//! let config = AssayConfig::load_with_dotenv().expect("config");
//! if config.validation.allow_useless_property {
//!     println!("undeclared properties are tolerated");
//! }
//! ```

mod error;
mod validation;

pub use error::ConfigError;
pub use validation::ValidationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AssayConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl AssayConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an explicit TOML file layered above the
    /// discovered files but still below environment variables.
    pub fn load_with_file(path: &Path) -> Result<Self, ConfigError> {
        Self::figment_with_file(Some(path))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        Self::figment_with_file(None)
    }

    fn figment_with_file(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".assay/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("ASSAY_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("assay").join("config.toml"))
    }
}
