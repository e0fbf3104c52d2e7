//! # dinr-config
//!
//! Layered configuration loading for dinr using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DINR_*` prefix, `__` as separator)
//! 2. Project-level `.dinr/config.toml`
//! 3. User-level `~/.config/dinr/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DINR_DATABASE__PATH` -> `database.path`,
//! `DINR_VOTING__MAX_VOTE_ATTEMPTS` -> `voting.max_vote_attempts`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use dinr_config::DinrConfig;
//!
//! let config = DinrConfig::load_with_dotenv()?;
//! println!("database: {}", config.database.path);
//! # Ok::<(), dinr_config::ConfigError>(())
//! ```

mod database;
mod error;
mod general;
mod voting;

pub use database::{DEFAULT_DATABASE_PATH, DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use voting::VotingConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DinrConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub voting: VotingConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl DinrConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if [`Self::validate`] rejects the result.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
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
        let local_path = PathBuf::from(".dinr/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("DINR_").split("__"))
    }

    /// Reject values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::invalid("database.path", "must not be empty"));
        }
        if self.voting.max_vote_attempts == 0 {
            return Err(ConfigError::invalid(
                "voting.max_vote_attempts",
                "must be at least 1",
            ));
        }
        if self.voting.retry_base_delay_ms > self.voting.retry_max_delay_ms {
            return Err(ConfigError::invalid(
                "voting.retry_base_delay_ms",
                format!(
                    "{} exceeds voting.retry_max_delay_ms ({})",
                    self.voting.retry_base_delay_ms, self.voting.retry_max_delay_ms
                ),
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dinr").join("config.toml"))
    }
}
