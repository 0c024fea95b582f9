//! Application configuration module
//!
//! Configuration is loaded from environment variables using the `config` and
//! `dotenvy` crates. Variables carry the `READINESS` prefix and nested values
//! are separated by double underscores. Every section has defaults, so an
//! empty environment yields a working console setup.
//!
//! # Example
//!
//! ```no_run
//! use readiness_advisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Asking at most {} questions", config.assessment.max_questions);
//! ```

mod ai;
mod assessment;
mod error;
mod runtime;
mod storage;

pub use ai::AiConfig;
pub use assessment::AssessmentConfig;
pub use error::{ConfigError, ValidationError};
pub use runtime::{Environment, LogFormat, RuntimeConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Termination bounds and scoring rules
    #[serde(default)]
    pub assessment: AssessmentConfig,

    /// Optional question phrasing through an LLM
    #[serde(default)]
    pub ai: AiConfig,

    /// Session persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Environment and logging
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `READINESS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `READINESS__ASSESSMENT__MAX_QUESTIONS=12` -> `assessment.max_questions = 12`
    /// - `READINESS__STORAGE__BACKEND=file` -> `storage.backend = File`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("READINESS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.assessment.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        self.runtime.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}
