//! Configuration error types

use thiserror::Error;

use crate::domain::routing::ScoringRulesError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Could not read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error(transparent)]
    ScoringRules(#[from] ScoringRulesError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid question bounds: min {min}, max {max}")]
    InvalidQuestionBounds { min: u32, max: u32 },

    #[error("Completeness threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(u8),

    #[error("Invalid AI request timeout")]
    InvalidTimeout,

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Log level must not be empty")]
    EmptyLogLevel,
}
