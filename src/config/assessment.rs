//! Assessment decision configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::conversation::TerminationConfig;
use crate::domain::routing::ScoringRules;

use super::error::{ConfigError, ValidationError};

/// Termination bounds and the optional scoring-rules override
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    #[serde(default = "default_min_questions")]
    pub min_questions: u32,

    #[serde(default = "default_max_questions")]
    pub max_questions: u32,

    #[serde(default = "default_completeness_threshold")]
    pub completeness_threshold: u8,

    /// YAML file replacing the built-in scoring rules
    pub scoring_rules_path: Option<PathBuf>,
}

impl AssessmentConfig {
    pub fn termination(&self) -> TerminationConfig {
        TerminationConfig {
            min_questions: self.min_questions,
            max_questions: self.max_questions,
            completeness_threshold: self.completeness_threshold,
        }
    }

    /// Loads the scoring rules override, or the built-in table when none is set.
    pub fn scoring_rules(&self) -> Result<ScoringRules, ConfigError> {
        let Some(path) = &self.scoring_rules_path else {
            return Ok(ScoringRules::default());
        };

        let yaml = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(ScoringRules::from_yaml_str(&yaml)?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_questions == 0 || self.min_questions > self.max_questions {
            return Err(ValidationError::InvalidQuestionBounds {
                min: self.min_questions,
                max: self.max_questions,
            });
        }
        if self.completeness_threshold > 100 {
            return Err(ValidationError::InvalidThreshold(self.completeness_threshold));
        }
        Ok(())
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            min_questions: default_min_questions(),
            max_questions: default_max_questions(),
            completeness_threshold: default_completeness_threshold(),
            scoring_rules_path: None,
        }
    }
}

fn default_min_questions() -> u32 {
    5
}

fn default_max_questions() -> u32 {
    10
}

fn default_completeness_threshold() -> u8 {
    80
}
