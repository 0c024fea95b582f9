//! Conversation Termination Policy.
//!
//! Decides when the assessment has asked enough questions.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::domain::analysis::CompletionMetrics;
use crate::domain::assessment::AssessmentSession;

/// Bounds and threshold for finishing an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationConfig {
    /// Questions required before all-essential coverage can end the session.
    pub min_questions: u32,
    /// Hard cap on questions asked.
    pub max_questions: u32,
    /// Completeness score (0-100) that ends the session on its own.
    pub completeness_threshold: u8,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            min_questions: 5,
            max_questions: 10,
            completeness_threshold: 80,
        }
    }
}

/// Invalid termination bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerminationConfigError {
    #[error("max_questions must be greater than zero")]
    ZeroMaxQuestions,

    #[error("min_questions ({min}) must not exceed max_questions ({max})")]
    MinExceedsMax { min: u32, max: u32 },

    #[error("completeness_threshold must be between 0 and 100, got {0}")]
    ThresholdOutOfRange(u8),
}

impl TerminationConfig {
    pub fn validate(&self) -> Result<(), TerminationConfigError> {
        if self.max_questions == 0 {
            return Err(TerminationConfigError::ZeroMaxQuestions);
        }
        if self.min_questions > self.max_questions {
            return Err(TerminationConfigError::MinExceedsMax {
                min: self.min_questions,
                max: self.max_questions,
            });
        }
        if self.completeness_threshold > 100 {
            return Err(TerminationConfigError::ThresholdOutOfRange(
                self.completeness_threshold,
            ));
        }
        Ok(())
    }
}

/// Why an assessment finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    MaxQuestions,
    CompletenessReached,
    AllEssentialCovered,
    /// No applicable question is left in the pool.
    QuestionsExhausted,
}

impl FinishReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinishReason::MaxQuestions => "max_questions",
            FinishReason::CompletenessReached => "completeness_reached",
            FinishReason::AllEssentialCovered => "all_essential_covered",
            FinishReason::QuestionsExhausted => "questions_exhausted",
        }
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a termination check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishDecision {
    pub finish: bool,
    pub reason: Option<FinishReason>,
}

impl FinishDecision {
    pub fn proceed() -> Self {
        Self {
            finish: false,
            reason: None,
        }
    }

    pub fn finished(reason: FinishReason) -> Self {
        Self {
            finish: true,
            reason: Some(reason),
        }
    }
}

/// Applies a validated `TerminationConfig`.
#[derive(Debug, Clone)]
pub struct TerminationPolicy {
    config: TerminationConfig,
}

impl TerminationPolicy {
    /// Creates a policy, failing fast on inconsistent bounds.
    pub fn new(config: TerminationConfig) -> Result<Self, TerminationConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Determines whether the session should finish.
    ///
    /// Rules are checked in order and the first match wins:
    /// 1. question cap reached
    /// 2. completeness at or above threshold
    /// 3. every essential field collected after the minimum question count
    pub fn should_finish(
        &self,
        session: &AssessmentSession,
        metrics: &CompletionMetrics,
        question_count: u32,
    ) -> FinishDecision {
        let decision = if question_count >= self.config.max_questions {
            FinishDecision::finished(FinishReason::MaxQuestions)
        } else if metrics
            .completeness_score
            .meets(self.config.completeness_threshold)
        {
            FinishDecision::finished(FinishReason::CompletenessReached)
        } else if metrics.all_essential_collected() && question_count >= self.config.min_questions
        {
            FinishDecision::finished(FinishReason::AllEssentialCovered)
        } else {
            FinishDecision::proceed()
        };

        debug!(
            session_id = %session.id,
            question_count,
            completeness = metrics.completeness_score.value(),
            finish = decision.finish,
            reason = decision.reason.map(|r| r.as_str()).unwrap_or("none"),
            "Termination checked"
        );
        decision
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TerminationConfig {
        &self.config
    }
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self {
            config: TerminationConfig::default(),
        }
    }
}
