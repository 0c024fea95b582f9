//! Assessment domain errors.

use thiserror::Error;

use super::question::QuestionId;

/// Errors raised while recording answers or building question pools.
///
/// Missing session data is never an error: it is simply "not collected yet".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("Question '{0}' was already answered")]
    AlreadyAnswered(QuestionId),

    #[error("Question '{0}' is not in the question pool")]
    UnknownQuestion(QuestionId),

    #[error("Invalid answer for question '{question}': {reason}")]
    InvalidAnswer { question: QuestionId, reason: String },

    #[error("Question pool contains duplicate id '{0}'")]
    DuplicateQuestionId(QuestionId),
}

impl AssessmentError {
    /// Creates an invalid answer error.
    pub fn invalid_answer(question: &QuestionId, reason: impl Into<String>) -> Self {
        AssessmentError::InvalidAnswer {
            question: question.clone(),
            reason: reason.into(),
        }
    }
}
