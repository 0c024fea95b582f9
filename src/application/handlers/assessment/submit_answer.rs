//! SubmitAnswerHandler - Record an answer and advance the assessment

use std::sync::Arc;
use tracing::info;

use crate::domain::assessment::{Answer, AssessmentError, Persona, QuestionId};
use crate::domain::conversation::{AssessmentEngine, AssessmentStep};
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to submit an answer
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    /// `None` skips the question
    pub answer: Option<Answer>,
}

/// Result of submitting an answer
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub step: AssessmentStep,
    pub persona: Option<Persona>,
}

/// Error type for submitting answers
#[derive(Debug, Clone)]
pub enum SubmitAnswerError {
    NotFound(SessionId),
    /// The termination policy already ended this session
    AlreadyFinished(SessionId),
    Storage(String),
    Domain(AssessmentError),
}

impl std::fmt::Display for SubmitAnswerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitAnswerError::NotFound(id) => write!(f, "Assessment not found: {}", id),
            SubmitAnswerError::AlreadyFinished(id) => {
                write!(f, "Assessment already finished: {}", id)
            }
            SubmitAnswerError::Storage(err) => write!(f, "Storage error: {}", err),
            SubmitAnswerError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SubmitAnswerError {}

impl From<AssessmentError> for SubmitAnswerError {
    fn from(err: AssessmentError) -> Self {
        SubmitAnswerError::Domain(err)
    }
}

impl From<SessionStoreError> for SubmitAnswerError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => SubmitAnswerError::NotFound(id),
            other => SubmitAnswerError::Storage(other.to_string()),
        }
    }
}

/// Handler for submitting answers
pub struct SubmitAnswerHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<AssessmentEngine>,
}

impl SubmitAnswerHandler {
    pub fn new(store: Arc<dyn SessionStore>, engine: Arc<AssessmentEngine>) -> Self {
        Self { store, engine }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
    ) -> Result<SubmitAnswerResult, SubmitAnswerError> {
        let mut session = self.store.load(cmd.session_id).await?;

        if self.engine.next_step(&session).is_finished() {
            return Err(SubmitAnswerError::AlreadyFinished(cmd.session_id));
        }

        let step = match &cmd.answer {
            Some(answer) => self.engine.submit(&mut session, &cmd.question_id, answer)?,
            None => self.engine.skip(&mut session, &cmd.question_id)?,
        };

        self.store.save(&session).await?;

        if step.is_finished() {
            info!(
                session_id = %session.id,
                question_count = session.question_count,
                reason = step.decision.reason.map(|r| r.as_str()).unwrap_or("none"),
                "Assessment complete"
            );
        }

        Ok(SubmitAnswerResult {
            step,
            persona: session.persona,
        })
    }
}
