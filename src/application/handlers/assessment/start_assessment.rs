//! StartAssessmentHandler - Create and persist a new assessment session

use std::sync::Arc;
use tracing::info;

use crate::domain::assessment::{AssessmentSession, Persona};
use crate::domain::conversation::{AssessmentEngine, AssessmentStep};
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to start an assessment
#[derive(Debug, Clone, Default)]
pub struct StartAssessmentCommand {
    /// Use a caller-provided id instead of generating one
    pub session_id: Option<SessionId>,
    /// Persona chosen up front, if the caller already knows it
    pub persona: Option<Persona>,
}

/// Result of starting an assessment
#[derive(Debug, Clone)]
pub struct StartAssessmentResult {
    pub session: AssessmentSession,
    pub step: AssessmentStep,
}

/// Error type for starting assessments
#[derive(Debug, Clone)]
pub enum StartAssessmentError {
    /// A session with this id already exists
    AlreadyExists(SessionId),
    /// Storage error
    Storage(String),
}

impl std::fmt::Display for StartAssessmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartAssessmentError::AlreadyExists(id) => {
                write!(f, "Assessment already exists: {}", id)
            }
            StartAssessmentError::Storage(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for StartAssessmentError {}

impl From<SessionStoreError> for StartAssessmentError {
    fn from(err: SessionStoreError) -> Self {
        StartAssessmentError::Storage(err.to_string())
    }
}

/// Handler for starting assessments
pub struct StartAssessmentHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<AssessmentEngine>,
}

impl StartAssessmentHandler {
    pub fn new(store: Arc<dyn SessionStore>, engine: Arc<AssessmentEngine>) -> Self {
        Self { store, engine }
    }

    pub async fn handle(
        &self,
        cmd: StartAssessmentCommand,
    ) -> Result<StartAssessmentResult, StartAssessmentError> {
        let mut session = match cmd.session_id {
            Some(id) => {
                if self.store.exists(id).await? {
                    return Err(StartAssessmentError::AlreadyExists(id));
                }
                AssessmentSession::with_id(id)
            }
            None => AssessmentSession::new(),
        };

        if let Some(persona) = cmd.persona {
            session.set_persona(persona);
        }

        self.store.save(&session).await?;
        let step = self.engine.next_step(&session);

        info!(
            session_id = %session.id,
            persona = session.persona.map(|p| p.id()).unwrap_or("unknown"),
            "Assessment started"
        );

        Ok(StartAssessmentResult { session, step })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySessionStore;

    fn handler(store: Arc<InMemorySessionStore>) -> StartAssessmentHandler {
        StartAssessmentHandler::new(store, Arc::new(AssessmentEngine::default()))
    }

    #[tokio::test]
    async fn creates_and_persists_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler(store.clone());

        let result = handler.handle(StartAssessmentCommand::default()).await.unwrap();

        assert!(store.exists(result.session.id).await.unwrap());
        assert_eq!(result.step.metrics.completeness_score.value(), 0);
        assert!(result.step.next_question.is_some());
    }

    #[tokio::test]
    async fn keeps_known_persona() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler(store.clone());

        let result = handler
            .handle(StartAssessmentCommand {
                session_id: None,
                persona: Some(Persona::ItDevops),
            })
            .await
            .unwrap();

        let stored = store.load(result.session.id).await.unwrap();
        assert_eq!(stored.persona, Some(Persona::ItDevops));
    }

    #[tokio::test]
    async fn fails_if_id_exists() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler(store);
        let id = SessionId::new();
        let cmd = StartAssessmentCommand {
            session_id: Some(id),
            persona: None,
        };

        handler.handle(cmd.clone()).await.unwrap();
        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(StartAssessmentError::AlreadyExists(existing)) if existing == id));
    }
}
