//! GetNextQuestionHandler - Compute the next step and phrase its question
//!
//! Phrasing through a `TextGenerator` is best effort: any error or timeout
//! falls back to the template prompt.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::assessment::AssessmentSession;
use crate::domain::conversation::{AssessmentEngine, AssessmentStep, NextQuestion};
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError, TextGenerator, TextRequest};

/// Default time allowed for phrasing a question.
pub const DEFAULT_PHRASING_TIMEOUT: Duration = Duration::from_secs(8);

const PHRASING_SYSTEM_PROMPT: &str = "Você é um consultor que conduz um diagnóstico de \
prontidão para IA. Reescreva a pergunta a seguir em português, de forma cordial e \
direta, em uma única frase. Não acrescente novas perguntas.";

/// Query for the next question of a session
#[derive(Debug, Clone)]
pub struct GetNextQuestionQuery {
    pub session_id: SessionId,
}

/// Result of the next-question query
#[derive(Debug, Clone)]
pub struct GetNextQuestionResult {
    pub step: AssessmentStep,
    /// Text to show the respondent; `None` once the session is finished
    pub prompt: Option<String>,
    /// True when `prompt` came from the text generator
    pub generated: bool,
}

/// Error type for the next-question query
#[derive(Debug, Clone)]
pub enum GetNextQuestionError {
    NotFound(SessionId),
    Storage(String),
}

impl std::fmt::Display for GetNextQuestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetNextQuestionError::NotFound(id) => write!(f, "Assessment not found: {}", id),
            GetNextQuestionError::Storage(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for GetNextQuestionError {}

impl From<SessionStoreError> for GetNextQuestionError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => GetNextQuestionError::NotFound(id),
            other => GetNextQuestionError::Storage(other.to_string()),
        }
    }
}

/// Handler for the next-question query
pub struct GetNextQuestionHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<AssessmentEngine>,
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl GetNextQuestionHandler {
    pub fn new(store: Arc<dyn SessionStore>, engine: Arc<AssessmentEngine>) -> Self {
        Self {
            store,
            engine,
            generator: None,
            timeout: DEFAULT_PHRASING_TIMEOUT,
        }
    }

    /// Phrases questions through `generator`, waiting at most `timeout`.
    pub fn with_text_generator(mut self, generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        self.generator = Some(generator);
        self.timeout = timeout;
        self
    }

    pub async fn handle(
        &self,
        query: GetNextQuestionQuery,
    ) -> Result<GetNextQuestionResult, GetNextQuestionError> {
        let session = self.store.load(query.session_id).await?;
        let step = self.engine.next_step(&session);

        let (prompt, generated) = match &step.next_question {
            Some(question) => {
                let (text, generated) = self.phrase(&session, question).await;
                (Some(text), generated)
            }
            None => (None, false),
        };

        Ok(GetNextQuestionResult {
            step,
            prompt,
            generated,
        })
    }

    async fn phrase(&self, session: &AssessmentSession, question: &NextQuestion) -> (String, bool) {
        let Some(generator) = &self.generator else {
            return (question.prompt.clone(), false);
        };

        let request = TextRequest::new(session.id, phrasing_prompt(session, question))
            .with_system_prompt(PHRASING_SYSTEM_PROMPT)
            .with_max_tokens(200)
            .with_temperature(0.4);

        match tokio::time::timeout(self.timeout, generator.generate(request)).await {
            Ok(Ok(text)) if !text.content.trim().is_empty() => {
                debug!(
                    session_id = %session.id,
                    question = %question.id,
                    provider = generator.provider_name(),
                    "Question phrased"
                );
                (text.content.trim().to_string(), true)
            }
            Ok(Ok(_)) => {
                warn!(session_id = %session.id, question = %question.id, "Empty phrasing, using template prompt");
                (question.prompt.clone(), false)
            }
            Ok(Err(err)) => {
                warn!(
                    session_id = %session.id,
                    question = %question.id,
                    error = %err,
                    "Phrasing failed, using template prompt"
                );
                (question.prompt.clone(), false)
            }
            Err(_) => {
                warn!(
                    session_id = %session.id,
                    question = %question.id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Phrasing timed out, using template prompt"
                );
                (question.prompt.clone(), false)
            }
        }
    }
}

fn phrasing_prompt(session: &AssessmentSession, question: &NextQuestion) -> String {
    let mut prompt = format!("Pergunta: {}\n", question.prompt);
    if let Some(persona) = session.persona {
        prompt.push_str(&format!("Perfil do respondente: {}\n", persona.display_name()));
    }
    if let Some(industry) = &session.company_info.industry {
        prompt.push_str(&format!("Setor: {}\n", industry));
    }
    if !question.choices.is_empty() {
        prompt.push_str(&format!("Opções sugeridas: {}\n", question.choices.join(", ")));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemorySessionStore, MockTextGenerator};
    use crate::ports::TextGenerationError;

    async fn setup() -> (Arc<InMemorySessionStore>, SessionId) {
        let store = Arc::new(InMemorySessionStore::new());
        let session = AssessmentSession::new();
        store.save(&session).await.unwrap();
        (store, session.id)
    }

    fn engine() -> Arc<AssessmentEngine> {
        Arc::new(AssessmentEngine::default())
    }

    #[tokio::test]
    async fn returns_template_prompt_without_generator() {
        let (store, id) = setup().await;
        let handler = GetNextQuestionHandler::new(store, engine());

        let result = handler.handle(GetNextQuestionQuery { session_id: id }).await.unwrap();

        assert_eq!(result.prompt.as_deref(), Some("Para começar, qual é o seu papel na empresa?"));
        assert!(!result.generated);
    }

    #[tokio::test]
    async fn uses_generated_text() {
        let (store, id) = setup().await;
        let generator = Arc::new(MockTextGenerator::new().with_response("Qual é a sua função na empresa?"));
        let handler = GetNextQuestionHandler::new(store, engine())
            .with_text_generator(generator.clone(), Duration::from_secs(1));

        let result = handler.handle(GetNextQuestionQuery { session_id: id }).await.unwrap();

        assert_eq!(result.prompt.as_deref(), Some("Qual é a sua função na empresa?"));
        assert!(result.generated);
        assert_eq!(generator.call_count(), 1);
        assert!(generator.get_calls()[0].prompt.contains("seu papel na empresa"));
    }

    #[tokio::test]
    async fn falls_back_on_generator_error() {
        let (store, id) = setup().await;
        let generator = Arc::new(
            MockTextGenerator::new().with_error(TextGenerationError::unavailable("down")),
        );
        let handler = GetNextQuestionHandler::new(store, engine())
            .with_text_generator(generator, Duration::from_secs(1));

        let result = handler.handle(GetNextQuestionQuery { session_id: id }).await.unwrap();

        assert_eq!(result.prompt.as_deref(), Some("Para começar, qual é o seu papel na empresa?"));
        assert!(!result.generated);
    }

    #[tokio::test]
    async fn falls_back_on_timeout() {
        let (store, id) = setup().await;
        let generator = Arc::new(
            MockTextGenerator::new()
                .with_response("tarde demais")
                .with_delay(Duration::from_millis(500)),
        );
        let handler = GetNextQuestionHandler::new(store, engine())
            .with_text_generator(generator, Duration::from_millis(20));

        let result = handler.handle(GetNextQuestionQuery { session_id: id }).await.unwrap();

        assert_eq!(result.prompt.as_deref(), Some("Para começar, qual é o seu papel na empresa?"));
        assert!(!result.generated);
    }

    #[tokio::test]
    async fn missing_session_is_not_found() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = GetNextQuestionHandler::new(store, engine());
        let id = SessionId::new();

        let result = handler.handle(GetNextQuestionQuery { session_id: id }).await;

        assert!(matches!(result, Err(GetNextQuestionError::NotFound(missing)) if missing == id));
    }
}
