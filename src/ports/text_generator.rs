//! Text Generator Port - Interface for phrasing questions with an LLM.
//!
//! The assessment never depends on generated text: callers fall back to
//! the template prompt when generation fails or is too slow.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

/// Port for external text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate one piece of text (non-streaming).
    async fn generate(&self, request: TextRequest) -> Result<GeneratedText, TextGenerationError>;

    /// Short provider name for logs (e.g. "anthropic", "mock").
    fn provider_name(&self) -> &str;
}

/// Request for generated text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub session_id: SessionId,
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl TextRequest {
    pub fn new(session_id: SessionId, prompt: impl Into<String>) -> Self {
        Self {
            session_id,
            system_prompt: None,
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Generated text and its accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
}

/// Text generation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextGenerationError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl TextGenerationError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn timeout(timeout_secs: u32) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TextGenerationError::RateLimited { .. }
                | TextGenerationError::Unavailable { .. }
                | TextGenerationError::Network(_)
                | TextGenerationError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_works() {
        let request = TextRequest::new(SessionId::new(), "Reformule a pergunta")
            .with_system_prompt("Seja breve")
            .with_max_tokens(120)
            .with_temperature(0.3);

        assert_eq!(request.prompt, "Reformule a pergunta");
        assert_eq!(request.system_prompt.as_deref(), Some("Seja breve"));
        assert_eq!(request.max_tokens, Some(120));
        assert_eq!(request.temperature, Some(0.3));
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(40, 12);
        assert_eq!(usage.total_tokens, 52);
    }

    #[test]
    fn retryable_classification() {
        assert!(TextGenerationError::rate_limited(30).is_retryable());
        assert!(TextGenerationError::unavailable("down").is_retryable());
        assert!(TextGenerationError::network("reset").is_retryable());
        assert!(TextGenerationError::timeout(8).is_retryable());

        assert!(!TextGenerationError::AuthenticationFailed.is_retryable());
        assert!(!TextGenerationError::parse("bad json").is_retryable());
        assert!(!TextGenerationError::InvalidRequest("empty".to_string()).is_retryable());
    }
}
