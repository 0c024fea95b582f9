//! Mock Text Generator for testing.
//!
//! # Features
//!
//! - Pre-configured responses
//! - Simulated delays for timeout testing
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response("Em qual setor vocês atuam?")
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GeneratedText, TextGenerationError, TextGenerator, TextRequest, TokenUsage};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(TextGenerationError),
}

/// Mock generator, configurable to return specific text, stall, or fail.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<TextRequest>>>,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: TextGenerationError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<TextRequest> {
        lock(&self.calls).clone()
    }

    /// Echoes the prompt when the queue is empty.
    fn next_response(&self, request: &TextRequest) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(request.prompt.clone()))
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: TextRequest) -> Result<GeneratedText, TextGenerationError> {
        lock(&self.calls).push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response(&request) {
            MockResponse::Success(content) => Ok(GeneratedText {
                content,
                model: "mock-model-1".to_string(),
                usage: TokenUsage::new(10, 20),
            }),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;

    fn request(prompt: &str) -> TextRequest {
        TextRequest::new(SessionId::new(), prompt)
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let generator = MockTextGenerator::new()
            .with_response("primeira")
            .with_response("segunda");

        let first = generator.generate(request("a")).await.unwrap();
        let second = generator.generate(request("b")).await.unwrap();

        assert_eq!(first.content, "primeira");
        assert_eq!(second.content, "segunda");
    }

    #[tokio::test]
    async fn echoes_prompt_when_queue_empty() {
        let generator = MockTextGenerator::new();
        let text = generator.generate(request("Qual é o setor?")).await.unwrap();
        assert_eq!(text.content, "Qual é o setor?");
    }

    #[tokio::test]
    async fn returns_injected_error() {
        let generator =
            MockTextGenerator::new().with_error(TextGenerationError::rate_limited(30));

        let result = generator.generate(request("x")).await;

        assert_eq!(result.unwrap_err(), TextGenerationError::rate_limited(30));
    }

    #[tokio::test]
    async fn tracks_calls_across_clones() {
        let generator = MockTextGenerator::new();
        let clone = generator.clone();

        clone.generate(request("uma")).await.unwrap();
        generator.generate(request("duas")).await.unwrap();

        assert_eq!(generator.call_count(), 2);
        assert_eq!(generator.get_calls()[0].prompt, "uma");
    }

    #[tokio::test]
    async fn delay_is_applied() {
        let generator = MockTextGenerator::new().with_delay(Duration::from_millis(50));
        let start = std::time::Instant::now();

        generator.generate(request("x")).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
