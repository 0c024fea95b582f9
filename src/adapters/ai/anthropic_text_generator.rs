//! Anthropic Text Generator - phrases assessment questions with Claude.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_timeout(Duration::from_secs(8));
//!
//! let generator = AnthropicTextGenerator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::ports::{GeneratedText, TextGenerationError, TextGenerator, TextRequest, TokenUsage};

/// Configuration for the Anthropic generator.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "claude-sonnet-4-20250514").
    pub model: String,
    /// Base URL for the API (default: https://api.anthropic.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(8),
            max_retries: 1,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Fallback for rate limits without a parseable retry hint.
const DEFAULT_RETRY_AFTER_SECS: u32 = 60;

/// Anthropic Messages API client.
pub struct AnthropicTextGenerator {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicTextGenerator {
    /// Creates a generator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the HTTP client cannot be built.
    pub fn new(config: AnthropicConfig) -> Result<Self, TextGenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TextGenerationError::unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn to_anthropic_request(&self, request: &TextRequest) -> AnthropicRequest {
        AnthropicRequest {
            model: self.config.model.clone(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(256),
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &TextRequest) -> Result<Response, TextGenerationError> {
        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&self.to_anthropic_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TextGenerationError::timeout(self.config.timeout.as_secs() as u32)
                } else if e.is_connect() {
                    TextGenerationError::network(format!("Connection failed: {}", e))
                } else {
                    TextGenerationError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, TextGenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(map_error_status(status.as_u16(), &error_body))
    }

    async fn parse_response(&self, response: Response) -> Result<GeneratedText, TextGenerationError> {
        let response = self.handle_response_status(response).await?;

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::parse(format!("Failed to parse response: {}", e)))?;

        anthropic_response.into_generated_text()
    }

    async fn attempt(&self, request: &TextRequest) -> Result<GeneratedText, TextGenerationError> {
        let response = self.send_request(request).await?;
        self.parse_response(response).await
    }
}

#[async_trait]
impl TextGenerator for AnthropicTextGenerator {
    async fn generate(&self, request: TextRequest) -> Result<GeneratedText, TextGenerationError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(&request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    debug!(
                        session_id = %request.session_id,
                        retry = retry_count + 1,
                        error = %err,
                        "Retrying text generation"
                    );
                    // Exponential backoff: 1s, 2s, 4s, ...
                    sleep(Duration::from_secs(1 << retry_count.min(5))).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}

/// Maps a non-success status code to a generation error.
fn map_error_status(status: u16, error_body: &str) -> TextGenerationError {
    match status {
        401 | 403 => TextGenerationError::AuthenticationFailed,
        429 => TextGenerationError::rate_limited(parse_retry_after(error_body)),
        400 => TextGenerationError::InvalidRequest(error_body.to_string()),
        500..=599 => {
            TextGenerationError::unavailable(format!("Server error {}: {}", status, error_body))
        }
        _ => TextGenerationError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Parses "try again in Ns" from an error body.
fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
            let idx = message.find("try again in ")?;
            let digits: String = message[idx + 13..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse::<u32>().ok()
        })
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<ContentBlock>,
    usage: AnthropicUsage,
}

impl AnthropicResponse {
    fn into_generated_text(self) -> Result<GeneratedText, TextGenerationError> {
        let content = self
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if content.trim().is_empty() {
            return Err(TextGenerationError::parse("Response contained no text"));
        }

        Ok(GeneratedText {
            content: content.trim().to_string(),
            model: self.model,
            usage: TokenUsage::new(self.usage.input_tokens, self.usage.output_tokens),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}
