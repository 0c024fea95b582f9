//! Text Generation Adapters.
//!
//! Implementations of the TextGenerator port.
//!
//! ## Available Adapters
//!
//! - `MockTextGenerator` - Configurable mock for testing
//! - `AnthropicTextGenerator` - Anthropic Claude models via the Messages API

mod anthropic_text_generator;
mod mock_text_generator;

pub use anthropic_text_generator::{AnthropicConfig, AnthropicTextGenerator};
pub use mock_text_generator::{MockResponse, MockTextGenerator};
