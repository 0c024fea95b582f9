//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Session persistence (in-memory, YAML files)
//! - `ai` - Text generation (mock, Anthropic)
//! - `report` - Report handoff (in-memory queue)

pub mod ai;
pub mod report;
pub mod storage;

pub use ai::{AnthropicConfig, AnthropicTextGenerator, MockTextGenerator};
pub use report::InMemoryReportQueue;
pub use storage::{FileSessionStore, InMemorySessionStore};
