//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - Persistence of the assessment aggregate
//! - `TextGenerator` - Optional LLM phrasing of the next question
//! - `ReportGenerator` - Handoff of finished assessments

mod report_generator;
mod session_store;
mod text_generator;

pub use report_generator::{ReportError, ReportGenerator, ReportRequest, ReportTicket};
pub use session_store::{SessionStore, SessionStoreError};
pub use text_generator::{
    GeneratedText, TextGenerationError, TextGenerator, TextRequest, TokenUsage,
};
