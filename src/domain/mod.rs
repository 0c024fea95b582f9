//! Domain layer containing the assessment decision logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, percentages, timestamps)
//! - `assessment` - The session aggregate, questions, personas and specialists
//! - `analysis` - Completion/gap tracking
//! - `routing` - Scoring rules and the specialist router
//! - `conversation` - Question selection, termination and the engine tying them together

pub mod analysis;
pub mod assessment;
pub mod conversation;
pub mod foundation;
pub mod routing;
