//! Conversation domain module.
//!
//! Drives one assessment: which question comes next and when to stop.

mod engine;
mod selector;
mod termination;

pub use engine::{AssessmentEngine, AssessmentStep, NextQuestion};
pub use selector::{select_next_question, QuestionSelector};
pub use termination::{
    FinishDecision, FinishReason, TerminationConfig, TerminationConfigError, TerminationPolicy,
};
