//! Analysis Module - Pure domain services over assessment data.
//!
//! # Components
//!
//! - `CompletionTracker` - Weighted completeness score, gaps and topic coverage
//!
//! All functions are pure (no side effects) and stateless. They take the
//! session as input and return computed results.

mod completion;

pub use completion::{
    compute_completion_metrics, CompletionMetrics, CompletionTracker, ESSENTIAL_POINTS,
    IMPORTANT_POINTS, OPTIONAL_POINTS,
};
