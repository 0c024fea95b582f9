//! Readiness Advisor - adaptive AI-readiness assessment engine
//!
//! Decides which question to ask next, how complete an assessment is, when
//! to stop asking, and which specialist should receive the finished session.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
