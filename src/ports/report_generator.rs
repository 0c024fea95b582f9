//! Report Generator Port - handoff of a finished assessment.
//!
//! Report layout and ROI calculations live behind this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::analysis::CompletionMetrics;
use crate::domain::assessment::AssessmentSession;
use crate::domain::conversation::FinishReason;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::routing::RoutingResult;

/// Port for handing finished sessions to report generation.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Queue a report for the session.
    ///
    /// # Errors
    ///
    /// Returns `ReportError` if the report cannot be accepted.
    async fn submit(&self, request: ReportRequest) -> Result<ReportTicket, ReportError>;
}

/// Everything report generation needs about a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub session: AssessmentSession,
    pub metrics: CompletionMetrics,
    pub routing: RoutingResult,
    /// `None` when the respondent finished before the policy would have.
    pub finish_reason: Option<FinishReason>,
}

/// Receipt for an accepted report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTicket {
    pub id: Uuid,
    pub session_id: SessionId,
    pub submitted_at: Timestamp,
}

impl ReportTicket {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            submitted_at: Timestamp::now(),
        }
    }
}

/// Report handoff errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Report rejected: {0}")]
    Rejected(String),

    #[error("Report service unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_records_session() {
        let session_id = SessionId::new();
        let ticket = ReportTicket::new(session_id);
        assert_eq!(ticket.session_id, session_id);
        assert_ne!(ticket.id, ReportTicket::new(session_id).id);
    }

    #[test]
    fn error_display() {
        let err = ReportError::Rejected("duplicate".to_string());
        assert_eq!(err.to_string(), "Report rejected: duplicate");
    }
}
