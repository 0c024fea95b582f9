//! FinishAssessmentHandler - Hand a finished session to report generation

use std::sync::Arc;
use tracing::info;

use crate::domain::analysis::CompletionMetrics;
use crate::domain::conversation::{AssessmentEngine, FinishReason};
use crate::domain::foundation::SessionId;
use crate::domain::routing::RoutingResult;
use crate::ports::{
    ReportError, ReportGenerator, ReportRequest, ReportTicket, SessionStore, SessionStoreError,
};

/// Command to finish an assessment
#[derive(Debug, Clone)]
pub struct FinishAssessmentCommand {
    pub session_id: SessionId,
}

/// Result of finishing an assessment
#[derive(Debug, Clone)]
pub struct FinishAssessmentResult {
    pub ticket: ReportTicket,
    pub metrics: CompletionMetrics,
    pub routing: RoutingResult,
    /// `None` when the respondent stopped before the policy would have
    pub finish_reason: Option<FinishReason>,
}

/// Error type for finishing assessments
#[derive(Debug, Clone)]
pub enum FinishAssessmentError {
    NotFound(SessionId),
    Storage(String),
    Report(ReportError),
}

impl std::fmt::Display for FinishAssessmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinishAssessmentError::NotFound(id) => write!(f, "Assessment not found: {}", id),
            FinishAssessmentError::Storage(err) => write!(f, "Storage error: {}", err),
            FinishAssessmentError::Report(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for FinishAssessmentError {}

impl From<SessionStoreError> for FinishAssessmentError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => FinishAssessmentError::NotFound(id),
            other => FinishAssessmentError::Storage(other.to_string()),
        }
    }
}

impl From<ReportError> for FinishAssessmentError {
    fn from(err: ReportError) -> Self {
        FinishAssessmentError::Report(err)
    }
}

/// Handler for finishing assessments
pub struct FinishAssessmentHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<AssessmentEngine>,
    reports: Arc<dyn ReportGenerator>,
}

impl FinishAssessmentHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        engine: Arc<AssessmentEngine>,
        reports: Arc<dyn ReportGenerator>,
    ) -> Self {
        Self {
            store,
            engine,
            reports,
        }
    }

    pub async fn handle(
        &self,
        cmd: FinishAssessmentCommand,
    ) -> Result<FinishAssessmentResult, FinishAssessmentError> {
        let session = self.store.load(cmd.session_id).await?;

        let step = self.engine.next_step(&session);
        let routing = self.engine.route(&session);
        let finish_reason = step.decision.reason;

        let ticket = self
            .reports
            .submit(ReportRequest {
                session: session.clone(),
                metrics: step.metrics.clone(),
                routing: routing.clone(),
                finish_reason,
            })
            .await?;

        info!(
            session_id = %session.id,
            specialist = %routing.specialist,
            completeness = step.metrics.completeness_score.value(),
            report_id = %ticket.id,
            "Assessment finished"
        );

        Ok(FinishAssessmentResult {
            ticket,
            metrics: step.metrics,
            routing,
            finish_reason,
        })
    }
}
