//! In-Memory Report Queue Adapter
//!
//! Accepts finished assessments and keeps them for inspection.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::ports::{ReportError, ReportGenerator, ReportRequest, ReportTicket};

/// Records every submitted report in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportQueue {
    submitted: Arc<RwLock<Vec<(ReportTicket, ReportRequest)>>>,
}

impl InMemoryReportQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every accepted request in submission order
    pub async fn submitted(&self) -> Vec<ReportRequest> {
        self.submitted
            .read()
            .await
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.submitted.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.submitted.read().await.is_empty()
    }
}

#[async_trait]
impl ReportGenerator for InMemoryReportQueue {
    async fn submit(&self, request: ReportRequest) -> Result<ReportTicket, ReportError> {
        let mut submitted = self.submitted.write().await;
        if submitted
            .iter()
            .any(|(ticket, _)| ticket.session_id == request.session.id)
        {
            return Err(ReportError::Rejected(format!(
                "report already submitted for session {}",
                request.session.id
            )));
        }

        let ticket = ReportTicket::new(request.session.id);
        info!(
            session_id = %request.session.id,
            specialist = %request.routing.specialist,
            "Report queued"
        );
        submitted.push((ticket.clone(), request));
        Ok(ticket)
    }
}
