//! RouteSpecialistHandler - Recommend a specialist for a session

use std::sync::Arc;

use crate::domain::conversation::AssessmentEngine;
use crate::domain::foundation::SessionId;
use crate::domain::routing::RoutingResult;
use crate::ports::{SessionStore, SessionStoreError};

/// Query for the recommended specialist
#[derive(Debug, Clone)]
pub struct RouteSpecialistQuery {
    pub session_id: SessionId,
}

/// Result of routing
#[derive(Debug, Clone)]
pub struct RouteSpecialistResult {
    pub routing: RoutingResult,
}

/// Error type for routing
#[derive(Debug, Clone)]
pub enum RouteSpecialistError {
    NotFound(SessionId),
    Storage(String),
}

impl std::fmt::Display for RouteSpecialistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteSpecialistError::NotFound(id) => write!(f, "Assessment not found: {}", id),
            RouteSpecialistError::Storage(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for RouteSpecialistError {}

impl From<SessionStoreError> for RouteSpecialistError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => RouteSpecialistError::NotFound(id),
            other => RouteSpecialistError::Storage(other.to_string()),
        }
    }
}

/// Handler for routing queries. Read-only: the session is not saved.
pub struct RouteSpecialistHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<AssessmentEngine>,
}

impl RouteSpecialistHandler {
    pub fn new(store: Arc<dyn SessionStore>, engine: Arc<AssessmentEngine>) -> Self {
        Self { store, engine }
    }

    pub async fn handle(
        &self,
        query: RouteSpecialistQuery,
    ) -> Result<RouteSpecialistResult, RouteSpecialistError> {
        let session = self.store.load(query.session_id).await?;
        let routing = self.engine.route(&session);
        Ok(RouteSpecialistResult { routing })
    }
}
