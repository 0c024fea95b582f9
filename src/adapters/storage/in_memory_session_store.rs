//! In-Memory Session Store Adapter
//!
//! Keeps assessment sessions in memory. Useful for tests and the console driver.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::AssessmentSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for assessment sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, AssessmentSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, session: &AssessmentSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn load(&self, id: SessionId) -> Result<AssessmentSession, SessionStoreError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn exists(&self, id: SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.read().await.contains_key(&id))
    }

    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{FieldValue, Persona};

    fn sample_session() -> AssessmentSession {
        let mut session = AssessmentSession::new();
        session.set_persona(Persona::FinanceOps);
        session.apply(vec![FieldValue::Industry("Varejo".to_string())]);
        session
    }

    #[tokio::test]
    async fn save_and_load_round_trips() {
        let store = InMemorySessionStore::new();
        let session = sample_session();

        store.save(&session).await.unwrap();
        let loaded = store.load(session.id).await.unwrap();

        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn load_missing_returns_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let result = store.load(id).await;

        assert!(matches!(result, Err(SessionStoreError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn save_overwrites_previous_version() {
        let store = InMemorySessionStore::new();
        let mut session = sample_session();
        store.save(&session).await.unwrap();

        session.apply(vec![FieldValue::Budget("R$ 50-200 mil".to_string())]);
        store.save(&session).await.unwrap();

        let loaded = store.load(session.id).await.unwrap();
        assert_eq!(loaded.goals.budget.as_deref(), Some("R$ 50-200 mil"));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn exists_and_delete() {
        let store = InMemorySessionStore::new();
        let session = sample_session();
        store.save(&session).await.unwrap();
        assert!(store.exists(session.id).await.unwrap());

        store.delete(session.id).await.unwrap();

        assert!(!store.exists(session.id).await.unwrap());
        // Deleting again is a no-op
        store.delete(session.id).await.unwrap();
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let store = InMemorySessionStore::new();
        let clone = store.clone();
        clone.save(&sample_session()).await.unwrap();

        assert_eq!(store.session_count().await, 1);
        store.clear().await;
        assert_eq!(clone.session_count().await, 0);
    }
}
