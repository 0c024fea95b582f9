//! File-based Session Store Adapter
//!
//! Stores each assessment session as one YAML file named after its id.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::assessment::AssessmentSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for assessment sessions
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created on first save.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn session_file_path(&self, id: SessionId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }

    async fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, session: &AssessmentSession) -> Result<(), SessionStoreError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        // Write to a sibling file first so readers never see a partial session
        let file_path = self.session_file_path(session.id);
        let tmp_path = file_path.with_extension("yaml.tmp");
        fs::write(&tmp_path, yaml)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp_path, &file_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn load(&self, id: SessionId) -> Result<AssessmentSession, SessionStoreError> {
        let file_path = self.session_file_path(id);

        if !file_path.exists() {
            return Err(SessionStoreError::NotFound(id));
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| SessionStoreError::IoError(e.to_string()))?;

        serde_yaml::from_str(&yaml)
            .map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))
    }

    async fn exists(&self, id: SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.session_file_path(id).exists())
    }

    async fn delete(&self, id: SessionId) -> Result<(), SessionStoreError> {
        let file_path = self.session_file_path(id);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| SessionStoreError::IoError(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{Answer, FieldKey, Persona, QuestionId, QuestionPool};
    use tempfile::TempDir;

    fn answered_session() -> AssessmentSession {
        let pool = QuestionPool::default_pool();
        let mut session = AssessmentSession::new();
        session.set_persona(Persona::EngineeringTech);
        let goals = pool.get(&QuestionId::new("primary_goals")).unwrap();
        session
            .record_answer(goals, &Answer::Choices(vec!["Aumentar produtividade dev".to_string()]))
            .unwrap();
        session
    }

    #[tokio::test]
    async fn save_and_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let session = answered_session();

        store.save(&session).await.unwrap();
        let loaded = store.load(session.id).await.unwrap();

        assert_eq!(loaded, session);
        assert!(loaded.has_field(FieldKey::PrimaryGoals));
    }

    #[tokio::test]
    async fn creates_base_directory_on_save() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data").join("sessions");
        let store = FileSessionStore::new(&nested);
        let session = answered_session();

        store.save(&session).await.unwrap();

        assert!(nested.join(format!("{}.yaml", session.id)).exists());
    }

    #[tokio::test]
    async fn load_missing_returns_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        let result = store.load(SessionId::new()).await;

        assert!(matches!(result, Err(SessionStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn corrupt_file_is_a_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let id = SessionId::new();
        std::fs::write(temp_dir.path().join(format!("{}.yaml", id)), "id: [unclosed").unwrap();

        let result = store.load(id).await;

        assert!(matches!(result, Err(SessionStoreError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn delete_removes_file_and_tolerates_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        let session = answered_session();
        store.save(&session).await.unwrap();
        assert!(store.exists(session.id).await.unwrap());

        store.delete(session.id).await.unwrap();
        assert!(!store.exists(session.id).await.unwrap());

        store.delete(session.id).await.unwrap();
    }
}
