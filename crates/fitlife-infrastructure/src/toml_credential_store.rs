//! File-backed credential store.
//!
//! Persists the credential record in `credentials.toml` and keeps a cached
//! copy in memory so reads never touch the disk.

use crate::credential_record::{CredentialRecord, RecordChange};
use crate::paths::FitlifePaths;
use crate::storage::AtomicTomlFile;
use fitlife_core::credential::{CredentialField, CredentialStore, CredentialValue};
use fitlife_core::error::{FitlifeError, Result};
use fitlife_core::session::Session;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Durable [`CredentialStore`] backed by an atomically written TOML file.
///
/// All writes re-read the file under an exclusive lock before applying the
/// change, so two processes sharing the file do not lose each other's keys.
///
/// # Example
///
/// ```ignore
/// use fitlife_infrastructure::{FitlifePaths, TomlCredentialStore};
///
/// let store = TomlCredentialStore::open(&FitlifePaths::platform()?).await?;
/// store.save(CredentialField::Token, "abc123".into()).await?;
/// ```
#[derive(Clone)]
pub struct TomlCredentialStore {
    /// Cached record, also serializes writers within this process.
    cache: Arc<Mutex<CredentialRecord>>,
    file: Arc<AtomicTomlFile<CredentialRecord>>,
}

impl TomlCredentialStore {
    /// Opens (or lazily creates) the credential file under `paths`.
    pub async fn open(paths: &FitlifePaths) -> Result<Self> {
        Self::open_at(paths.credentials_file()).await
    }

    pub async fn open_at(path: PathBuf) -> Result<Self> {
        let file = Arc::new(AtomicTomlFile::<CredentialRecord>::new(path).private());

        let loader = file.clone();
        let record = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| FitlifeError::internal(format!("Failed to join task: {e}")))??
            .unwrap_or_default();

        tracing::debug!(
            path = %file.path().display(),
            entries = record.len(),
            "Loaded credential record"
        );

        Ok(Self {
            cache: Arc::new(Mutex::new(record)),
            file,
        })
    }

    async fn write(&self, change: RecordChange) -> Result<()> {
        let mut cache = self.cache.lock().await;

        let file = self.file.clone();
        let written = tokio::task::spawn_blocking(move || {
            file.update(CredentialRecord::default(), |record| record.apply(change))
        })
        .await
        .map_err(|e| FitlifeError::internal(format!("Failed to join task: {e}")))?
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to persist credential record");
            FitlifeError::from(e)
        })?;

        *cache = written;
        Ok(())
    }
}

#[async_trait::async_trait]
impl CredentialStore for TomlCredentialStore {
    async fn save(&self, field: CredentialField, value: CredentialValue) -> Result<()> {
        self.write(RecordChange::set_field(field, value)).await
    }

    async fn get(&self, field: CredentialField) -> Result<Option<CredentialValue>> {
        Ok(self.cache.lock().await.field(field).cloned())
    }

    async fn clear(&self, field: CredentialField) -> Result<()> {
        self.write(RecordChange::remove_field(field)).await
    }

    async fn clear_all(&self) -> Result<()> {
        self.write(RecordChange::ClearSession).await
    }

    /// Writes the whole session in one locked file update.
    async fn save_session(&self, session: &Session) -> Result<()> {
        self.write(RecordChange::SetSession(session.clone())).await
    }

    async fn save_user_stat(&self, email: &str, stat: &str, value: &str) -> Result<()> {
        self.write(RecordChange::set_stat(email, stat, value)?).await
    }

    async fn get_user_stat(&self, email: &str, stat: &str) -> Result<Option<String>> {
        self.cache.lock().await.stat(email, stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open(temp_dir: &TempDir) -> TomlCredentialStore {
        TomlCredentialStore::open(&FitlifePaths::with_base(temp_dir.path()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_then_get_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir).await;

        for value in ["abc123", "", "with spaces", "ünïcödé", "\"quoted\""] {
            store
                .save(CredentialField::Token, CredentialValue::text(value))
                .await
                .unwrap();
            assert_eq!(
                store.get(CredentialField::Token).await.unwrap(),
                Some(CredentialValue::text(value))
            );
        }
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = open(&temp_dir).await;
            store.save(CredentialField::Email, "a@b.com".into()).await.unwrap();
            store.save(CredentialField::LoggedIn, true.into()).await.unwrap();
            store.save(CredentialField::Token, "".into()).await.unwrap();
        }

        let reopened = open(&temp_dir).await;
        let session = reopened.load_session().await.unwrap();
        assert_eq!(session.user_email.as_deref(), Some("a@b.com"));
        assert_eq!(session.auth_token.as_deref(), Some(""));
        assert!(session.is_logged_in);
    }

    #[tokio::test]
    async fn test_never_set_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir).await;

        for field in CredentialField::ALL {
            assert!(store.get(field).await.unwrap().is_none());
        }
        assert!(store.get_user_stat("a@b.com", "weight").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_all_keeps_stats() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir).await;
        store.save(CredentialField::Token, "abc".into()).await.unwrap();
        store.save(CredentialField::Name, "Emily".into()).await.unwrap();
        store.save_user_stat("a@b.com", "weight", "70").await.unwrap();

        store.clear_all().await.unwrap();
        store.clear_all().await.unwrap();

        let session = open(&temp_dir).await.load_session().await.unwrap();
        assert!(session.is_empty());
        assert_eq!(
            store.get_user_stat("a@b.com", "weight").await.unwrap().as_deref(),
            Some("70")
        );
    }

    #[tokio::test]
    async fn test_save_session_is_one_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir).await;
        store.save(CredentialField::Name, "Old Name".into()).await.unwrap();

        let session = Session {
            auth_token: Some("new-token".to_string()),
            user_email: Some("a@b.com".to_string()),
            user_name: None,
            is_logged_in: true,
        };
        store.save_session(&session).await.unwrap();

        let reopened = open(&temp_dir).await.load_session().await.unwrap();
        assert_eq!(reopened, session);
    }

    #[tokio::test]
    async fn test_colliding_stat_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir).await;
        store.save(CredentialField::LoggedIn, true.into()).await.unwrap();

        assert!(store.save_user_stat("in", "is_logged", "x").await.is_err());

        let session = open(&temp_dir).await.load_session().await.unwrap();
        assert!(session.is_logged_in);
    }

    #[tokio::test]
    async fn test_clear_single_field() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir).await;
        store.save(CredentialField::Token, "abc".into()).await.unwrap();
        store.save(CredentialField::Email, "a@b.com".into()).await.unwrap();

        store.clear(CredentialField::Token).await.unwrap();

        assert!(store.token().await.unwrap().is_none());
        assert!(store.get(CredentialField::Email).await.unwrap().is_some());
    }
}
