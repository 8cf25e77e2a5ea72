//! Process-local credential store.

use crate::credential_record::{CredentialRecord, RecordChange};
use fitlife_core::credential::{CredentialField, CredentialStore, CredentialValue};
use fitlife_core::error::Result;
use fitlife_core::session::Session;
use std::sync::Mutex;

/// [`CredentialStore`] that keeps the record in memory only.
///
/// Used for ephemeral sessions (`--ephemeral` in the CLI) and in tests.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    record: Mutex<CredentialRecord>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&self, change: RecordChange) {
        self.lock().apply(change);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CredentialRecord> {
        // A poisoned lock still holds a consistent record: every change is a
        // single map operation.
        self.record
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn save(&self, field: CredentialField, value: CredentialValue) -> Result<()> {
        self.apply(RecordChange::set_field(field, value));
        Ok(())
    }

    async fn get(&self, field: CredentialField) -> Result<Option<CredentialValue>> {
        Ok(self.lock().field(field).cloned())
    }

    async fn clear(&self, field: CredentialField) -> Result<()> {
        self.apply(RecordChange::remove_field(field));
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.apply(RecordChange::ClearSession);
        Ok(())
    }

    async fn save_session(&self, session: &Session) -> Result<()> {
        self.apply(RecordChange::SetSession(session.clone()));
        Ok(())
    }

    async fn save_user_stat(&self, email: &str, stat: &str, value: &str) -> Result<()> {
        self.apply(RecordChange::set_stat(email, stat, value)?);
        Ok(())
    }

    async fn get_user_stat(&self, email: &str, stat: &str) -> Result<Option<String>> {
        self.lock().stat(email, stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_every_field() {
        let store = InMemoryCredentialStore::new();

        for field in [CredentialField::Token, CredentialField::Email, CredentialField::Name] {
            for value in ["x", ""] {
                store.save(field, CredentialValue::text(value)).await.unwrap();
                assert_eq!(
                    store.get(field).await.unwrap(),
                    Some(CredentialValue::text(value))
                );
            }
        }
        store.save(CredentialField::LoggedIn, false.into()).await.unwrap();
        assert_eq!(
            store.get(CredentialField::LoggedIn).await.unwrap(),
            Some(CredentialValue::Flag(false))
        );
    }

    #[tokio::test]
    async fn test_load_session_defaults_flag_to_false() {
        let store = InMemoryCredentialStore::new();
        store.save(CredentialField::Email, "a@b.com".into()).await.unwrap();

        let session = store.load_session().await.unwrap();
        assert!(!session.is_logged_in);
        assert_eq!(session.user_email.as_deref(), Some("a@b.com"));
    }
}
