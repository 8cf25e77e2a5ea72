//! Credential store trait.
//!
//! Defines the durable key-value layer that holds the session fields and the
//! per-user stat entries.

use crate::error::{FitlifeError, Result};
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical session fields of the credential record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    Token,
    Email,
    Name,
    LoggedIn,
}

impl CredentialField {
    /// All session fields, in the order they are cleared on logout.
    pub const ALL: [CredentialField; 4] = [
        CredentialField::Token,
        CredentialField::LoggedIn,
        CredentialField::Name,
        CredentialField::Email,
    ];

    /// Storage key of the field.
    pub fn key(self) -> &'static str {
        match self {
            CredentialField::Token => "token",
            CredentialField::Email => "email",
            CredentialField::Name => "name",
            CredentialField::LoggedIn => "is_logged_in",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A stored value: the record only holds strings and booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialValue {
    Flag(bool),
    Text(String),
}

impl CredentialValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for CredentialValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CredentialValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CredentialValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Composite key of a per-user stat entry: `{stat}_{email}`.
///
/// Stats share the record with the session fields, so a combination that
/// spells a session key (`"is_logged"` + `"in"`) is rejected.
pub fn user_stat_key(email: &str, stat: &str) -> Result<String> {
    let key = format!("{stat}_{email}");
    if CredentialField::ALL.iter().any(|field| field.key() == key) {
        return Err(FitlifeError::storage(format!(
            "Stat key '{key}' collides with a session field"
        )));
    }
    Ok(key)
}

/// Durable per-app storage for session fields and per-user stats.
///
/// Implementations persist each write before returning. Reads of a key that
/// was never written (or was cleared) return `None`.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persists one session field.
    async fn save(&self, field: CredentialField, value: CredentialValue) -> Result<()>;

    /// Returns the most recently saved value of a field.
    async fn get(&self, field: CredentialField) -> Result<Option<CredentialValue>>;

    /// Removes one session field.
    async fn clear(&self, field: CredentialField) -> Result<()>;

    /// Removes every session field. Per-user stats are kept.
    async fn clear_all(&self) -> Result<()>;

    /// Persists a whole session. `None` fields are removed.
    ///
    /// The default writes field by field with the login flag last, so an
    /// interrupted write from an anonymous record never reads back as logged
    /// in. Stores that can write the record in one step should override it.
    async fn save_session(&self, session: &Session) -> Result<()> {
        let text_fields = [
            (CredentialField::Token, &session.auth_token),
            (CredentialField::Email, &session.user_email),
            (CredentialField::Name, &session.user_name),
        ];
        for (field, value) in text_fields {
            match value {
                Some(value) => self.save(field, CredentialValue::text(value.as_str())).await?,
                None => self.clear(field).await?,
            }
        }
        self.save(CredentialField::LoggedIn, CredentialValue::Flag(session.is_logged_in))
            .await
    }

    /// Persists a per-user stat under `{stat}_{email}`.
    async fn save_user_stat(&self, email: &str, stat: &str, value: &str) -> Result<()>;

    /// Returns a per-user stat, or `None` if it was never saved.
    async fn get_user_stat(&self, email: &str, stat: &str) -> Result<Option<String>>;

    /// Returns the stored token, if any.
    async fn token(&self) -> Result<Option<String>> {
        Ok(self
            .get(CredentialField::Token)
            .await?
            .and_then(|value| value.as_text().map(str::to_string)))
    }

    /// Assembles the full session from the individual fields.
    ///
    /// A missing login flag reads as `false`.
    async fn load_session(&self) -> Result<Session> {
        let text = |value: Option<CredentialValue>| {
            value.and_then(|v| v.as_text().map(str::to_string))
        };

        Ok(Session {
            auth_token: text(self.get(CredentialField::Token).await?),
            user_email: text(self.get(CredentialField::Email).await?),
            user_name: text(self.get(CredentialField::Name).await?),
            is_logged_in: self
                .get(CredentialField::LoggedIn)
                .await?
                .and_then(|value| value.as_flag())
                .unwrap_or(false),
        })
    }
}
