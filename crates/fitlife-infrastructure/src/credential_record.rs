//! In-memory form of the credential record shared by the store implementations.

use fitlife_core::credential::{CredentialField, CredentialValue, user_stat_key};
use fitlife_core::error::Result;
use fitlife_core::session::Session;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat key → value mapping, serialized as a single TOML table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialRecord {
    entries: BTreeMap<String, CredentialValue>,
}

/// One write against the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordChange {
    Set { key: String, value: CredentialValue },
    Remove { key: String },
    /// Replaces every session field at once, keeps stats.
    SetSession(Session),
    /// Drops every session field, keeps stats.
    ClearSession,
}

impl RecordChange {
    pub fn set_field(field: CredentialField, value: CredentialValue) -> Self {
        Self::Set {
            key: field.key().to_string(),
            value,
        }
    }

    pub fn remove_field(field: CredentialField) -> Self {
        Self::Remove {
            key: field.key().to_string(),
        }
    }

    pub fn set_stat(email: &str, stat: &str, value: &str) -> Result<Self> {
        Ok(Self::Set {
            key: user_stat_key(email, stat)?,
            value: CredentialValue::text(value),
        })
    }
}

impl CredentialRecord {
    pub fn apply(&mut self, change: RecordChange) {
        match change {
            RecordChange::Set { key, value } => {
                self.entries.insert(key, value);
            }
            RecordChange::Remove { key } => {
                self.entries.remove(&key);
            }
            RecordChange::SetSession(session) => {
                let text_fields = [
                    (CredentialField::Token, session.auth_token),
                    (CredentialField::Email, session.user_email),
                    (CredentialField::Name, session.user_name),
                ];
                for (field, value) in text_fields {
                    match value {
                        Some(value) => {
                            self.entries
                                .insert(field.key().to_string(), CredentialValue::Text(value));
                        }
                        None => {
                            self.entries.remove(field.key());
                        }
                    }
                }
                self.entries.insert(
                    CredentialField::LoggedIn.key().to_string(),
                    CredentialValue::Flag(session.is_logged_in),
                );
            }
            RecordChange::ClearSession => {
                for field in CredentialField::ALL {
                    self.entries.remove(field.key());
                }
            }
        }
    }

    pub fn field(&self, field: CredentialField) -> Option<&CredentialValue> {
        self.entries.get(field.key())
    }

    pub fn stat(&self, email: &str, stat: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .get(&user_stat_key(email, stat)?)
            .map(|value| match value {
                CredentialValue::Text(text) => text.clone(),
                CredentialValue::Flag(flag) => flag.to_string(),
            }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
