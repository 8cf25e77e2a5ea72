//! Session domain model.

use serde::{Deserialize, Serialize};

/// The current user's authentication state as persisted on the device.
///
/// Every field maps to one key of the credential record; see
/// [`crate::credential::CredentialField`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token returned by the account API. May be an empty string when
    /// the server accepted the credentials without issuing a token.
    pub auth_token: Option<String>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub is_logged_in: bool,
}

impl Session {
    /// Returns the token only when it is present and non-empty.
    pub fn bearer_token(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Returns the email only when it is present and non-empty.
    pub fn email(&self) -> Option<&str> {
        self.user_email.as_deref().filter(|email| !email.is_empty())
    }

    /// True when no session field carries a value.
    pub fn is_empty(&self) -> bool {
        self.auth_token.is_none()
            && self.user_email.is_none()
            && self.user_name.is_none()
            && !self.is_logged_in
    }
}
