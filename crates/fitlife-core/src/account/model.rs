//! Account domain models returned by the remote API.

use serde::{Deserialize, Serialize};

/// Identity block of a registration response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Result of a successful registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredAccount {
    pub message: Option<String>,
    pub user: Option<AccountIdentity>,
    pub token: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl AuthenticatedSession {
    /// "First Last" when either part is known, else the username.
    pub fn display_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
            .or_else(|| self.username.clone().filter(|name| !name.is_empty()))
    }
}

/// A user as returned by the profile and user endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
}

impl UserRecord {
    /// The explicit `name`, else "First Last".
    pub fn display_name(&self) -> Option<String> {
        self.name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| join_name(self.first_name.as_deref(), self.last_name.as_deref()))
    }
}

/// One page of the user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    pub users: Vec<UserRecord>,
    pub total: u32,
    pub skip: u32,
    pub limit: u32,
}

fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let joined = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() { None } else { Some(joined) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_display_name_prefers_full_name() {
        let session = AuthenticatedSession {
            username: Some("emilys".to_string()),
            first_name: Some("Emily".to_string()),
            last_name: Some("Johnson".to_string()),
            ..Default::default()
        };
        assert_eq!(session.display_name().as_deref(), Some("Emily Johnson"));
    }

    #[test]
    fn test_login_display_name_falls_back_to_username() {
        let session = AuthenticatedSession {
            username: Some("emilys".to_string()),
            ..Default::default()
        };
        assert_eq!(session.display_name().as_deref(), Some("emilys"));
    }

    #[test]
    fn test_user_record_display_name() {
        let user = UserRecord {
            id: "1".to_string(),
            name: Some("  ".to_string()),
            first_name: Some("Ana".to_string()),
            ..Default::default()
        };
        assert_eq!(user.display_name().as_deref(), Some("Ana"));
    }
}
