//! User roles.
//!
//! Roles only drive which dashboard the client shows; the server does not
//! authorize anything based on them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stat name under which a user's role is stored.
pub const ROLE_STAT: &str = "role";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Member,
    Trainer,
    Nutritionist,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Member,
        UserRole::Trainer,
        UserRole::Nutritionist,
        UserRole::Admin,
    ];

    /// Parses a free-form role string, case-insensitively.
    ///
    /// Missing or unrecognised values fall back to [`UserRole::Member`].
    pub fn parse(value: Option<&str>) -> Self {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Self::default();
        };

        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or_else(|| {
                tracing::debug!(role = raw, "Unknown role, falling back to member");
                Self::default()
            })
    }

    /// Storage form of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Member => "MEMBER",
            UserRole::Trainer => "TRAINER",
            UserRole::Nutritionist => "NUTRITIONIST",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            UserRole::Member => "Member",
            UserRole::Trainer => "Trainer",
            UserRole::Nutritionist => "Nutritionist",
            UserRole::Admin => "Administrator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
