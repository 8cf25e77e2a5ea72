//! Observable session state published by the session controller.

use super::model::Session;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication phase of the session state machine.
///
/// ```text
/// Anonymous ──login/register──▶ Authenticating ──ok──▶ Authenticated
///                                     │                     │
///                                   error                 logout
///                                     ▼                     ▼
///                           AuthenticationFailed ──retry──▶ Authenticating
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AuthPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
    AuthenticationFailed { message: String },
}

impl AuthPhase {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// The user-facing message of a failed attempt.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::AuthenticationFailed { message } => Some(message),
            _ => None,
        }
    }
}

/// Classification of a failed session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Blank input, detected before any network call.
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    Server,
    /// Any other HTTP status (400, 409, ...).
    Rejected,
    NoConnectivity,
    /// No usable token for an operation that needs one.
    NoSession,
    /// The response was fine but persisting it failed.
    Storage,
    Unknown,
}

/// A failed session operation together with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl AuthFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AuthFailure {}

/// Snapshot of everything the presentation layer may observe about the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: AuthPhase,
    pub session: Session,
    /// Last profile refresh error; cleared by the next successful refresh.
    pub profile_error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_logged_in
    }
}
