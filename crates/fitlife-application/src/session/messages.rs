//! User-facing failure messages of the session operations.

use fitlife_core::account::ApiFailure;
use fitlife_core::session::{AuthFailure, FailureKind};

pub const INCOMPLETE_FIELDS: &str = "please complete all fields";
pub const INCORRECT_CREDENTIALS: &str = "incorrect credentials";
pub const NO_PERMISSION: &str = "no permission";
pub const SERVICE_NOT_FOUND: &str = "service not found";
pub const SERVER_ERROR: &str = "server error, try later";
pub const NO_CONNECTION: &str = "no internet connection";
pub const UNEXPECTED: &str = "unexpected error";
pub const EMAIL_REJECTED: &str = "email already registered or invalid data";
pub const USER_EXISTS: &str = "this user already exists";
pub const SESSION_EXPIRED: &str = "session expired, please log in again";
pub const PROFILE_FORBIDDEN: &str = "no permission to view this profile";
pub const USER_NOT_FOUND: &str = "user not found";
pub const NO_SESSION: &str = "no active session, please log in";
pub const SAVE_FAILED: &str = "could not save session";

pub fn incomplete_fields() -> AuthFailure {
    AuthFailure::new(FailureKind::Validation, INCOMPLETE_FIELDS)
}

pub fn no_session() -> AuthFailure {
    AuthFailure::new(FailureKind::NoSession, NO_SESSION)
}

pub fn save_failed() -> AuthFailure {
    AuthFailure::new(FailureKind::Storage, SAVE_FAILED)
}

/// Message table shared by login and the fallback of the other operations.
pub fn login_failure(failure: &ApiFailure) -> AuthFailure {
    match failure {
        ApiFailure::Unauthorized => {
            AuthFailure::new(FailureKind::Unauthorized, INCORRECT_CREDENTIALS)
        }
        ApiFailure::Forbidden => AuthFailure::new(FailureKind::Forbidden, NO_PERMISSION),
        ApiFailure::NotFound => AuthFailure::new(FailureKind::NotFound, SERVICE_NOT_FOUND),
        ApiFailure::Server { .. } => AuthFailure::new(FailureKind::Server, SERVER_ERROR),
        ApiFailure::NoConnectivity { .. } => {
            AuthFailure::new(FailureKind::NoConnectivity, NO_CONNECTION)
        }
        ApiFailure::Status { .. } => {
            AuthFailure::new(FailureKind::Rejected, unexpected(&failure.to_string()))
        }
        ApiFailure::Unknown { message } => {
            AuthFailure::new(FailureKind::Unknown, unexpected(message))
        }
    }
}

/// Login table plus the registration-specific 400 and 409 messages.
pub fn register_failure(failure: &ApiFailure) -> AuthFailure {
    match failure.status() {
        Some(400) => AuthFailure::new(FailureKind::Rejected, EMAIL_REJECTED),
        Some(409) => AuthFailure::new(FailureKind::Rejected, USER_EXISTS),
        _ => login_failure(failure),
    }
}

/// Profile refresh table: 401/403/404 read as session problems.
pub fn profile_failure(failure: &ApiFailure) -> AuthFailure {
    match failure {
        ApiFailure::Unauthorized => AuthFailure::new(FailureKind::Unauthorized, SESSION_EXPIRED),
        ApiFailure::Forbidden => AuthFailure::new(FailureKind::Forbidden, PROFILE_FORBIDDEN),
        ApiFailure::NotFound => AuthFailure::new(FailureKind::NotFound, USER_NOT_FOUND),
        _ => login_failure(failure),
    }
}

fn unexpected(description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        UNEXPECTED.to_string()
    } else {
        format!("{UNEXPECTED}: {description}")
    }
}
