//! Remote account API interface.

use super::model::{AuthenticatedSession, RegisteredAccount, UserPage, UserRecord};
use thiserror::Error;

/// Failure of a single remote call, bucketed by cause.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    #[error("unauthorized (401)")]
    Unauthorized,

    #[error("forbidden (403)")]
    Forbidden,

    #[error("not found (404)")]
    NotFound,

    #[error("server error ({status})")]
    Server { status: u16 },

    /// Any other non-2xx status.
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// The request never reached the server (connect failure or timeout).
    #[error("no connectivity: {message}")]
    NoConnectivity { message: String },

    /// Decoding or any other failure.
    #[error("{message}")]
    Unknown { message: String },
}

impl ApiFailure {
    /// Buckets a non-success HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::Server { status },
            _ => Self::Status { status },
        }
    }

    /// HTTP status of the failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::NotFound => Some(404),
            Self::Server { status } | Self::Status { status } => Some(*status),
            Self::NoConnectivity { .. } | Self::Unknown { .. } => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiFailure>;

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Typed operations against the remote account service.
///
/// Every call performs exactly one round-trip: no retry, no backoff.
#[async_trait::async_trait]
pub trait AccountApi: Send + Sync {
    async fn register(&self, registration: &Registration) -> ApiResult<RegisteredAccount>;

    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthenticatedSession>;

    /// Fetches the profile of the user owning `token`.
    async fn fetch_profile(&self, token: &str) -> ApiResult<UserRecord>;

    async fn fetch_user(&self, id: &str) -> ApiResult<UserRecord>;

    async fn list_users(&self) -> ApiResult<UserPage>;
}
