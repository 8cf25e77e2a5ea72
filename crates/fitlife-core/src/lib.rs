//! Domain layer for the FitLife client.
//!
//! Shared models, repository-style traits and the error type used by the
//! infrastructure, interaction and application crates.

pub mod account;
pub mod avatar;
pub mod config;
pub mod credential;
pub mod error;
pub mod nutrition;
pub mod role;
pub mod session;

// Re-export common error type
pub use error::{FitlifeError, Result};
