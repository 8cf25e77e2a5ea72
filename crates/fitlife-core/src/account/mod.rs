//! Account domain module.
//!
//! - `model`: typed results of the account endpoints
//! - `api`: the `AccountApi` trait and its failure type

mod api;
mod model;

pub use api::{AccountApi, ApiFailure, ApiResult, Registration};
pub use model::{AccountIdentity, AuthenticatedSession, RegisteredAccount, UserPage, UserRecord};
