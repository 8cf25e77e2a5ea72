//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: persisted session fields (`Session`)
//! - `state`: observable state machine types (`AuthPhase`, `SessionState`, `AuthFailure`)

mod model;
mod state;

pub use model::Session;
pub use state::{AuthFailure, AuthPhase, FailureKind, SessionState};
