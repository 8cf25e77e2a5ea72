//! Session lifecycle.
//!
//! - `controller`: the state machine owning every session write
//! - `messages`: user-facing failure messages

mod controller;
pub mod messages;

pub use controller::SessionController;
