//! Application layer of the FitLife client.
//!
//! Wires the storage and API traits from `fitlife-core` into the session
//! lifecycle, the role-driven dashboard selection, the progress stats and the
//! nutrition search.

pub mod dashboard;
pub mod nutrition;
pub mod progress;
pub mod scope;
pub mod session;

pub use dashboard::{Dashboard, MenuEntry, RoleDirectory, Route, initial_route};
pub use nutrition::{NutritionFailure, NutritionSearch};
pub use progress::{PersonalRecord, ProgressStat, ProgressTracker};
pub use scope::TaskScope;
pub use session::SessionController;
