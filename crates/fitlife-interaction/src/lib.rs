//! HTTP access to the FitLife account service.
//!
//! - `decorator`: request decorators (bearer auth, tracing) and the pipeline
//!   every call passes through
//! - `dto`: wire shapes of the account endpoints
//! - `account_client`: the reqwest-backed [`fitlife_core::account::AccountApi`]
//! - `nutrition_dto`, `nutrition_client`: the nutrition-data endpoint behind
//!   [`fitlife_core::nutrition::NutritionApi`]

pub mod account_client;
pub mod decorator;
pub mod dto;
pub mod nutrition_client;
pub mod nutrition_dto;

pub use account_client::HttpAccountClient;
pub use nutrition_client::HttpNutritionClient;
pub use decorator::{BearerAuthDecorator, RequestDecorator, RequestPipeline, TracingDecorator};
