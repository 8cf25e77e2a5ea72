//! Food nutrition lookup.

use crate::account::ApiResult;
use serde::{Deserialize, Serialize};

/// Macronutrients of one food query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    /// The query as the user typed it.
    pub food: String,
    pub calories: u32,
    /// Grams.
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

/// Remote nutrition database.
#[async_trait::async_trait]
pub trait NutritionApi: Send + Sync {
    /// Looks up `query` in one round-trip.
    ///
    /// Returns `Ok(None)` when the service answered but knows no nutrients
    /// for the query.
    async fn lookup(&self, query: &str) -> ApiResult<Option<NutritionFacts>>;
}
