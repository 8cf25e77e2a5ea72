//! Food nutrition search.

use fitlife_core::account::ApiFailure;
use fitlife_core::nutrition::{NutritionApi, NutritionFacts};
use std::sync::Arc;
use thiserror::Error;

/// Why a search produced no facts. `Display` is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NutritionFailure {
    #[error("no nutrition information for: {food}")]
    NoData { food: String },

    /// The service answered with a non-success status.
    #[error("Error {status}")]
    Status { status: u16 },

    #[error("Error: {message}")]
    Request { message: String },
}

impl From<ApiFailure> for NutritionFailure {
    fn from(failure: ApiFailure) -> Self {
        match failure.status() {
            Some(status) => Self::Status { status },
            None => Self::Request {
                message: failure.to_string(),
            },
        }
    }
}

pub struct NutritionSearch {
    api: Arc<dyn NutritionApi>,
}

impl NutritionSearch {
    pub fn new(api: Arc<dyn NutritionApi>) -> Self {
        Self { api }
    }

    /// Looks up `query`. A blank query returns `Ok(None)` without a request.
    pub async fn search(&self, query: &str) -> Result<Option<NutritionFacts>, NutritionFailure> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        tracing::debug!(query, "Searching nutrition data");
        match self.api.lookup(query).await {
            Ok(Some(facts)) => Ok(Some(facts)),
            Ok(None) => {
                tracing::info!(query, "No nutrients found");
                Err(NutritionFailure::NoData {
                    food: query.to_string(),
                })
            }
            Err(failure) => {
                tracing::warn!(query, error = %failure, "Nutrition lookup failed");
                Err(failure.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlife_core::account::ApiResult;
    use std::sync::Mutex;

    /// Answers every lookup with a clone of one scripted result.
    struct ScriptedNutritionApi {
        result: ApiResult<Option<NutritionFacts>>,
        queries: Mutex<Vec<String>>,
    }

    impl ScriptedNutritionApi {
        fn new(result: ApiResult<Option<NutritionFacts>>) -> Arc<Self> {
            Arc::new(Self {
                result,
                queries: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl NutritionApi for ScriptedNutritionApi {
        async fn lookup(&self, query: &str) -> ApiResult<Option<NutritionFacts>> {
            self.queries.lock().unwrap().push(query.to_string());
            self.result.clone()
        }
    }

    fn chicken() -> NutritionFacts {
        NutritionFacts {
            food: "chicken".to_string(),
            calories: 165,
            protein: 31.0,
            carbs: 0.0,
            fat: 3.6,
            fiber: 0.0,
        }
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_request() {
        let api = ScriptedNutritionApi::new(Ok(Some(chicken())));
        let search = NutritionSearch::new(api.clone());

        for query in ["", "   ", "\t"] {
            assert_eq!(search.search(query).await, Ok(None));
        }
        assert!(api.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_found_food_returns_facts() {
        let api = ScriptedNutritionApi::new(Ok(Some(chicken())));
        let search = NutritionSearch::new(api.clone());

        let facts = search.search("chicken").await.unwrap().unwrap();

        assert_eq!(facts.calories, 165);
        assert_eq!(*api.queries.lock().unwrap(), vec!["chicken".to_string()]);
    }

    #[tokio::test]
    async fn test_no_nutrients_names_the_food() {
        let search = NutritionSearch::new(ScriptedNutritionApi::new(Ok(None)));

        let err = search.search("xyzzy").await.unwrap_err();

        assert_eq!(err.to_string(), "no nutrition information for: xyzzy");
    }

    #[tokio::test]
    async fn test_failures_become_error_messages() {
        let search = NutritionSearch::new(ScriptedNutritionApi::new(Err(ApiFailure::NotFound)));
        assert_eq!(search.search("apple").await.unwrap_err().to_string(), "Error 404");

        let offline = ApiFailure::NoConnectivity {
            message: "connection refused".to_string(),
        };
        let search = NutritionSearch::new(ScriptedNutritionApi::new(Err(offline)));
        assert_eq!(
            search.search("apple").await.unwrap_err().to_string(),
            "Error: no connectivity: connection refused"
        );
    }
}
