//! reqwest-backed nutrition database client.

use crate::account_client::{map_transport_error, parse_base_url};
use crate::decorator::{RequestPipeline, TracingDecorator};
use crate::nutrition_dto::NutritionResponse;
use async_trait::async_trait;
use fitlife_core::account::{ApiFailure, ApiResult};
use fitlife_core::config::NutritionConfig;
use fitlife_core::error::{FitlifeError, Result};
use fitlife_core::nutrition::{NutritionApi, NutritionFacts};
use reqwest::{Client, Url};

const NUTRITION_DATA_PATH: &str = "api/nutrition-data";

/// [`NutritionApi`] over the nutrition-data endpoint.
///
/// The app id and key travel as query parameters, so requests go through a
/// pipeline that never logs the query string.
#[derive(Clone)]
pub struct HttpNutritionClient {
    client: Client,
    endpoint: Url,
    app_id: String,
    app_key: String,
    nutrition_type: String,
    pipeline: RequestPipeline,
}

impl HttpNutritionClient {
    /// Fails with a config error when the app id or key is missing.
    pub fn new(config: &NutritionConfig) -> Result<Self> {
        let app_id = required(config.app_id.as_deref(), "nutrition.app_id")?;
        let app_key = required(config.app_key.as_deref(), "nutrition.app_key")?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FitlifeError::config(format!("Failed to build HTTP client: {e}")))?;
        let endpoint = parse_base_url(&config.base_url)?
            .join(NUTRITION_DATA_PATH)
            .map_err(|e| FitlifeError::config(format!("Invalid nutrition URL: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            app_id,
            app_key,
            nutrition_type: config.nutrition_type.clone(),
            pipeline: RequestPipeline::new().with(TracingDecorator),
        })
    }
}

#[async_trait]
impl NutritionApi for HttpNutritionClient {
    async fn lookup(&self, query: &str) -> ApiResult<Option<NutritionFacts>> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("nutrition-type", self.nutrition_type.as_str()),
                ("ingr", query),
            ])
            .build()
            .map_err(|e| ApiFailure::Unknown {
                message: format!("Failed to build request: {e}"),
            })?;
        self.pipeline.apply(&mut request).await;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| map_transport_error(&err.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Nutrition API returned an error status");
            return Err(ApiFailure::from_status(status.as_u16()));
        }

        let body = response
            .json::<NutritionResponse>()
            .await
            .map_err(|err| ApiFailure::Unknown {
                message: format!("Failed to parse response: {}", err.without_url()),
            })?;
        Ok(body.into_facts(query))
    }
}

fn required(value: Option<&str>, key: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(FitlifeError::config(format!("{key} is not set"))),
    }
}
