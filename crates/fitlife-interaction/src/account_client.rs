//! reqwest-backed account API client.

use crate::decorator::{RequestPipeline, TracingDecorator};
use crate::dto::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserDto, UsersResponse,
};
use async_trait::async_trait;
use fitlife_core::account::{
    AccountApi, ApiFailure, ApiResult, AuthenticatedSession, RegisteredAccount, Registration,
    UserPage, UserRecord,
};
use fitlife_core::config::ApiConfig;
use fitlife_core::error::{FitlifeError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

const REGISTER_PATH: &str = "users/register";
const LOGIN_PATH: &str = "users/login";
const PROFILE_PATH: &str = "users/profile";
const USERS_PATH: &str = "users";

/// [`AccountApi`] over HTTP/JSON.
///
/// Every request is sent exactly once. Registration goes through a public
/// pipeline that never attaches credentials; every other call passes through
/// the configured [`RequestPipeline`].
#[derive(Clone)]
pub struct HttpAccountClient {
    client: Client,
    base_url: Url,
    pipeline: RequestPipeline,
    public: RequestPipeline,
    token_ttl_mins: u32,
}

impl HttpAccountClient {
    pub fn new(config: &ApiConfig, pipeline: RequestPipeline) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FitlifeError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
            pipeline,
            public: RequestPipeline::new().with(TracingDecorator),
            token_ttl_mins: config.token_ttl_mins,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url.join(path).map_err(|e| ApiFailure::Unknown {
            message: format!("Invalid request path '{path}': {e}"),
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        self.send_through(&self.pipeline, builder).await
    }

    async fn send_through<T: DeserializeOwned>(
        &self,
        pipeline: &RequestPipeline,
        builder: RequestBuilder,
    ) -> ApiResult<T> {
        let mut request = builder.build().map_err(|e| ApiFailure::Unknown {
            message: format!("Failed to build request: {e}"),
        })?;
        pipeline.apply(&mut request).await;

        let method = request.method().clone();
        let url = request.url().clone();

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| map_transport_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                %method,
                url = %url,
                status = status.as_u16(),
                "Account API returned an error status"
            );
            return Err(ApiFailure::from_status(status.as_u16()));
        }

        response.json::<T>().await.map_err(|err| ApiFailure::Unknown {
            message: format!("Failed to parse response: {err}"),
        })
    }
}

#[async_trait]
impl AccountApi for HttpAccountClient {
    async fn register(&self, registration: &Registration) -> ApiResult<RegisteredAccount> {
        let body = RegisterRequest {
            email: &registration.email,
            password: &registration.password,
            name: registration.name.as_deref(),
        };
        let builder = self.client.post(self.url(REGISTER_PATH)?).json(&body);
        self.send_through::<RegisterResponse>(&self.public, builder)
            .await
            .map(Into::into)
    }

    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthenticatedSession> {
        let body = LoginRequest {
            username: email,
            password,
            expires_in_mins: self.token_ttl_mins,
        };
        let builder = self.client.post(self.url(LOGIN_PATH)?).json(&body);
        self.send::<LoginResponse>(builder).await.map(Into::into)
    }

    async fn fetch_profile(&self, token: &str) -> ApiResult<UserRecord> {
        let builder = self
            .client
            .get(self.url(PROFILE_PATH)?)
            .header(AUTHORIZATION, format!("Bearer {token}"));
        self.send::<UserDto>(builder).await.map(Into::into)
    }

    async fn fetch_user(&self, id: &str) -> ApiResult<UserRecord> {
        let mut url = self.url(USERS_PATH)?;
        url.path_segments_mut()
            .map_err(|()| ApiFailure::Unknown {
                message: "Base URL cannot carry a path".to_string(),
            })?
            .push(id);
        self.send::<UserDto>(self.client.get(url)).await.map(Into::into)
    }

    async fn list_users(&self) -> ApiResult<UserPage> {
        let builder = self.client.get(self.url(USERS_PATH)?);
        self.send::<UsersResponse>(builder).await.map(Into::into)
    }
}

/// Parses the base URL, forcing a trailing slash so relative paths append.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| FitlifeError::config(format!("Invalid API base URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(FitlifeError::config(format!(
            "API base URL '{raw}' cannot be used as a base"
        )));
    }
    Ok(url)
}

pub(crate) fn map_transport_error(err: &reqwest::Error) -> ApiFailure {
    if err.is_connect() || err.is_timeout() {
        tracing::warn!(error = %err, "Remote API unreachable");
        ApiFailure::NoConnectivity {
            message: err.to_string(),
        }
    } else {
        ApiFailure::Unknown {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("http://localhost:8080/api").unwrap();
        assert_eq!(url.join(LOGIN_PATH).unwrap().as_str(), "http://localhost:8080/api/users/login");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, FitlifeError::Config(_)));
    }

    #[test]
    fn test_fetch_user_path_is_escaped() {
        let client = HttpAccountClient::new(&ApiConfig::default(), RequestPipeline::new()).unwrap();
        let mut url = client.url(USERS_PATH).unwrap();
        url.path_segments_mut().unwrap().push("a/b");
        assert_eq!(url.path(), "/users/a%2Fb");
    }

    #[test]
    fn test_new_uses_configured_base() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1234".to_string(),
            ..ApiConfig::default()
        };
        let client = HttpAccountClient::new(&config, RequestPipeline::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:1234/");
    }
}
