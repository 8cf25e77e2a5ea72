//! Outbound request decorators.
//!
//! Every account call is built as a [`reqwest::Request`] and handed to a
//! [`RequestPipeline`] before it is executed. Decorators run in insertion
//! order and may only add to the request.

use async_trait::async_trait;
use fitlife_core::credential::CredentialStore;
use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use std::sync::Arc;

/// A step that adjusts an outbound request before it is sent.
#[async_trait]
pub trait RequestDecorator: Send + Sync {
    async fn decorate(&self, request: &mut Request);
}

/// Adds `Authorization: Bearer <token>` from the credential store.
///
/// The request is forwarded unchanged when no non-empty token is stored, when
/// the store cannot be read, or when the caller already set the header.
pub struct BearerAuthDecorator {
    store: Arc<dyn CredentialStore>,
}

impl BearerAuthDecorator {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RequestDecorator for BearerAuthDecorator {
    async fn decorate(&self, request: &mut Request) {
        if request.headers().contains_key(AUTHORIZATION) {
            return;
        }

        let token = match self.store.token().await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => return,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read token, sending request without it");
                return;
            }
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!("Stored token is not a valid header value, sending request without it");
            }
        }
    }
}

/// Logs method, host and path of each request at `debug`. Headers and the
/// query string are never logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDecorator;

#[async_trait]
impl RequestDecorator for TracingDecorator {
    async fn decorate(&self, request: &mut Request) {
        tracing::debug!(
            method = %request.method(),
            host = request.url().host_str().unwrap_or_default(),
            path = request.url().path(),
            authorized = request.headers().contains_key(AUTHORIZATION),
            "Sending request"
        );
    }
}

/// Ordered list of decorators shared by every API call.
#[derive(Clone, Default)]
pub struct RequestPipeline {
    decorators: Vec<Arc<dyn RequestDecorator>>,
}

impl RequestPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bearer auth followed by request tracing.
    pub fn authenticated(store: Arc<dyn CredentialStore>) -> Self {
        Self::new()
            .with(BearerAuthDecorator::new(store))
            .with(TracingDecorator)
    }

    pub fn with(mut self, decorator: impl RequestDecorator + 'static) -> Self {
        self.decorators.push(Arc::new(decorator));
        self
    }

    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    pub async fn apply(&self, request: &mut Request) {
        for decorator in &self.decorators {
            decorator.decorate(request).await;
        }
    }
}
