//! REST API client
//!
//! [`ApiClient`] wraps a `reqwest::Client` with the backend base URL and
//! a [`TokenProvider`] that supplies the bearer token attached to every
//! request — the identity provider owns token issuance, the client only
//! forwards what it is given. Endpoint groups live in [`lessons`] and
//! [`users`].

pub mod lessons;
pub mod payload;
pub mod users;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::core::error::{ApiError, HubError};

pub use lessons::LessonsApi;
pub use users::UsersApi;

/// Supplies the bearer token for outgoing requests.
///
/// The token comes from the identity provider and may rotate between
/// calls, so it is fetched per request rather than cached here.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current token, or None for anonymous requests.
    async fn bearer_token(&self) -> Option<String>;
}

/// Token provider for anonymous access.
pub struct NoToken;

#[async_trait]
impl TokenProvider for NoToken {
    async fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// Token provider returning a fixed token. Useful for tests and
/// service-to-service calls.
pub struct StaticToken(pub String);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// HTTP client for the lessonhub backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Build a client from configuration and a token provider.
    pub fn new(config: &AppConfig, token: Arc<dyn TokenProvider>) -> Result<Self, HubError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Lesson, comment, favorite, and moderation endpoints.
    pub fn lessons(&self) -> LessonsApi<'_> {
        LessonsApi { client: self }
    }

    /// User, profile, and subscription endpoints.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, HubError> {
        let request = match self.token.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        tracing::debug!(url, "sending request");
        let response = request.send().await.map_err(ApiError::Http)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, %status, "request failed");
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            }
            .into());
        }
        Ok(response)
    }

    pub(crate) async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        url: &str,
    ) -> Result<T, HubError> {
        let body = response.text().await.map_err(ApiError::Http)?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HubError> {
        let url = self.url(path);
        let response = self.send(self.http.get(&url), &url).await?;
        self.decode(response, &url).await
    }

    /// GET a JSON resource with query parameters.
    pub(crate) async fn get_json_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, HubError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        let response = self.send(self.http.get(&url).query(query), &url).await?;
        self.decode(response, &url).await
    }

    /// POST a JSON body, decoding the response.
    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, HubError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let response = self.send(self.http.post(&url).json(body), &url).await?;
        self.decode(response, &url).await
    }

    /// POST a JSON body, ignoring the response body.
    pub(crate) async fn post_ignored<B>(&self, path: &str, body: &B) -> Result<(), HubError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send(self.http.post(&url).json(body), &url).await?;
        Ok(())
    }

    /// PATCH a JSON body, ignoring the response body.
    pub(crate) async fn patch_ignored<B>(&self, path: &str, body: &B) -> Result<(), HubError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send(self.http.patch(&url).json(body), &url).await?;
        Ok(())
    }

    /// DELETE a resource, ignoring the response body.
    pub(crate) async fn delete_ignored(&self, path: &str) -> Result<(), HubError> {
        let url = self.url(path);
        self.send(self.http.delete(&url), &url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        let config = AppConfig {
            api_base_url: "http://localhost:5000/api/".to_string(),
            ..AppConfig::default()
        };
        let client = ApiClient::new(&config, Arc::new(NoToken)).unwrap();
        assert_eq!(client.url("/lessons"), "http://localhost:5000/api/lessons");
    }

    #[tokio::test]
    async fn test_token_providers() {
        assert_eq!(NoToken.bearer_token().await, None);
        assert_eq!(
            StaticToken("t0k3n".to_string()).bearer_token().await,
            Some("t0k3n".to_string())
        );
    }
}
