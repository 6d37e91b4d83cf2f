use std::rc::Rc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::AuthError;
use crate::services::{QueryClient, TokenStore};

/// Options for a single API request.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    /// Sent as `Authorization: Bearer <token>`
    pub token: Option<String>,
    /// JSON body of non-GET requests
    pub data: Option<Value>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            method: Method::GET,
            token: None,
            data: None,
        }
    }
}

impl RequestConfig {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn post(data: Value) -> Self {
        Self {
            method: Method::POST,
            data: Some(data),
            ..Self::default()
        }
    }
}

/// HTTP utility used for all API calls.
#[async_trait(?Send)]
pub trait ApiClient {
    async fn request(&self, endpoint: &str, config: RequestConfig) -> Result<Value, AuthError>;
}

/// [`ApiClient::request`] decoded into `T`.
pub async fn request_json<T: DeserializeOwned>(
    api: &dyn ApiClient,
    endpoint: &str,
    config: RequestConfig,
) -> Result<T, AuthError> {
    let value = api.request(endpoint, config).await?;
    Ok(serde_json::from_value(value)?)
}

/// `reqwest`-backed client rooted at the configured API URL.
///
/// Successful GET responses are kept in the shared [`QueryClient`] and
/// served from it until the cache is invalidated (on logout).
pub struct HttpClient {
    config: AppConfig,
    client: reqwest::Client,
    tokens: Rc<dyn TokenStore>,
    cache: Rc<QueryClient>,
}

impl HttpClient {
    pub fn new(config: &AppConfig, tokens: Rc<dyn TokenStore>, cache: Rc<QueryClient>) -> Self {
        Self {
            config: config.clone(),
            client: reqwest::Client::new(),
            tokens,
            cache,
        }
    }
}

#[async_trait(?Send)]
impl ApiClient for HttpClient {
    async fn request(&self, endpoint: &str, config: RequestConfig) -> Result<Value, AuthError> {
        let url = self.config.endpoint_url(endpoint);

        let cache_key =
            (config.method == Method::GET).then(|| query_key(&url, config.token.as_deref()));
        if let Some(cached) = cache_key
            .as_deref()
            .and_then(|key| self.cache.get_query_data(key))
        {
            tracing::debug!("GET {endpoint} served from query cache");
            return Ok(cached);
        }

        let mut builder = self.client.request(config.method.clone(), url);

        if let Some(token) = &config.token {
            builder = builder.bearer_auth(token);
        }

        if config.method != Method::GET {
            builder = builder.json(config.data.as_ref().unwrap_or(&Value::Object(Default::default())));
        }

        tracing::debug!("{} {}", config.method, endpoint);
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("{endpoint} answered 401; dropping stored token");
            if let Err(e) = self.tokens.remove() {
                tracing::error!("Failed to drop stored token: {e}");
            }
            return Err(AuthError::Unauthorized);
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::Server {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };
        if let Some(key) = cache_key {
            self.cache.set_query_data(key, value.clone());
        }
        Ok(value)
    }
}

/// Cache key of a GET; the token keeps one user's data from answering another.
fn query_key(url: &str, token: Option<&str>) -> String {
    format!("{url} {}", token.unwrap_or_default())
}

/// `message` field of an error body, falling back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
        })
}
