//! Single-shot HTTP gateway to the task service.
//!
//! One method call is exactly one network round trip: no retries, no
//! backoff, no deadline beyond the transport's own defaults. Resilience is
//! deliberately the caller's concern — wrap the gateway if you need it.
//!
//! Authentication follows the service's scheme: HTTP Basic with the API key
//! as username and an empty password.

use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

/// Immutable connection settings for a [`Gateway`].
///
/// There is no process-wide client state; construct one of these per
/// credential and pass it around.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL of the service, with a trailing slash.
    pub base_url: Url,
    /// API key, sent as the basic-auth username.
    pub api_key: String,
}

impl GatewayConfig {
    /// Settings for the production endpoint.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] when the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, crate::DEFAULT_BASE_URL)
    }

    /// Settings for an alternate endpoint (staging, mock server).
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::validation("missing api key"));
        }
        let mut base_url =
            Url::parse(base_url).map_err(|e| Error::validation(format!("invalid base url: {e}")))?;
        // Url::join drops the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(Self { base_url, api_key })
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Issues individual GET/POST requests and classifies their outcomes.
///
/// Success is exactly status 200 with a JSON body. Anything else — transport
/// failure, non-200 status, or an undecodable success body — comes back as a
/// classified [`Error`].
#[derive(Debug, Clone)]
pub struct Gateway {
    config: GatewayConfig,
    http: reqwest::Client,
}

impl Gateway {
    /// Create a gateway over a fresh HTTP client.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// The settings this gateway was built with.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// GET a resource path with query parameters.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a bad path, [`Error::Service`] for
    /// transport or status failures, [`Error::MalformedResponse`] for a
    /// 200 with a non-JSON body.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .query(query)
            .basic_auth(&self.config.api_key, Some(""))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// POST a JSON body to a resource path.
    ///
    /// # Errors
    ///
    /// Same classification as [`Gateway::get`].
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .basic_auth(&self.config.api_key, Some(""))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Resolve a relative resource path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        if path.is_empty() {
            return Err(Error::validation("empty resource path"));
        }
        if path.starts_with('/') {
            return Err(Error::validation(format!(
                "resource path '{path}' must be relative"
            )));
        }
        self.config
            .base_url
            .join(path)
            .map_err(|e| Error::validation(format!("invalid resource path '{path}': {e}")))
    }

    /// Normalize a response into a decoded JSON payload or a classified error.
    async fn decode(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            // Prefer the server's own error message when the body carries one.
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                })
                .unwrap_or_else(|| format!("request failed with status {status}"));
            tracing::warn!(status = status.as_u16(), %message, "request failed");
            return Err(Error::service(message, Some(status.as_u16())));
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::malformed(format!("body is not valid JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_rejected() {
        let err = GatewayConfig::new("").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = GatewayConfig::with_base_url("key", "http://localhost:9999/v1").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:9999/v1/");
    }

    #[test]
    fn paths_resolve_under_the_base() {
        let config = GatewayConfig::with_base_url("key", "http://localhost:9999/v1/").unwrap();
        let gateway = Gateway::new(config);
        let url = gateway.endpoint("task/abc123").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9999/v1/task/abc123");
    }

    #[test]
    fn empty_and_absolute_paths_are_rejected_locally() {
        let gateway = Gateway::new(GatewayConfig::new("key").unwrap());
        assert!(gateway.endpoint("").unwrap_err().is_validation());
        assert!(gateway.endpoint("/tasks").unwrap_err().is_validation());
    }

    #[test]
    fn debug_never_prints_the_api_key() {
        let config = GatewayConfig::new("live_secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("live_secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
