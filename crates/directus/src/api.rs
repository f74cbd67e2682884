//! Low-level HTTP wrapper for the Directus REST API.
//!
//! Builds requests against a fixed base URL, attaches a JSON content type
//! and an optional bearer token, and unwraps the `{data, meta}` response
//! envelope. A single attempt per call, fail-fast: no retries, no backoff.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::DirectusError;

/// Shape of a Directus error body: `{"errors": [{"message": "..."}]}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// HTTP client for a single Directus instance.
#[derive(Debug, Clone)]
pub struct DirectusApi {
    client: reqwest::Client,
    base_url: String,
}

impl DirectusApi {
    /// Create a client for the given base URL, e.g. `http://localhost:8055`.
    ///
    /// * `timeout` - per-request timeout; requests that exceed it surface
    ///   as [`DirectusError::Request`].
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (connection pooling across services).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// GET `endpoint`, returning the unwrapped `data` payload.
    pub async fn get(
        &self,
        endpoint: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<Value, DirectusError> {
        self.request(Method::GET, endpoint, token, query, None).await
    }

    /// POST `body` to `endpoint`, returning the unwrapped `data` payload.
    pub async fn post(
        &self,
        endpoint: &str,
        token: Option<&str>,
        body: &Value,
    ) -> Result<Value, DirectusError> {
        self.request(Method::POST, endpoint, token, &[], Some(body))
            .await
    }

    /// PATCH `body` to `endpoint`, returning the unwrapped `data` payload.
    pub async fn patch(
        &self,
        endpoint: &str,
        token: Option<&str>,
        body: &Value,
    ) -> Result<Value, DirectusError> {
        self.request(Method::PATCH, endpoint, token, &[], Some(body))
            .await
    }

    /// DELETE `endpoint`, discarding any payload.
    pub async fn delete(&self, endpoint: &str, token: Option<&str>) -> Result<(), DirectusError> {
        self.request(Method::DELETE, endpoint, token, &[], None)
            .await?;
        Ok(())
    }

    // ---- private helpers ----

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, DirectusError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Self::unwrap_envelope(response).await
    }

    /// Turn a response into its `data` payload.
    ///
    /// Non-success statuses become [`DirectusError::Api`] carrying the
    /// parsed error body's message or a generic `HTTP <status>` line.
    /// Empty bodies (204, missing JSON content type, blank text) yield
    /// [`Value::Null`]. A `{data, meta}` envelope is unwrapped; a bare
    /// payload is returned as-is.
    async fn unwrap_envelope(response: reqwest::Response) -> Result<Value, DirectusError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
                .and_then(|parsed| parsed.errors.into_iter().next())
                .map(|entry| entry.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(DirectusError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        if status == StatusCode::NO_CONTENT || !is_json {
            return Ok(Value::Null);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let payload: Value =
            serde_json::from_str(&text).map_err(|e| DirectusError::Decode(e.to_string()))?;

        match payload {
            Value::Object(mut map) if map.contains_key("data") => {
                Ok(map.remove("data").unwrap_or(Value::Null))
            }
            other => Ok(other),
        }
    }
}

/// Decode an unwrapped `data` payload into a typed value.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, DirectusError> {
    serde_json::from_value(value).map_err(|e| DirectusError::Decode(e.to_string()))
}
