//! HTTP client shared foundation
//!
//! This module provides the `JsonSource` read capability and its reqwest
//! implementation:
//! - Configurable timeout and User-Agent
//! - Status code surfaced to the caller, never retried
//! - JSON decoding of success bodies

use crate::error::RegistryError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("pyupcheck/", env!("CARGO_PKG_VERSION"));

/// Status and decoded body of a registry read
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body (`Null` for non-success responses)
    pub body: Value,
}

impl JsonResponse {
    /// Creates a new response
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Read capability over registry JSON endpoints
#[async_trait]
pub trait JsonSource: Send + Sync {
    /// Fetch `url` and decode its JSON body
    async fn get_json(&self, url: &str) -> Result<JsonResponse, RegistryError>;
}

/// reqwest-backed `JsonSource`
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new HTTP client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| {
                RegistryError::network("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonSource for HttpClient {
    async fn get_json(&self, url: &str) -> Result<JsonResponse, RegistryError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RegistryError::network(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(JsonResponse::new(status.as_u16(), Value::Null));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| {
                RegistryError::invalid_response(url, format!("failed to parse JSON: {}", e))
            })?;

        Ok(JsonResponse::new(status.as_u16(), body))
    }
}
