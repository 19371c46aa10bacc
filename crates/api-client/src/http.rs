//! HTTP transport for the Miichu mobile API
//!
//! Request/response types, the error shape shared by every endpoint, and
//! the `reqwest`-backed client. Requests are sent once; there is no retry
//! layer.

use reqwest::multipart::Form;
use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Base URL of the development backend
pub const DEFAULT_BASE_URL: &str = "http://192.168.68.6:5000";

// =============================================================================
// Error Types
// =============================================================================

/// API error with HTTP status and message
///
/// Transport failures (connection refused, timeout, unreadable body) use
/// status `0`.
///
/// # Examples
/// ```
/// use api_client::http::ApiError;
///
/// let error = ApiError::new(401, "Unauthorized", "Invalid credentials");
/// assert_eq!(error.status(), 401);
/// assert!(error.is_unauthorized());
/// assert!(!error.is_network_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API error {status}: {code} - {message}")]
pub struct ApiError {
    status: u16,
    code: String,
    message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { status, code: code.into(), message: message.into() }
    }

    /// Error for a request that never produced an HTTP response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(0, "NetworkError", message)
    }

    /// Get the HTTP status code (0 for transport failures)
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the request failed before or while talking to the server
    pub fn is_network_error(&self) -> bool {
        matches!(self.status, 0 | 408 | 502 | 503 | 504)
    }

    /// Whether the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

/// Error body the backend sends on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error code, when provided
    #[serde(default)]
    pub error: Option<String>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Request Types
// =============================================================================

/// Request body
#[derive(Debug, Default)]
pub enum ApiBody {
    /// No body
    #[default]
    Empty,
    /// Serialized JSON
    Json(Vec<u8>),
    /// `multipart/form-data`
    Multipart(Form),
}

/// A POST request to an API endpoint
#[derive(Debug)]
pub struct ApiRequest {
    /// Path below the base URL (e.g. "/api/mobile/login")
    pub path: String,
    /// Request body
    pub body: ApiBody,
}

impl ApiRequest {
    /// Create a POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self { path: path.into(), body: ApiBody::Empty }
    }

    /// Set the request body from JSON
    pub fn json_body<T: Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = ApiBody::Json(serde_json::to_vec(value)?);
        Ok(self)
    }

    /// Set a multipart body
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = ApiBody::Multipart(form);
        self
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Decoded API response
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Response data
    pub data: T,
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base service URL (e.g., "http://192.168.68.6:5000")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Headers included in all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Miichu/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Client Implementation
// =============================================================================

/// Client for the Miichu mobile API
///
/// # Examples
/// ```
/// use api_client::http::{ApiClient, ApiClientConfig};
///
/// let client = ApiClient::new(ApiClientConfig::new("http://localhost:5000")).unwrap();
/// assert_eq!(client.base_url(), "http://localhost:5000");
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: ReqwestClient,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::new(0, "ClientBuild", e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Execute a request and decode the JSON response
    pub async fn send<T>(&self, request: ApiRequest) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), request.path);
        tracing::debug!(%url, "sending request");

        let mut req = self.client.post(&url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        req = match request.body {
            ApiBody::Empty => req,
            ApiBody::Json(bytes) => req.header("Content-Type", "application/json").body(bytes),
            // reqwest sets the multipart content type with its boundary
            ApiBody::Multipart(form) => req.multipart(form),
        };

        let response = req
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("Request failed: {}", e)))?;

        self.parse_response(response).await
    }

    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::debug!(status, "request failed");

            return Err(match serde_json::from_str::<ApiErrorResponse>(&error_body) {
                Ok(error_response) => ApiError::new(
                    status,
                    error_response.error.unwrap_or_else(|| "RequestFailed".to_string()),
                    error_response.message,
                ),
                Err(_) => ApiError::new(status, "Unknown", format!("HTTP {}: {}", status, error_body)),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("Failed to read response: {}", e)))?;

        let data: T = serde_json::from_str(&body)
            .map_err(|e| ApiError::new(status, "ParseError", format!("Failed to parse JSON: {}", e)))?;

        Ok(ApiResponse { status, data })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
