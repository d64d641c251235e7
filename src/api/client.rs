//! Task-management REST API client implementation.
//!
//! The [`TaskApiClient`] is an HTTP client pre-bound to the task API's base
//! URL. Request paths are resolved relative to that URL, so callers never
//! repeat the origin.
//!
//! # Example
//!
//! ```rust,ignore
//! use task_api_client::api::TaskApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TaskApiClient::new()?;
//!
//!     // GET https://task-management-server-nyfr.onrender.com/api/tasks
//!     let tasks: serde_json::Value = client.get("").await?;
//!     println!("{}", tasks);
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::api::retry::{is_retryable_error, is_retryable_status, RetryConfig};
use crate::api::url::{join_url, with_query};
use crate::network::DEFAULT_API_URL;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Builder for configuring [`TaskApiClient`].
#[derive(Debug, Clone)]
pub struct TaskApiClientBuilder {
    base_url: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
    retry_config: RetryConfig,
    auth_token: Option<String>,
}

impl Default for TaskApiClientBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl TaskApiClientBuilder {
    /// Create a new builder with the given base URL.
    ///
    /// The URL is stored verbatim; slashes are reconciled when request
    /// paths are joined.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: Vec::new(),
            retry_config: RetryConfig::default(),
            auth_token: None,
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Enable retries with exponential backoff for idempotent requests.
    ///
    /// # Arguments
    ///
    /// * `config` - Retry configuration (use `RetryConfig::new(3)` for 3 retries with defaults)
    pub fn with_retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Set a bearer token sent with every request.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Build the client.
    ///
    /// No network I/O happens here.
    pub fn build(self) -> ApiResult<TaskApiClient> {
        Self::validate_base_url(&self.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in self.default_headers {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|e| {
                ApiError::InvalidParameter(format!("Invalid header name '{}': {}", name, e))
            })?;
            let header_value = HeaderValue::from_str(&value).map_err(|e| {
                ApiError::InvalidParameter(format!("Invalid header value for '{}': {}", name, e))
            })?;
            headers.insert(header_name, header_value);
        }

        let http_client = Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(10)
            .default_headers(headers)
            .build()?;

        Ok(TaskApiClient {
            http_client,
            base_url: self.base_url,
            retry_config: self.retry_config,
            auth_token: self.auth_token,
        })
    }

    fn validate_base_url(base_url: &str) -> ApiResult<()> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| {
            ApiError::InvalidParameter(format!("Invalid base URL '{}': {}", base_url, e))
        })?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ApiError::InvalidParameter(format!(
                "Base URL must use http or https, got '{}'",
                other
            ))),
        }
    }
}

/// HTTP client bound to the task-management API.
///
/// Cloning is cheap: clones share the underlying connection pool, so one
/// client built at startup can be handed to every consumer.
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    http_client: Client,
    base_url: String,
    retry_config: RetryConfig,
    auth_token: Option<String>,
}

impl TaskApiClient {
    /// Create a client bound to [`DEFAULT_API_URL`].
    ///
    /// Uses default settings (30s timeout, connection pooling, no retries).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> ApiResult<Self> {
        TaskApiClientBuilder::default().build()
    }

    /// Create a client bound to another base URL with default settings.
    pub fn with_base_url(base_url: impl Into<String>) -> ApiResult<Self> {
        TaskApiClientBuilder::new(base_url).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(base_url: impl Into<String>) -> TaskApiClientBuilder {
        TaskApiClientBuilder::new(base_url)
    }

    /// Get the base URL, exactly as configured.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    /// Resolve a request path against the base URL.
    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Set the bearer token manually.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.auth_token = Some(token.into());
    }

    /// Clear the bearer token.
    pub fn clear_auth_token(&mut self) {
        self.auth_token = None;
    }

    /// Check whether a bearer token is set.
    pub fn has_auth_token(&self) -> bool {
        self.auth_token.is_some()
    }

    // =========================================================================
    // Request capability
    // =========================================================================

    /// Start a request with the base URL and bearer token applied.
    ///
    /// Bypasses retry and error mapping; use it when the typed helpers
    /// don't fit, e.g. non-JSON bodies or per-request headers.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.prepare(method, &self.url_for(path))
    }

    /// `GET` a path and deserialize the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::GET, self.url_for(path), None::<&()>).await
    }

    /// `GET` a path with URL-encoded query parameters.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = with_query(&self.url_for(path), query)?;
        self.send(Method::GET, url, None::<&()>).await
    }

    /// `POST` a JSON body to a path.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, self.url_for(path), Some(body)).await
    }

    /// `PUT` a JSON body to a path.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, self.url_for(path), Some(body)).await
    }

    /// `PATCH` a path with a JSON body.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, self.url_for(path), Some(body)).await
    }

    /// `DELETE` a path.
    ///
    /// Use `T = ()` when the server answers with an empty body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::DELETE, self.url_for(path), None::<&()>).await
    }

    /// Check that the base URL answers with a success status.
    pub async fn health_check(&self) -> ApiResult<()> {
        let response = self.request(Method::GET, "").send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error_response(response).await)
        }
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn prepare(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.http_client.request(method, url);
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Execute a request with optional retry logic.
    async fn send<T, B>(&self, method: Method, url: String, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut attempt = 0;

        loop {
            let mut request = self.prepare(method.clone(), &url);
            if let Some(body) = body {
                request = request.json(body);
            }

            tracing::debug!(method = %method, url = %url, attempt, "Sending request");

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Self::decode(response).await;
                    }

                    let error = Self::parse_error_response(response).await;

                    if self.retry_config.allows(&method, attempt) && is_retryable_status(status) {
                        let delay = self.retry_config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max_retries = self.retry_config.max_retries,
                            delay_ms = delay.as_millis(),
                            status = %status,
                            "Retrying request after error"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(error);
                }
                Err(e) => {
                    if self.retry_config.allows(&method, attempt) && is_retryable_error(&e) {
                        let delay = self.retry_config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max_retries = self.retry_config.max_retries,
                            delay_ms = delay.as_millis(),
                            error = %e,
                            "Retrying request after network error"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(ApiError::Http(e));
                }
            }
        }
    }

    /// Deserialize a success body. Empty bodies read as JSON `null`.
    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await?;
        let body: &[u8] = if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            b"null"
        } else {
            &bytes[..]
        };
        serde_json::from_slice(body).map_err(|e| {
            ApiError::Deserialize(format!("Failed to deserialize response: {}", e))
        })
    }

    /// Parse an error response into an ApiError.
    async fn parse_error_response(response: Response) -> ApiError {
        let status = response.status();
        let error_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to read error response body: {}", e);
                return Self::map_status_error(
                    status,
                    ErrorResponse::from_text(format!("HTTP {} (body unreadable: {})", status, e)),
                );
            }
        };

        let error_response = serde_json::from_str::<ErrorResponse>(&error_text)
            .ok()
            .filter(ErrorResponse::has_message)
            .unwrap_or_else(|| ErrorResponse::from_text(error_text));

        Self::map_status_error(status, error_response)
    }

    /// Map HTTP status code to ApiError.
    fn map_status_error(status: StatusCode, response: ErrorResponse) -> ApiError {
        let response = response.with_status_code(status.as_u16());
        match status {
            StatusCode::BAD_REQUEST => ApiError::BadRequest(response),
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(response),
            StatusCode::FORBIDDEN => ApiError::Forbidden(response),
            StatusCode::NOT_FOUND => ApiError::NotFound(response),
            StatusCode::CONFLICT => ApiError::Conflict(response),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(response),
            _ if status.is_server_error() => ApiError::ServerError(response),
            _ => ApiError::UnexpectedStatus(status.as_u16(), response),
        }
    }
}
