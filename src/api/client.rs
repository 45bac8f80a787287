//! Issuetrak API client implementation.
//!
//! The client owns the HTTP connection pool, the versioned API root and the
//! credentials. It sends [`Request`] values and hands back whatever the server
//! answered; status codes are not interpreted here.

use std::time::Duration;

use reqwest::{header, Client};
use tracing::{debug, info, instrument, warn};

use super::auth::{Auth, API_KEY_HEADER};
use super::error::{ApiError, Result};
use super::request::Request;
use super::response::ApiResponse;
use crate::config::ApiSettings;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of attempts for idempotent requests.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// The Issuetrak API client.
#[derive(Debug, Clone)]
pub struct IssuetrakClient {
    /// The HTTP client.
    client: Client,
    /// The instance URL without trailing slashes.
    base_url: String,
    /// The API version segment, e.g. `1` for `/api/v1`.
    api_version: u16,
    /// Authentication credentials.
    auth: Auth,
    /// Delay before the first retry; doubles on each further attempt.
    retry_delay_ms: u64,
}

impl IssuetrakClient {
    /// Create a client from validated settings.
    #[instrument(skip(settings), fields(base_url = %settings.base_api_url, api_version = settings.api_version))]
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        info!("Creating Issuetrak client");
        Self::with_credentials(
            &settings.base_api_url,
            settings.api_version,
            &settings.api_key,
        )
    }

    /// Create a client with explicit credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse, the key is not a
    /// valid header value, or the HTTP client cannot be built.
    pub fn with_credentials(base_url: &str, api_version: u16, api_key: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let auth = Auth::new(api_key)?;
        let client = Self::build_http_client()?;

        Ok(Self {
            client,
            base_url,
            api_version,
            auth,
            retry_delay_ms: RETRY_DELAY_MS,
        })
    }

    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> u16 {
        self.api_version
    }

    /// The absolute URL for a request path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/v{}/{}",
            self.base_url,
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    /// Send a request and read the full response.
    ///
    /// Idempotent requests are retried with exponential backoff when the
    /// connection fails or times out. Any response that arrives, whatever
    /// its status, is returned as-is.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn send(&self, request: &Request) -> Result<ApiResponse> {
        let url = self.endpoint(request.path());

        if request.include_request_logging() {
            info!(
                url = %url,
                query = ?request.query_pairs(),
                body_bytes = request.body().map(|b| b.to_string().len()).unwrap_or(0),
                "Sending request"
            );
        }

        let max_attempts = if request.is_idempotent() { MAX_RETRIES } else { 1 };
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!("Request attempt {}/{}", attempts, max_attempts);

            match self.execute(&url, request).await {
                Ok(response) => {
                    if request.include_request_logging() {
                        info!(
                            status = response.status.as_u16(),
                            text = response.text.as_deref().unwrap_or(""),
                            "Received response"
                        );
                    } else {
                        debug!(status = response.status.as_u16(), "Received response");
                    }
                    return Ok(response);
                }
                Err(e) if e.is_transient() && attempts < max_attempts => {
                    let delay = self.calculate_retry_delay(attempts);
                    warn!(
                        "Request failed (attempt {}), retrying in {}ms: {}",
                        attempts, delay, e
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) if e.is_transient() && max_attempts > 1 => {
                    warn!("Request failed on final attempt {}: {}", attempts, e);
                    return Err(ApiError::RetriesExhausted(attempts));
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Execute a single HTTP exchange.
    async fn execute(&self, url: &str, request: &Request) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .header(API_KEY_HEADER, self.auth.header_value().clone())
            .header(header::ACCEPT, "application/json");

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        ApiResponse::read(response).await
    }

    /// Calculate retry delay with exponential backoff.
    fn calculate_retry_delay(&self, attempt: u32) -> u64 {
        self.retry_delay_ms * 2u64.pow(attempt - 1)
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');

    let parsed = reqwest::Url::parse(url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ApiError::InvalidUrl(format!(
            "{}: scheme must be http or https",
            url
        )));
    }

    if parsed.scheme() == "http" && parsed.host_str() != Some("localhost") {
        warn!("URL does not use HTTPS: {}. The API key is sent in clear text.", url);
    }

    Ok(url.to_string())
}
