//! Response values returned by the client.

use reqwest::{header, Response, StatusCode};
use serde_json::Value;

use super::error::Result;

/// What the API sent back for one request.
///
/// The status code is reported as-is; success and failure responses have
/// the same shape. `payload` holds the body when it parsed as JSON.
#[derive(Debug, Clone)]
pub struct ApiResponse<T = Value> {
    pub status: StatusCode,
    pub text: Option<String>,
    pub payload: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, text: Option<String>, payload: Option<T>) -> Self {
        Self {
            status,
            text,
            payload,
        }
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The canonical reason phrase for the status code.
    pub fn reason_phrase(&self) -> &str {
        self.status.canonical_reason().unwrap_or("Unknown Status")
    }
}

impl ApiResponse<Value> {
    /// Read the full body of an HTTP response.
    pub(crate) async fn read(response: Response) -> Result<Self> {
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        Ok(Self::from_body(status, content_type.as_deref(), &body))
    }

    /// Build a response from a status, content type and raw body.
    ///
    /// Textual bodies are kept verbatim; binary bodies (such as attachment
    /// archives) are summarized instead of being decoded lossily.
    pub fn from_body(status: StatusCode, content_type: Option<&str>, body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::new(status, None, None);
        }

        if !is_textual(content_type) {
            let text = format!(
                "Binary response: {} bytes ({})",
                body.len(),
                content_type.unwrap_or("unknown content type")
            );
            return Self::new(status, Some(text), None);
        }

        let text = String::from_utf8_lossy(body).into_owned();
        let payload = serde_json::from_slice::<Value>(body).ok();

        Self::new(status, Some(text), payload)
    }
}

fn is_textual(content_type: Option<&str>) -> bool {
    match content_type {
        None => true,
        Some(ct) => {
            let ct = ct.to_ascii_lowercase();
            ct.starts_with("text/") || ct.contains("json") || ct.contains("xml")
        }
    }
}
