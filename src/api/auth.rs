//! Authentication handling for the Issuetrak API.
//!
//! Requests carry the API key in a single header. Keys can live in the
//! settings file or in the OS keyring, keyed by the API base URL.

use reqwest::header::HeaderValue;

use super::error::{ApiError, Result};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-Issuetrak-API-Key";

/// The keyring service name for stored API keys.
const KEYRING_SERVICE: &str = "issuetrak-console";

/// Authentication credentials for the Issuetrak API.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The header value, marked sensitive so it never shows up in debug output.
    header_value: HeaderValue,
}

impl Auth {
    /// Create credentials from an API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or contains characters that are
    /// not valid in an HTTP header.
    pub fn new(api_key: &str) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ApiError::InvalidApiKey("key is empty".to_string()));
        }

        let mut header_value = HeaderValue::from_str(api_key)
            .map_err(|e| ApiError::InvalidApiKey(e.to_string()))?;
        header_value.set_sensitive(true);

        Ok(Self { header_value })
    }

    /// Get the header value for HTTP requests.
    pub fn header_value(&self) -> &HeaderValue {
        &self.header_value
    }
}

fn entry(account: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE, account)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))
}

/// Store an API key in the OS keyring.
///
/// # Arguments
///
/// * `account` - The keyring account, conventionally the API base URL
/// * `key` - The API key to store
pub fn store_key(account: &str, key: &str) -> Result<()> {
    entry(account)?
        .set_password(key)
        .map_err(|e| ApiError::Keyring(format!("failed to store key: {}", e)))
}

/// Retrieve an API key from the OS keyring.
pub fn get_key(account: &str) -> Result<String> {
    entry(account)?
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve key: {}", e)))
}

/// Check if a key exists in the OS keyring for an account.
pub fn has_key(account: &str) -> bool {
    get_key(account).is_ok()
}
