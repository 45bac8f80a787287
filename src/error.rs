//! Centralized error types for the Issuetrak console.
//!
//! Each layer has its own `thiserror` enum. [`AppError`] aggregates them and
//! adds operator-facing messages.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;
use crate::render::RenderError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Response rendering errors.
    #[error("{0}")]
    Render(#[from] RenderError),

    /// Console or file IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a message suitable for printing to the operator.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find the configuration directory. Pass --config with a settings file."
                        .to_string()
                }
                ConfigError::CreateDirError(_) => {
                    "Could not create the configuration directory. Check file permissions."
                        .to_string()
                }
                ConfigError::ReadError(path, _) => format!(
                    "Could not read the settings file at {}. Check that it exists and is readable.",
                    path.display()
                ),
                ConfigError::WriteError(_) => {
                    "Could not save the settings file. Check file permissions.".to_string()
                }
                ConfigError::ParseError(e) => format!("The settings file is not valid TOML: {}", e),
                ConfigError::SerializeError(_) => {
                    "Could not save the settings file. Internal error.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::MissingSetting(key) => {
                    format!("The required setting '{}' is not configured.", key)
                }
            },
            AppError::Api(e) => match e {
                ApiError::Network(_) => {
                    "Could not reach the Issuetrak server. Check the URL and your network."
                        .to_string()
                }
                ApiError::InvalidUrl(url) => format!("Invalid Issuetrak URL: {}", url),
                ApiError::InvalidApiKey(_) => "The configured API key is not valid.".to_string(),
                ApiError::Serialization(_) => {
                    "Could not build the request body. Internal error.".to_string()
                }
                ApiError::Keyring(_) => {
                    "Could not access secure storage for the API key.".to_string()
                }
                ApiError::RetriesExhausted(attempts) => format!(
                    "The Issuetrak server did not respond after {} attempts.",
                    attempts
                ),
            },
            AppError::Render(e) => format!("Could not display the response: {}", e),
            AppError::Io(_) => "Console input or output failed.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Get a suggested action for the operator.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ReadError(..))
            | AppError::Config(ConfigError::MissingSetting(_)) => Some(
                "Run 'issuetrak-console config set <key> <value>' for base_api_url, api_version and api_key.",
            ),
            AppError::Config(ConfigError::NoConfigDir) => {
                Some("Pass --config <path> to use an explicit settings file.")
            }
            AppError::Api(ApiError::InvalidApiKey(_)) | AppError::Api(ApiError::Keyring(_)) => {
                Some("Run 'issuetrak-console config store-key' to save a new API key.")
            }
            AppError::Api(ApiError::Network(_)) | AppError::Api(ApiError::RetriesExhausted(_)) => {
                Some("Check base_api_url with 'issuetrak-console config get base_api_url'.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
