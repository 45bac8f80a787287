//! Configuration management for the Issuetrak console.
//!
//! This module handles loading and editing the settings file that carries
//! the API connection details.

mod settings;
mod store;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use settings::{ApiSettings, RawSettings, VersionSetting};
pub use store::{mask_secret, SettingsFile};

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    #[error("failed to create configuration directory: {0}")]
    CreateDirError(#[source] io::Error),

    #[error("failed to read {}: {1}", .0.display())]
    ReadError(PathBuf, #[source] io::Error),

    #[error("failed to write configuration: {0}")]
    WriteError(#[source] io::Error),

    #[error("invalid configuration file: {0}")]
    ParseError(#[source] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[source] toml::ser::Error),

    /// A value is present but unusable.
    #[error("{0}")]
    ValidationError(String),

    /// A required key is absent.
    #[error("missing required setting '{0}'")]
    MissingSetting(&'static str),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Load and validate the API settings from `file`.
///
/// Keys missing from the file fall back to the OS keyring through
/// `stored_key`.
pub fn load_api_settings(
    file: &SettingsFile,
    stored_key: impl FnOnce(&str) -> Option<String>,
) -> Result<ApiSettings> {
    file.load()?.resolve(stored_key)
}
