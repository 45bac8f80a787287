//! API connection settings.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Settings as they appear in the settings file.
///
/// Every key is optional here so that a missing key can be reported by
/// name. The spellings used by older Issuetrak sample configurations are
/// accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawSettings {
    #[serde(default, alias = "BaseAPIURL", alias = "url")]
    pub base_api_url: Option<String>,

    #[serde(default, alias = "APIVersion", alias = "apiVersion")]
    pub api_version: Option<VersionSetting>,

    #[serde(default, alias = "APIKey", alias = "apiKey")]
    pub api_key: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
}

/// The API version may be written as a number or as a quoted string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum VersionSetting {
    Number(i64),
    Text(String),
}

impl VersionSetting {
    fn parse(&self) -> Result<u16> {
        let invalid = |value: String| {
            ConfigError::ValidationError(format!(
                "api_version '{}' must be a positive whole number",
                value
            ))
        };

        let version = match self {
            VersionSetting::Number(n) => u16::try_from(*n).map_err(|_| invalid(n.to_string()))?,
            VersionSetting::Text(s) => s.trim().parse::<u16>().map_err(|_| invalid(s.clone()))?,
        };

        if version == 0 {
            return Err(invalid(version.to_string()));
        }
        Ok(version)
    }
}

/// Validated settings needed to talk to the API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// The Issuetrak API root, e.g. `https://issuetrak.example.com`.
    pub base_api_url: String,
    /// The API version number.
    pub api_version: u16,
    /// The API key created with the Issuetrak key tool.
    pub api_key: String,
    /// The user recorded as `EnteredBy` when creating issues.
    pub username: Option<String>,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_api_url", &self.base_api_url)
            .field("api_version", &self.api_version)
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

impl RawSettings {
    /// Resolve the file contents into validated settings.
    ///
    /// When the file carries no API key, `stored_key` is asked for one with
    /// the base URL; this is how keys kept in the OS keyring are found.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSetting` naming the first absent key, or
    /// `ConfigError::ValidationError` when a value is malformed.
    pub fn resolve(self, stored_key: impl FnOnce(&str) -> Option<String>) -> Result<ApiSettings> {
        let base_api_url = non_empty(self.base_api_url)
            .ok_or(ConfigError::MissingSetting("base_api_url"))?;

        let api_version = self
            .api_version
            .ok_or(ConfigError::MissingSetting("api_version"))?
            .parse()?;

        let api_key = match non_empty(self.api_key) {
            Some(key) => key,
            None => non_empty(stored_key(&base_api_url))
                .ok_or(ConfigError::MissingSetting("api_key"))?,
        };

        let settings = ApiSettings {
            base_api_url,
            api_version,
            api_key,
            username: non_empty(self.username),
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ApiSettings {
    /// Validate these settings.
    ///
    /// Checks that the URL has an http(s) scheme and that the key contains
    /// no whitespace.
    pub fn validate(&self) -> Result<()> {
        if !self.base_api_url.starts_with("https://") && !self.base_api_url.starts_with("http://")
        {
            return Err(ConfigError::ValidationError(format!(
                "base_api_url '{}' must start with http:// or https://",
                self.base_api_url
            )));
        }

        if self.api_key.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(
                "api_key cannot contain whitespace".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured username, required by the quick-create mode.
    pub fn require_username(&self) -> Result<&str> {
        self.username
            .as_deref()
            .ok_or(ConfigError::MissingSetting("username"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stored_key(_: &str) -> Option<String> {
        None
    }

    fn raw() -> RawSettings {
        RawSettings {
            base_api_url: Some("https://issuetrak.example.com".to_string()),
            api_version: Some(VersionSetting::Number(1)),
            api_key: Some("abc123".to_string()),
            username: None,
        }
    }

    #[test]
    fn test_resolve_valid_settings() {
        let settings = raw().resolve(no_stored_key).unwrap();
        assert_eq!(settings.base_api_url, "https://issuetrak.example.com");
        assert_eq!(settings.api_version, 1);
        assert_eq!(settings.api_key, "abc123");
        assert!(settings.username.is_none());
    }

    #[test]
    fn test_missing_url_is_named() {
        let mut raw = raw();
        raw.base_api_url = None;
        let err = raw.resolve(no_stored_key).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting("base_api_url")));
    }

    #[test]
    fn test_blank_url_counts_as_missing() {
        let mut raw = raw();
        raw.base_api_url = Some("   ".to_string());
        let err = raw.resolve(no_stored_key).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting("base_api_url")));
    }

    #[test]
    fn test_missing_version_is_named() {
        let mut raw = raw();
        raw.api_version = None;
        let err = raw.resolve(no_stored_key).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting("api_version")));
    }

    #[test]
    fn test_version_as_text() {
        let mut raw = raw();
        raw.api_version = Some(VersionSetting::Text(" 2 ".to_string()));
        assert_eq!(raw.resolve(no_stored_key).unwrap().api_version, 2);
    }

    #[test]
    fn test_malformed_version_rejected() {
        for bad in [
            VersionSetting::Text("one".to_string()),
            VersionSetting::Number(0),
            VersionSetting::Number(-1),
            VersionSetting::Number(70_000),
        ] {
            let mut raw = raw();
            raw.api_version = Some(bad);
            let err = raw.resolve(no_stored_key).unwrap_err();
            assert!(err.to_string().contains("positive whole number"));
        }
    }

    #[test]
    fn test_stored_key_used_when_file_has_none() {
        let mut raw = raw();
        raw.api_key = None;
        let settings = raw
            .resolve(|url| {
                assert_eq!(url, "https://issuetrak.example.com");
                Some("from-keyring".to_string())
            })
            .unwrap();
        assert_eq!(settings.api_key, "from-keyring");
    }

    #[test]
    fn test_missing_key_everywhere() {
        let mut raw = raw();
        raw.api_key = None;
        let err = raw.resolve(no_stored_key).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting("api_key")));
    }

    #[test]
    fn test_invalid_url_scheme_rejected() {
        let mut raw = raw();
        raw.base_api_url = Some("issuetrak.example.com".to_string());
        let err = raw.resolve(no_stored_key).unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_require_username() {
        let settings = raw().resolve(no_stored_key).unwrap();
        assert!(matches!(
            settings.require_username(),
            Err(ConfigError::MissingSetting("username"))
        ));

        let mut raw = raw();
        raw.username = Some("jsmith".to_string());
        let settings = raw.resolve(no_stored_key).unwrap();
        assert_eq!(settings.require_username().unwrap(), "jsmith");
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = raw().resolve(no_stored_key).unwrap();
        let debug_output = format!("{:?}", settings);
        assert!(!debug_output.contains("abc123"));
    }

    #[test]
    fn test_aliases_are_accepted() {
        let raw: RawSettings = toml::from_str(
            r#"
            url = "https://issuetrak.example.com"
            apiVersion = "1"
            apiKey = "abc123"
            username = "jsmith"
            "#,
        )
        .unwrap();

        let settings = raw.resolve(no_stored_key).unwrap();
        assert_eq!(settings.api_version, 1);
        assert_eq!(settings.username.as_deref(), Some("jsmith"));
    }

    #[test]
    fn test_legacy_names_are_accepted() {
        let raw: RawSettings = toml::from_str(
            r#"
            BaseAPIURL = "https://issuetrak.example.com"
            APIVersion = 1
            APIKey = "abc123"
            "#,
        )
        .unwrap();

        assert_eq!(raw.resolve(no_stored_key).unwrap().api_key, "abc123");
    }
}
