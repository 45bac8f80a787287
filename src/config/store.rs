//! Reading and writing the settings file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, info};

use super::settings::RawSettings;
use super::{ConfigError, Result};

/// Directory name under the platform config directory.
const APP_DIR: &str = "issuetrak-console";

/// File name of the settings file.
const FILE_NAME: &str = "config.toml";

/// Keys whose values are never echoed back in full.
const SECRET_KEYS: &[&str] = &["api_key", "apikey"];

/// Keys stored as integers when the value parses as one.
const NUMERIC_KEYS: &[&str] = &["api_version", "apiversion"];

/// A TOML settings file on disk.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The settings file in the platform configuration directory.
    ///
    /// - Linux: `~/.config/issuetrak-console/config.toml`
    /// - macOS: `~/Library/Application Support/issuetrak-console/config.toml`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\issuetrak-console\config.toml`
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings. A missing file is an error.
    pub fn load(&self) -> Result<RawSettings> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::ReadError(self.path.clone(), e))?;
        debug!(path = %self.path.display(), "Loaded settings file");
        toml::from_str(&content).map_err(ConfigError::ParseError)
    }

    fn read_table(&self) -> Result<Table> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::ReadError(self.path.clone(), e))?;
        content.parse::<Table>().map_err(ConfigError::ParseError)
    }

    /// Like `read_table`, but a file that does not exist yet is empty.
    fn read_table_or_empty(&self) -> Result<Table> {
        match self.read_table() {
            Err(ConfigError::ReadError(_, e)) if e.kind() == io::ErrorKind::NotFound => {
                Ok(Table::new())
            }
            other => other,
        }
    }

    /// All key/value pairs sorted by key, secrets masked.
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let table = self.read_table()?;
        Ok(table
            .iter()
            .map(|(key, value)| (key.clone(), display_value(key, value)))
            .collect())
    }

    /// The value of one key, secrets masked. `None` when the key is absent.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let table = self.read_table()?;
        Ok(table.get(key).map(|value| display_value(key, value)))
    }

    /// Add or update a key, creating the file and its directory as needed.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut table = self.read_table_or_empty()?;

        let value = if is_one_of(key, NUMERIC_KEYS) {
            value
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::String(value.to_string()))
        } else {
            Value::String(value.to_string())
        };
        table.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        let content = toml::to_string_pretty(&table).map_err(ConfigError::SerializeError)?;
        fs::write(&self.path, content).map_err(ConfigError::WriteError)?;

        info!(path = %self.path.display(), key, "Updated setting");
        Ok(())
    }
}

fn is_one_of(key: &str, keys: &[&str]) -> bool {
    keys.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn display_value(key: &str, value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if is_one_of(key, SECRET_KEYS) {
        mask_secret(&text)
    } else {
        text
    }
}

/// Keep the first four characters of a secret and hide the rest.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "********".to_string()
    } else {
        format!("{}********", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("nope.toml"));
        assert!(matches!(file.load(), Err(ConfigError::ReadError(_, _))));
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_api_url = ").unwrap();

        let file = SettingsFile::new(&path);
        assert!(matches!(file.load(), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_set_creates_file_and_directory() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("nested").join("config.toml"));

        file.set("base_api_url", "https://issuetrak.example.com").unwrap();
        file.set("api_version", "1").unwrap();
        file.set("api_key", "0123456789abcdef").unwrap();

        let raw = file.load().unwrap();
        assert_eq!(
            raw.base_api_url.as_deref(),
            Some("https://issuetrak.example.com")
        );
        let settings = raw.resolve(|_| None).unwrap();
        assert_eq!(settings.api_version, 1);
        assert_eq!(settings.api_key, "0123456789abcdef");
    }

    #[test]
    fn test_set_updates_existing_key() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("config.toml"));

        file.set("username", "first").unwrap();
        file.set("username", "second").unwrap();

        assert_eq!(file.get("username").unwrap().as_deref(), Some("second"));
        assert_eq!(file.entries().unwrap().len(), 1);
    }

    #[test]
    fn test_get_absent_key() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("config.toml"));
        file.set("username", "jsmith").unwrap();

        assert_eq!(file.get("api_key").unwrap(), None);
    }

    #[test]
    fn test_entries_mask_api_key() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("config.toml"));
        file.set("api_key", "0123456789abcdef").unwrap();
        file.set("api_version", "2").unwrap();

        let entries = file.entries().unwrap();
        assert!(entries.contains(&("api_key".to_string(), "0123********".to_string())));
        assert!(entries.contains(&("api_version".to_string(), "2".to_string())));
    }

    #[test]
    fn test_mask_short_secret_entirely() {
        assert_eq!(mask_secret("abc"), "********");
        assert_eq!(mask_secret("abcdefghijk"), "abcd********");
    }
}
