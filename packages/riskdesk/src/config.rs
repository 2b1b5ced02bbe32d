//! Dashboard configuration.
//!
//! Resolution order, lowest to highest: built-in defaults, the TOML file in
//! the platform config directory, the `RISKDESK_API_URL` environment
//! variable, and finally the `--api-url` flag.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const API_URL_ENV: &str = "RISKDESK_API_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the analysis service, e.g. `http://localhost:8000/api`
    pub api_url: String,
    /// Locale override for UI strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            locale: None,
        }
    }
}

impl Config {
    /// Default config file path: `<config dir>/riskdesk/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "riskdesk")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load defaults, the config file if one exists, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_api_url(env::var(API_URL_ENV).ok());
        Ok(config)
    }

    /// Read a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override the API URL; blank values are ignored.
    pub fn apply_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
    }

    /// Builder form of [`apply_api_url`](Self::apply_api_url), for CLI flags.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        self.apply_api_url(url);
        self
    }

    /// The API URL without trailing slashes
    pub fn api_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url(), "http://localhost:8000/api");
        assert_eq!(config.locale, None);
    }

    #[test]
    fn test_from_file_with_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "locale = \"en_gb\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.locale.as_deref(), Some("en_gb"));
    }

    #[test]
    fn test_from_file_api_url_trailing_slash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"https://risk.example.com/api/\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api_url(), "https://risk.example.com/api");
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = [not toml").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let config = Config::default()
            .with_api_url(Some("   ".to_string()))
            .with_api_url(None);
        assert_eq!(config.api_url(), DEFAULT_API_URL);

        let config = Config::default().with_api_url(Some(" http://10.0.0.5:9000/api ".to_string()));
        assert_eq!(config.api_url(), "http://10.0.0.5:9000/api");
    }
}
