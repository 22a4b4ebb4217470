use crate::catalog::{default_categories, CategoryOption};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://codehelp-apis.vercel.app/api/get-top-courses";

const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "top-courses.log";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Runtime configuration for the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub api_url: String,
    pub categories: Vec<CategoryOption>,
    pub toast_duration_ms: u64,
    pub tick_rate_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            categories: default_categories(),
            toast_duration_ms: 5_000,
            tick_rate_ms: 250,
        }
    }
}

impl CatalogConfig {
    /// Load from `path`, or from the platform config dir when `path` is `None`.
    ///
    /// A missing file yields the defaults. The result is validated either way.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };

        let config = if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_path(&path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: CatalogConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: format!("unsupported scheme in `{}`", url),
            });
        }
        if self.categories.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "categories",
                reason: "must contain at least one option".to_string(),
            });
        }
        if self.toast_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "toast_duration_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_rate_ms",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

fn project_dirs() -> Result<directories::ProjectDirs, ConfigError> {
    directories::ProjectDirs::from("com", "topcourses", "top-courses")
        .ok_or(ConfigError::NoHomeDirectory)
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

pub fn default_log_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.cache_dir().join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.categories[0].title, "All");
        assert_eq!(config.toast_duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_empty_url() {
        let config = CatalogConfig {
            api_url: "  ".to_string(),
            ..CatalogConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "api_url", .. })
        ));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = CatalogConfig {
            api_url: "ftp://example.com/courses".to_string(),
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_categories() {
        let config = CatalogConfig {
            categories: Vec::new(),
            ..CatalogConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "categories", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_durations() {
        let config = CatalogConfig {
            toast_duration_ms: 0,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CatalogConfig {
            tick_rate_ms: 0,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::load(Some(dir.path().join("absent.json").as_path())).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_url": "http://localhost:9000/courses"}}"#).unwrap();
        let config = CatalogConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.api_url, "http://localhost:9000/courses");
        assert_eq!(config.categories.len(), default_categories().len());
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            CatalogConfig::load(Some(file.path())),
            Err(ConfigError::Parse(_))
        ));
    }
}
