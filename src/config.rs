//! Configuration management for News Explorer
//!
//! This module loads the optional TOML configuration file and converts it into
//! the runtime configuration of each component. Every setting has a default,
//! so running without a file is the normal case.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{CacheConfig, ClientConfig};
use crate::auth::CredentialStore;
use crate::constants::{http, logging, newsapi, paging, search};
use crate::errors::{AuthResult, ConfigError, ConfigResult};

/// Directory name used under the platform config directory
const APP_DIR_NAME: &str = "news-explorer";

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Response cache settings
    pub cache: CacheConfig,
    /// Result display settings
    pub display: DisplayConfig,
    /// Credential storage settings
    pub auth: AuthConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Search endpoint
    pub endpoint: String,
    /// User agent header value
    pub user_agent: String,
    /// Overall request timeout, e.g. "20s" (unset = no limit)
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
    /// Connect timeout, e.g. "30s"
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            endpoint: newsapi::EVERYTHING_URL.to_string(),
            user_agent: http::USER_AGENT.to_string(),
            request_timeout: None,
            connect_timeout: http::CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            user_agent: self.user_agent.clone(),
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

/// How results are presented
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Articles per page
    pub page_size: usize,
    /// Category searched when nothing else is given
    pub default_category: String,
    /// Days between today and the default start date
    pub lookback_days: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: paging::DEFAULT_PAGE_SIZE,
            default_category: search::DEFAULT_CATEGORY.to_string(),
            lookback_days: search::DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Where the API key is stored
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Credential file (unset = platform config directory)
    pub credential_file: Option<PathBuf>,
}

impl AuthConfig {
    /// The credential store this configuration points at
    pub fn credential_store(&self) -> AuthResult<CredentialStore> {
        match &self.credential_file {
            Some(path) => Ok(CredentialStore::new(path)),
            None => CredentialStore::default_location(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration:
    /// 1. Default values
    /// 2. Config file (explicit path, or the first one found)
    ///
    /// # Errors
    ///
    /// Fails if an explicitly given file does not exist, or if any file that
    /// is found cannot be read or parsed.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        let config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    pub fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![
            // Project-local config
            PathBuf::from("./news-explorer.toml"),
        ];
        // User config
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        for path in search_paths {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        debug!("No config file found in standard locations");
        None
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        app_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Reject values that would make the application unusable
    fn validate(&self) -> ConfigResult<()> {
        if self.display.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "display.page_size".to_string(),
                value: "0".to_string(),
                reason: "Page size must be at least 1".to_string(),
            });
        }
        if self.cache.ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "cache.ttl".to_string(),
                value: "0s".to_string(),
                reason: "Use a positive duration such as \"4h\"".to_string(),
            });
        }
        self.client.to_runtime_config().endpoint_url()?;
        Ok(())
    }
}

/// Per-user application directory, e.g. `~/.config/news-explorer` on Linux
pub fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.display.page_size, 30);
        assert_eq!(config.display.default_category, "Tecnologia");
        assert_eq!(config.display.lookback_days, 4);
        assert_eq!(config.cache.ttl, Duration::from_secs(4 * 60 * 60));
        assert_eq!(config.client.endpoint, newsapi::EVERYTHING_URL);
        assert_eq!(config.logging.level, "warn");
        assert!(config.auth.credential_file.is_none());
    }

    #[tokio::test]
    async fn test_config_loading_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        // Should fail when explicitly specified
        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_config_loading_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("news-explorer.toml");

        let test_config = r#"
[client]
endpoint = "http://127.0.0.1:9000/v2/everything"
request_timeout = "20s"

[cache]
ttl = "15m"

[display]
page_size = 10
default_category = "Cinema"

[auth]
credential_file = "/tmp/news-explorer-test/credentials.env"

[logging]
level = "debug"
"#;

        tokio::fs::write(&config_path, test_config).await.unwrap();

        let config = AppConfig::load(Some(config_path)).await.unwrap();

        assert_eq!(config.client.endpoint, "http://127.0.0.1:9000/v2/everything");
        assert_eq!(config.client.request_timeout, Some(Duration::from_secs(20)));
        assert_eq!(config.cache.ttl, Duration::from_secs(15 * 60));
        assert_eq!(config.display.page_size, 10);
        assert_eq!(config.display.default_category, "Cinema");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.auth.credential_store().unwrap().path(),
            Path::new("/tmp/news-explorer-test/credentials.env")
        );

        // Unspecified values keep their defaults
        assert_eq!(config.display.lookback_days, 4);
        assert_eq!(config.client.connect_timeout, http::CONNECT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_invalid_toml_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        tokio::fs::write(&config_path, "[display\npage_size = ").await.unwrap();

        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("zero.toml");
        tokio::fs::write(&config_path, "[display]\npage_size = 0\n").await.unwrap();

        let result = AppConfig::load(Some(config_path)).await;
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_client_runtime_conversion() {
        let toml_config = ClientConfigToml {
            request_timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let runtime = toml_config.to_runtime_config();
        assert_eq!(runtime.request_timeout, Some(Duration::from_secs(5)));
        assert!(runtime.endpoint_url().is_ok());
    }

    #[test]
    fn test_app_config_dir_name() {
        if let Some(dir) = app_config_dir() {
            assert!(dir.ends_with("news-explorer"));
        }
    }
}
