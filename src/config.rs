//! Configuration management for Private Share
//!
//! This module provides configuration loading from TOML with zero-config
//! defaults. Every section may be omitted; missing values fall back to the
//! defaults below. Credentials can additionally be overridden from the
//! environment (see [`crate::auth`]).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::app::ClientConfig;
use crate::constants::{self, credentials, http, limits, platform, server};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Application identity and key location
    pub application: ApplicationConfig,
    /// Platform client settings
    pub client: ClientConfigToml,
    /// Return-route retrieval settings
    pub retrieval: RetrievalConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening port
    pub port: u16,
    /// Bind address
    pub bind: String,
    /// Externally visible base URL used for callback URLs.
    /// When unset, the base is derived from the request's Host header.
    pub public_base_url: Option<String>,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: server::DEFAULT_PORT,
            bind: server::DEFAULT_BIND.to_string(),
            public_base_url: None,
            assets_dir: PathBuf::from(server::DEFAULT_ASSETS_DIR),
        }
    }
}

/// Application identity as registered with the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Application identifier issued by the platform
    pub app_id: String,
    /// Contract identifier for the data-sharing agreement
    pub contract_id: String,
    /// Path to the private key file
    pub private_key_path: PathBuf,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            app_id: credentials::PLACEHOLDER_APP_ID.to_string(),
            contract_id: credentials::SAMPLE_CONTRACT_ID.to_string(),
            private_key_path: PathBuf::from(credentials::DEFAULT_PRIVATE_KEY_FILE),
        }
    }
}

/// TOML-friendly platform client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Platform REST API base URL
    pub api_base_url: String,
    /// Guest (web) share page
    pub guest_share_url: String,
    /// Consent application deep link
    pub consent_share_url: String,
    /// Request timeout
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connect timeout
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Maximum idle connections per host
    pub pool_max_per_host: usize,
    /// Rate limit (requests per second)
    pub rate_limit_rps: u32,
    /// Files fetched concurrently during a pull
    pub pull_concurrency: usize,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            api_base_url: platform::API_BASE_URL.to_string(),
            guest_share_url: platform::GUEST_SHARE_URL.to_string(),
            consent_share_url: platform::CONSENT_SHARE_URL.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            pull_concurrency: limits::DEFAULT_PULL_CONCURRENCY,
        }
    }
}

/// Settings for the return route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Upper bound on draining one pull
    #[serde(with = "humantime_serde")]
    pub pull_timeout: Duration,
    /// Reject returning session ids that this process did not issue
    pub verify_session: bool,
    /// How long an issued session id is accepted
    #[serde(with = "humantime_serde")]
    pub session_ttl: Duration,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            pull_timeout: server::DEFAULT_PULL_TIMEOUT,
            verify_session: false,
            session_ttl: server::DEFAULT_SESSION_TTL,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: constants::config::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults are used when nothing is found.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if path.exists() => Some(path),
            Some(path) => return Err(ConfigError::NotFound { path }),
            None => Self::find_config_file(),
        };

        let config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(base) = &self.server.public_base_url {
            Url::parse(base).map_err(|e| ConfigError::InvalidValue {
                field: "server.public_base_url".to_string(),
                value: base.clone(),
                reason: e.to_string(),
            })?;
        }

        for (field, value) in [
            ("client.api_base_url", &self.client.api_base_url),
            ("client.guest_share_url", &self.client.guest_share_url),
            ("client.consent_share_url", &self.client.consent_share_url),
        ] {
            Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }

        if self.client.rate_limit_rps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.rate_limit_rps".to_string(),
                value: "0".to_string(),
                reason: "Rate limit must be non-zero".to_string(),
            });
        }

        if self.client.pull_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.pull_concurrency".to_string(),
                value: "0".to_string(),
                reason: "At least one file must be fetched at a time".to_string(),
            });
        }

        self.socket_addr()?;
        Ok(())
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        let raw = format!("{}:{}", self.server.bind, self.server.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            field: "server.bind".to_string(),
            value: self.server.bind.clone(),
            reason: "Expected an IP address".to_string(),
        })
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![
            PathBuf::from(format!("./{}", constants::config::LOCAL_CONFIG_FILE)),
            PathBuf::from("./config.toml"),
        ];
        if let Ok(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        for path in search_paths {
            if path.exists() {
                debug!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        None
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir
            .join(constants::config::CONFIG_DIR_NAME)
            .join("config.toml"))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.to_path_buf(),
            })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Write the commented default configuration to `path`
    pub async fn write_default(path: &Path, force: bool) -> ConfigResult<()> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|_| ConfigError::NotFound {
                        path: parent.to_path_buf(),
                    })?;
            }
        }

        tokio::fs::write(path, Self::generate_default_config_content())
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.to_path_buf(),
            })?;

        info!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        format!(
            r#"# Private Share Configuration
# Every value below is the built-in default.

[server]
port = {port}
bind = "{bind}"
# Set when running behind a proxy; otherwise the Host header is used.
# public_base_url = "https://example.org"
assets_dir = "{assets}"

[application]
# Replace with the application id issued by the platform
app_id = "{app_id}"
contract_id = "{contract_id}"
private_key_path = "{key_path}"

[client]
api_base_url = "{api}"
guest_share_url = "{guest}"
consent_share_url = "{consent}"
request_timeout = "60s"
connect_timeout = "30s"
pool_max_per_host = {pool}
rate_limit_rps = {rps}
pull_concurrency = {concurrency}

[retrieval]
pull_timeout = "5m"
# Only accept session ids issued by this process
verify_session = false
session_ttl = "1h"

[logging]
level = "info"  # error, warn, info, debug, trace
"#,
            port = server::DEFAULT_PORT,
            bind = server::DEFAULT_BIND,
            assets = server::DEFAULT_ASSETS_DIR,
            app_id = credentials::PLACEHOLDER_APP_ID,
            contract_id = credentials::SAMPLE_CONTRACT_ID,
            key_path = credentials::DEFAULT_PRIVATE_KEY_FILE,
            api = platform::API_BASE_URL,
            guest = platform::GUEST_SHARE_URL,
            consent = platform::CONSENT_SHARE_URL,
            pool = http::POOL_MAX_PER_HOST,
            rps = limits::DEFAULT_RATE_LIMIT_RPS,
            concurrency = limits::DEFAULT_PULL_CONCURRENCY,
        )
    }
}

impl ClientConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_base_url.clone(),
            guest_share_url: self.guest_share_url.clone(),
            consent_share_url: self.consent_share_url.clone(),
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_per_host: self.pool_max_per_host,
            rate_limit_rps: self.rate_limit_rps,
            pull_concurrency: self.pull_concurrency,
        }
    }
}
