//! Application State
//!
//! Arc-wrapped state shared across handlers. Everything except the session
//! registry is immutable after startup.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::app::{DataSharingClient, SessionRegistry};
use crate::auth::ApplicationCredentials;
use crate::config::AppConfig;
use crate::constants::server;
use crate::errors::{ConfigError, ConfigResult};

/// Settings the handlers read on every request
#[derive(Debug, Clone)]
pub struct WebSettings {
    /// Configured public base URL, overriding the Host header
    pub public_base_url: Option<Url>,
    /// Upper bound on draining one pull
    pub pull_timeout: Duration,
    /// Check returning session ids against the registry
    pub verify_session: bool,
    /// How long an issued session id is accepted
    pub session_ttl: Duration,
    /// Directory served under `/assets`
    pub assets_dir: PathBuf,
}

impl WebSettings {
    /// Extract web settings from the loaded configuration
    pub fn from_config(config: &AppConfig) -> ConfigResult<Self> {
        let public_base_url = config
            .server
            .public_base_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
                    field: "server.public_base_url".to_string(),
                    value: raw.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            public_base_url,
            pull_timeout: config.retrieval.pull_timeout,
            verify_session: config.retrieval.verify_session,
            session_ttl: config.retrieval.session_ttl,
            assets_dir: config.server.assets_dir.clone(),
        })
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            public_base_url: None,
            pull_timeout: server::DEFAULT_PULL_TIMEOUT,
            verify_session: false,
            session_ttl: server::DEFAULT_SESSION_TTL,
            assets_dir: PathBuf::from(server::DEFAULT_ASSETS_DIR),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    client: Arc<dyn DataSharingClient>,
    credentials: ApplicationCredentials,
    settings: WebSettings,
    sessions: SessionRegistry,
}

impl AppState {
    /// Create the state from its parts
    pub fn new(
        client: Arc<dyn DataSharingClient>,
        credentials: ApplicationCredentials,
        settings: WebSettings,
    ) -> Self {
        let sessions = SessionRegistry::new(settings.session_ttl);
        Self {
            inner: Arc::new(InnerState {
                client,
                credentials,
                settings,
                sessions,
            }),
        }
    }

    /// Get the platform client.
    pub fn client(&self) -> &dyn DataSharingClient {
        self.inner.client.as_ref()
    }

    /// Get the application credentials.
    pub fn credentials(&self) -> &ApplicationCredentials {
        &self.inner.credentials
    }

    /// Get the web settings.
    pub fn settings(&self) -> &WebSettings {
        &self.inner.settings
    }

    /// Get the issued session registry.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.inner.sessions
    }
}
