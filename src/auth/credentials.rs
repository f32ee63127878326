//! Application credential loading
//!
//! Credentials are the application id, the contract id and the private key
//! used to decrypt shared files. They are loaded once at startup from the
//! `[application]` config section, with environment overrides, and are
//! read-only afterwards.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ApplicationConfig;
use crate::constants::{credentials, env as env_constants};
use crate::errors::{CredentialsError, CredentialsResult};

/// Private key material. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(Arc<str>);

impl PrivateKey {
    /// Wrap key material
    pub fn new(material: impl Into<String>) -> Self {
        Self(Arc::from(material.into()))
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Immutable application credentials
#[derive(Debug, Clone)]
pub struct ApplicationCredentials {
    /// Application identifier issued by the platform
    pub application_id: String,
    /// Contract identifier
    pub contract_id: String,
    /// Key used to decrypt retrieved files
    pub private_key: PrivateKey,
}

impl ApplicationCredentials {
    /// Build credentials directly, e.g. for tests or embedding
    pub fn new(
        application_id: impl Into<String>,
        contract_id: impl Into<String>,
        private_key: PrivateKey,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            contract_id: contract_id.into(),
            private_key,
        }
    }

    /// Load credentials from config with environment overrides
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError` if an identifier is empty or the key file
    /// is missing, unreadable or empty.
    pub fn load(config: &ApplicationConfig) -> CredentialsResult<Self> {
        Self::resolve(config, |name| env::var(name).ok())
    }

    fn resolve(
        config: &ApplicationConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> CredentialsResult<Self> {
        let EffectiveSettings {
            application_id,
            contract_id,
            key_path,
        } = EffectiveSettings::resolve(config, lookup);

        if application_id.is_empty() {
            return Err(CredentialsError::MissingField {
                field: "application id",
                env_var: env_constants::APP_ID,
            });
        }
        if application_id == credentials::PLACEHOLDER_APP_ID {
            warn!(
                "Application id is still the placeholder; the platform will reject sessions until {} is set",
                env_constants::APP_ID
            );
        }

        if contract_id.is_empty() {
            return Err(CredentialsError::MissingField {
                field: "contract id",
                env_var: env_constants::CONTRACT_ID,
            });
        }

        let private_key = read_private_key(&key_path)?;
        debug!(
            "Loaded credentials for application {} (contract {}) with key {}",
            application_id,
            contract_id,
            key_path.display()
        );

        Ok(Self {
            application_id,
            contract_id,
            private_key,
        })
    }
}

/// Identifiers and key path after environment overrides, trimmed
struct EffectiveSettings {
    application_id: String,
    contract_id: String,
    key_path: PathBuf,
}

impl EffectiveSettings {
    fn resolve(config: &ApplicationConfig, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let application_id =
            lookup(env_constants::APP_ID).unwrap_or_else(|| config.app_id.clone());
        let contract_id =
            lookup(env_constants::CONTRACT_ID).unwrap_or_else(|| config.contract_id.clone());
        let key_path = lookup(env_constants::PRIVATE_KEY_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| config.private_key_path.clone());

        Self {
            application_id: application_id.trim().to_string(),
            contract_id: contract_id.trim().to_string(),
            key_path,
        }
    }
}

/// Read the key file, warning when it is readable by other users
fn read_private_key(path: &Path) -> CredentialsResult<PrivateKey> {
    let material =
        std::fs::read_to_string(path).map_err(|source| CredentialsError::KeyFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

    if material.trim().is_empty() {
        return Err(CredentialsError::EmptyKey {
            path: path.to_path_buf(),
        });
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(path) {
            if metadata.permissions().mode() & credentials::KEY_FILE_LOOSE_PERMISSIONS != 0 {
                warn!(
                    "Private key file {} is readable by other users; consider chmod 600",
                    path.display()
                );
            }
        }
    }

    Ok(PrivateKey::new(material))
}

/// Credential status information
#[derive(Debug, Clone)]
pub struct CredentialsStatus {
    /// Effective application id (after environment override)
    pub application_id: String,
    /// Whether the application id is still the placeholder
    pub placeholder_app_id: bool,
    /// Effective contract id
    pub contract_id: String,
    /// Effective key path
    pub key_path: PathBuf,
    /// Whether the key file exists
    pub key_file_exists: bool,
    /// Whether the credentials load successfully
    pub loadable: bool,
}

impl CredentialsStatus {
    /// Get descriptive status message for display
    pub fn status_message(&self) -> String {
        match (self.loadable, self.placeholder_app_id) {
            (false, _) if !self.key_file_exists => format!(
                "Private key not found at {} - set {} or [application].private_key_path",
                self.key_path.display(),
                env_constants::PRIVATE_KEY_PATH
            ),
            (false, _) => "Credentials incomplete or unreadable".to_string(),
            (true, true) => format!(
                "Credentials load, but the application id is a placeholder - set {}",
                env_constants::APP_ID
            ),
            (true, false) => "Credentials configured".to_string(),
        }
    }
}

/// Check current credential status without failing
pub fn credentials_status(config: &ApplicationConfig) -> CredentialsStatus {
    status_with(config, |name| env::var(name).ok())
}

fn status_with(
    config: &ApplicationConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> CredentialsStatus {
    let settings = EffectiveSettings::resolve(config, &lookup);

    CredentialsStatus {
        placeholder_app_id: settings.application_id == credentials::PLACEHOLDER_APP_ID,
        key_file_exists: settings.key_path.exists(),
        loadable: ApplicationCredentials::resolve(config, &lookup).is_ok(),
        application_id: settings.application_id,
        contract_id: settings.contract_id,
        key_path: settings.key_path,
    }
}

/// Print credential status
pub fn show_credentials_status(config: &ApplicationConfig) {
    let status = credentials_status(config);

    println!("Private Share Credentials");
    println!("=========================");
    println!();
    println!("Application id: {}", status.application_id);
    println!("Contract id:    {}", status.contract_id);
    println!(
        "Private key:    {} ({})",
        status.key_path.display(),
        if status.key_file_exists {
            "exists"
        } else {
            "not found"
        }
    );
    println!();
    println!("Status: {}", status.status_message());
}
