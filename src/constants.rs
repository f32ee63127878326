//! Application constants for Private Share
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Environment variable names for application credentials
pub mod env {
    /// Environment variable overriding the application identifier
    pub const APP_ID: &str = "SHARE_APP_ID";

    /// Environment variable overriding the contract identifier
    pub const CONTRACT_ID: &str = "SHARE_CONTRACT_ID";

    /// Environment variable overriding the private key file path
    pub const PRIVATE_KEY_PATH: &str = "SHARE_PRIVATE_KEY_PATH";
}

/// Credential-related constants
pub mod credentials {
    /// Application id shipped in generated configuration; must be replaced
    pub const PLACEHOLDER_APP_ID: &str = "PLACEHOLDER_APP_ID";

    /// Sample contract published by the platform for demonstration apps
    pub const SAMPLE_CONTRACT_ID: &str = "fJI8P5Z4cIhP3HawlXVvxWBrbyj5QkTF";

    /// Default private key file name, resolved relative to the working directory
    pub const DEFAULT_PRIVATE_KEY_FILE: &str = "private-share.key";

    /// Permission bits that should not be set on the key file (group/other)
    #[cfg(unix)]
    pub const KEY_FILE_LOOSE_PERMISSIONS: u32 = 0o077;
}

/// Data-sharing platform endpoints and protocol values
pub mod platform {
    /// Platform REST API base URL
    pub const API_BASE_URL: &str = "https://api.digi.me/v1.6";

    /// Web onboarding page for the guest private-share flow
    pub const GUEST_SHARE_URL: &str = "https://api.digi.me/apps/quark/direct-onboarding";

    /// Deep link into the consenting mobile application
    pub const CONSENT_SHARE_URL: &str = "digime://consent-access";

    /// Session establishment path, relative to the API base
    pub const SESSION_PATH: &str = "permission-access/session";

    /// File query path prefix, relative to the API base
    pub const QUERY_PATH: &str = "permission-access/query";

    /// Result format version requested from the consent flow
    pub const RESULT_VERSION: &str = "2";
}

/// Values the platform echoes back in the `result` query parameter
pub mod share_result {
    /// The user approved the share and data is ready
    pub const SUCCESS: &str = "SUCCESS";

    /// The user declined the share
    pub const CANCELLED: &str = "CANCELLED";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all platform requests
    pub const USER_AGENT: &str = concat!("Private-Share/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// Rate limiting and retry configuration
pub mod limits {
    /// Default rate limit for platform requests (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 10;

    /// Maximum retry attempts for failed requests
    pub const MAX_RETRIES: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 500;

    /// Number of files fetched concurrently during a pull
    pub const DEFAULT_PULL_CONCURRENCY: usize = 4;
}

/// HTTP server constants
pub mod server {
    use super::Duration;

    /// Default listening port
    pub const DEFAULT_PORT: u16 = 8081;

    /// Default bind address
    pub const DEFAULT_BIND: &str = "0.0.0.0";

    /// Directory served under `/assets`
    pub const DEFAULT_ASSETS_DIR: &str = "assets";

    /// Route the platform redirects back to
    pub const RETURN_PATH: &str = "/return";

    /// Query parameter carrying the session key on return
    pub const SESSION_ID_PARAM: &str = "sessionId";

    /// Upper bound on draining one pull
    pub const DEFAULT_PULL_TIMEOUT: Duration = Duration::from_secs(5 * 60);

    /// How long an issued session is remembered
    pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);
}

/// File payload envelope constants
pub mod envelope {
    /// AES-256-GCM nonce length in bytes
    pub const NONCE_LENGTH: usize = 12;

    /// AES-256 key length in bytes
    pub const KEY_LENGTH: usize = 32;

    /// HKDF info string binding derived keys to file payloads
    pub const KEY_INFO: &[u8] = b"private-share file key v1";
}

/// Configuration file locations
pub mod config {
    /// Project-local configuration file name
    pub const LOCAL_CONFIG_FILE: &str = "private-share.toml";

    /// Directory under the user config dir
    pub const CONFIG_DIR_NAME: &str = "private-share";

    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

// Re-export commonly used constants for convenience
pub use http::USER_AGENT;
pub use limits::{DEFAULT_RATE_LIMIT_RPS, MAX_RETRIES, RETRY_BASE_DELAY_MS};
pub use server::DEFAULT_PORT;
