//! Error types for Private Share
//!
//! This module defines the error types for every component of the application.
//! Errors are designed to be actionable and provide clear context for debugging and
//! user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Application credential errors
#[derive(Error, Debug)]
pub enum CredentialsError {
    /// A required identifier is empty
    #[error("Missing {field}. Set it in the [application] config section or via {env_var}")]
    MissingField {
        field: &'static str,
        env_var: &'static str,
    },

    /// Private key file could not be read
    #[error("Failed to read private key file {path}: {source}")]
    KeyFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Private key file exists but holds no key material
    #[error("Private key file is empty: {path}")]
    EmptyKey { path: PathBuf },
}

/// Session establishment and authorization URL errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// HTTP request failed
    #[error("Session request failed")]
    Http(#[from] reqwest::Error),

    /// Platform rejected the session request
    #[error("Platform rejected session request: HTTP {status}")]
    Rejected { status: u16 },

    /// Response did not carry a session key
    #[error("Platform response did not contain a session key")]
    MissingSessionKey,

    /// A URL could not be constructed
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Platform responded with HTTP 429")]
    RateLimitExceeded,

    /// Maximum retries exceeded
    #[error("Maximum retry attempts ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },
}

/// Errors that stop a pull before any file is delivered
#[derive(Error, Debug)]
pub enum PullError {
    /// HTTP request failed
    #[error("Pull request failed")]
    Http(#[from] reqwest::Error),

    /// Platform returned an error status for the file list
    #[error("Platform error while listing files: HTTP {status}")]
    ServerError { status: u16 },

    /// Session key is unknown to the platform or already consumed
    #[error("Session not found or expired: {session_key}")]
    SessionNotFound { session_key: String },

    /// A URL could not be constructed
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded. Platform responded with HTTP 429")]
    RateLimitExceeded,

    /// Maximum retries exceeded
    #[error("Maximum retry attempts ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    /// Private key cannot be turned into a file key
    #[error("Private key unusable for decryption")]
    InvalidKey(#[from] DecryptError),
}

/// Errors decoding or decrypting a single file payload
#[derive(Error, Debug)]
pub enum DecryptError {
    /// Payload is not valid base64
    #[error("File content is not valid base64")]
    Encoding(#[from] base64::DecodeError),

    /// Payload shorter than the nonce
    #[error("File payload too short: {length} bytes")]
    Truncated { length: usize },

    /// Authentication tag did not verify
    #[error("File payload failed to decrypt with the configured private key")]
    Authentication,

    /// File key could not be derived from the private key
    #[error("Failed to derive file key from private key")]
    KeyDerivation,
}

/// Errors interpreting a decrypted file's content
#[derive(Error, Debug)]
pub enum ContentError {
    /// Content is not UTF-8 text
    #[error("File content is not UTF-8 text")]
    Utf8(#[from] std::str::Utf8Error),

    /// Content is not valid JSON
    #[error("File content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Config file already exists and overwrite was not requested
    #[error("Configuration file already exists: {path}. Use --force to overwrite")]
    AlreadyExists { path: PathBuf },

    /// User config directory could not be determined
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// HTTP server errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Listener could not bind
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Server loop terminated with an error
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Credential error
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// Session error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Pull error
    #[error(transparent)]
    Pull(#[from] PullError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable (transient)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Session(SessionError::Http(_))
                | AppError::Session(SessionError::RateLimitExceeded)
                | AppError::Pull(PullError::Http(_))
                | AppError::Pull(PullError::RateLimitExceeded)
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Credentials(_) => "credentials",
            AppError::Session(_) => "session",
            AppError::Pull(_) => "pull",
            AppError::Config(_) => "config",
            AppError::Server(_) => "server",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Credentials result type alias
pub type CredentialsResult<T> = std::result::Result<T, CredentialsError>;

/// Session result type alias
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Pull result type alias
pub type PullResult<T> = std::result::Result<T, PullError>;

/// Decrypt result type alias
pub type DecryptResult<T> = std::result::Result<T, DecryptError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
