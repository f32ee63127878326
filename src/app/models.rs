//! Data models for the share flow
//!
//! Sessions come from the platform, files flow out of a pull as
//! [`FileEvent`]s, and [`ShareResult`] is the outcome the platform echoes
//! back on the return route.

use std::fmt;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::auth::PrivateKey;
use crate::constants::share_result;

/// A session established with the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Key correlating the authorization redirect with the later pull
    #[serde(default)]
    pub session_key: String,
    /// Expiry as milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
    /// Token for the guest web flow, when the platform issues one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_exchange_token: Option<String>,
}

impl Session {
    /// Session with only a key
    pub fn new(session_key: impl Into<String>) -> Self {
        Self {
            session_key: session_key.into(),
            expiry: None,
            session_exchange_token: None,
        }
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry.and_then(DateTime::from_timestamp_millis)
    }
}

/// Body of the session establishment request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Application id
    pub app_id: String,
    /// Contract id
    pub contract_id: String,
}

/// Parameters of a pull
#[derive(Debug, Clone)]
pub struct PullRequest {
    /// Session key echoed back by the platform
    pub session_key: String,
    /// Key used to decrypt the files
    pub private_key: PrivateKey,
}

/// A decrypted file delivered by a pull
#[derive(Debug, Clone)]
pub struct RetrievedFile {
    /// File name as listed by the platform
    pub file_name: String,
    /// Decrypted bytes
    pub file_data: Vec<u8>,
    /// Metadata attached by the platform
    pub file_metadata: serde_json::Value,
}

/// A file that could not be retrieved or decrypted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    /// File name as listed by the platform
    pub file_name: String,
    /// Human-readable cause
    pub error: String,
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file_name, self.error)
    }
}

/// One delivery from a pull
#[derive(Debug, Clone)]
pub enum FileEvent {
    /// File retrieved and decrypted
    Data(RetrievedFile),
    /// File failed
    Error(FileError),
}

/// Files of a pull, in no particular order. The end of the stream is the
/// completion signal.
pub type FileStream = Pin<Box<dyn Stream<Item = FileEvent> + Send>>;

/// Outcome of the authorization flow, from the `result` query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareResult {
    /// The user approved and data is ready
    Success,
    /// The user declined
    Cancelled,
    /// Anything else, including a missing value
    Other(String),
}

impl ShareResult {
    /// Parse the `result` query value. Only an exact match is a success.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(share_result::SUCCESS) => Self::Success,
            Some(share_result::CANCELLED) => Self::Cancelled,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other(String::new()),
        }
    }

    /// Whether retrieval may proceed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}
