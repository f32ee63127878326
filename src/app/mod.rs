//! Core application logic for Private Share
//!
//! This module contains the platform client, the data models that flow
//! through a share, file decryption, the retrieval sink and the registry of
//! issued sessions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use private_share::app::{
//!     drain, ClientConfig, DataSharingClient, LoggingSink, PlatformClient, PullRequest,
//! };
//! use private_share::auth::PrivateKey;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PlatformClient::with_config(ClientConfig::default())?;
//! let files = client
//!     .pull_session_data(PullRequest {
//!         session_key: "session-key".to_string(),
//!         private_key: PrivateKey::new("key material"),
//!     })
//!     .await?;
//!
//! let mut sink = LoggingSink::new();
//! drain(files, &mut sink).await;
//! println!("Retrieved {} file(s)", sink.summary().retrieved.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod decrypt;
pub mod models;
pub mod retrieval;
pub mod sessions;

// Re-export main public API
pub use client::{ClientConfig, DataSharingClient, PlatformClient};
pub use decrypt::FileDecryptor;
pub use models::{
    FileError, FileEvent, FileStream, PullRequest, RetrievedFile, Session, SessionRequest,
    ShareResult,
};
pub use retrieval::{drain, parse_file_content, FileSink, LoggingSink, RetrievalSummary};
pub use sessions::SessionRegistry;
