//! Prelude module for the Private Share library
//!
//! Re-exports the items needed to embed the share flow in another server
//! with a single `use private_share::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use private_share::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     let credentials = ApplicationCredentials::load(&config.application)?;
//!     let client = PlatformClient::with_config(config.client.to_runtime_config())?;
//!     let state = AppState::new(Arc::new(client), credentials, WebSettings::from_config(&config)?);
//!
//!     let _router = create_router(state);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

pub use crate::app::{
    drain, ClientConfig, DataSharingClient, FileError, FileEvent, FileSink, FileStream,
    LoggingSink, PlatformClient, PullRequest, RetrievalSummary, RetrievedFile, Session,
    SessionRequest, ShareResult,
};

pub use crate::auth::{ApplicationCredentials, PrivateKey};
pub use crate::config::AppConfig;
pub use crate::web::{create_router, AppState, WebSettings};

pub use crate::constants::{DEFAULT_PORT, USER_AGENT};

pub use std::sync::Arc;
