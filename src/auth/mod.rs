//! Application credentials for the data-sharing platform
//!
//! This module loads the application id, contract id and private key once at
//! startup and reports their status for the `credentials` command.
//!
//! # Examples
//!
//! ```rust,no_run
//! use private_share::auth::ApplicationCredentials;
//! use private_share::config::ApplicationConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = ApplicationCredentials::load(&ApplicationConfig::default())?;
//! println!("Loaded application {}", credentials.application_id);
//! # Ok(())
//! # }
//! ```

pub mod credentials;

// Re-export main public API
pub use credentials::{
    credentials_status, show_credentials_status, ApplicationCredentials, CredentialsStatus,
    PrivateKey,
};
