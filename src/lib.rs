//! Private Share Library
//!
//! Requests a private data share from a personal-data platform and retrieves
//! the shared files once the user approves it. The web front end in [`web`]
//! drives the flow; [`app`] holds the platform client and file retrieval.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;
pub mod web;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
