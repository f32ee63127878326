//! Command-line interface components
//!
//! This module contains CLI-specific code for the Private Share application,
//! including argument parsing, command handlers and startup reporting.

pub mod args;
pub mod commands;
pub mod startup;

pub use args::{Cli, Commands, GlobalArgs, InitConfigArgs, ServeArgs};
pub use commands::{handle_credentials, handle_init_config, handle_serve};
