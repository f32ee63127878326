//! Command-line argument parsing for Private Share
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Private Share - request and receive a private data share
#[derive(Parser, Debug)]
#[command(
    name = "private_share",
    version,
    about = "Request a private data share and receive the decrypted files",
    long_about = "A small web application that sends users to a personal-data platform to approve a private share,
then pulls, decrypts and logs the shared files when they return."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (trace level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web server
    Serve(ServeArgs),

    /// Show application credential status
    Credentials,

    /// Write a default configuration file
    InitConfig(InitConfigArgs),
}

/// Arguments for the serve command
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listening port (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address (overrides config)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,
}

/// Arguments for the init-config command
#[derive(Args, Debug, Clone)]
pub struct InitConfigArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(value_name = "FILE")]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Logging level requested on the command line, if any
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.global.quiet {
            Some(tracing::Level::ERROR)
        } else if self.global.very_verbose {
            Some(tracing::Level::TRACE)
        } else if self.global.verbose {
            Some(tracing::Level::DEBUG)
        } else {
            None
        }
    }
}
