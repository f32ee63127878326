//! Private Share web application
//!
//! Sends visitors to the data platform to approve a private share, then pulls,
//! decrypts and logs the shared files when they come back.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use private_share::cli::{handle_credentials, handle_init_config, handle_serve, Cli, Commands};
use private_share::config::AppConfig;
use private_share::errors::{AppError, Result};

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    // init-config must work even when the existing file is broken
    let config = match cli.command {
        Commands::InitConfig(_) => AppConfig::default(),
        _ => AppConfig::load(cli.global.config.clone()).await?,
    };

    init_logging(&cli, &config)?;

    info!("Private Share v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve(args) => {
            info!("Executing serve command");
            handle_serve(args, config).await
        }
        Commands::Credentials => handle_credentials(&config),
        Commands::InitConfig(args) => handle_init_config(args).await,
    }
}

/// Initialize logging from CLI flags, falling back to the configured level
fn init_logging(cli: &Cli, config: &AppConfig) -> Result<()> {
    let level = match cli.log_level() {
        Some(level) => level.to_string().to_lowercase(),
        None => config.logging.level.to_lowercase(),
    };

    let mut filter = EnvFilter::from_default_env();
    for target in [env!("CARGO_CRATE_NAME"), "tower_http"] {
        let directive = format!("{}={}", target, level)
            .parse()
            .map_err(|e| AppError::generic(format!("Invalid log level '{}': {}", level, e)))?;
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.verbose || cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
    Ok(())
}
