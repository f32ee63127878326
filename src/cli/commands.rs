//! Command handlers for the Private Share CLI

use std::sync::Arc;

use tracing::info;

use crate::app::PlatformClient;
use crate::auth::{show_credentials_status, ApplicationCredentials};
use crate::cli::args::{InitConfigArgs, ServeArgs};
use crate::cli::startup;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::web::{self, AppState, WebSettings};

/// Run the web server until Ctrl-C
pub async fn handle_serve(args: ServeArgs, mut config: AppConfig) -> Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    config.validate()?;

    let credentials = ApplicationCredentials::load(&config.application)?;
    let client = PlatformClient::with_config(config.client.to_runtime_config())?;
    let settings = WebSettings::from_config(&config)?;
    if settings.verify_session {
        info!("Returning session ids are checked against issued sessions");
    }

    let state = AppState::new(Arc::new(client), credentials, settings);
    let listener = web::bind(config.socket_addr()?).await?;
    startup::announce(listener.local_addr()?);

    web::serve(listener, state).await?;
    Ok(())
}

/// Print credential status
pub fn handle_credentials(config: &AppConfig) -> Result<()> {
    show_credentials_status(&config.application);
    Ok(())
}

/// Write the default configuration file
pub async fn handle_init_config(args: InitConfigArgs) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => AppConfig::default_config_path()?,
    };

    AppConfig::write_default(&path, args.force).await?;
    println!("Created configuration file:");
    println!("   {}", path.display());
    println!("   Set [application].app_id and private_key_path before running 'serve'.");
    Ok(())
}
