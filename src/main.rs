use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use chatrelay::plugin::{MODULE_DESCRIPTION, MODULE_NAME, MODULE_VERSION};
use chatrelay::{Config, EventServer, RelayPlugin};

#[tokio::main]
async fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    if let Err(e) = chatrelay::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        chatrelay::logging::init_console_only(&config.logging.level);
    }

    info!("{MODULE_NAME} {MODULE_VERSION} - {MODULE_DESCRIPTION}");

    let plugin = match RelayPlugin::from_config(&config) {
        Ok(plugin) => Arc::new(plugin),
        Err(e) => {
            error!("Failed to start relay: {e}");
            return ExitCode::FAILURE;
        }
    };

    let server = EventServer::new(&config.server, plugin);
    if let Err(e) = server.run().await {
        error!("Event ingress stopped: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
