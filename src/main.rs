use tracing::{error, info, warn};

use corkboard::{BoardRegistry, Config};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_or_default("corkboard.toml") {
        Ok((config, None)) => config,
        Ok((config, Some(e))) => {
            eprintln!("Failed to load corkboard.toml: {e}");
            eprintln!("Using default configuration.");
            config
        }
        Err(e) => {
            eprintln!("Invalid environment override: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    if let Err(e) = corkboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        corkboard::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(1);
    }

    let mut registry = BoardRegistry::new();
    match registry.load(None).await {
        Ok(count) => info!(boards = count, "registry ready"),
        Err(e) => warn!("failed to load boards: {e}"),
    }

    info!("Corkboard - anonymous message board store");
    info!(
        hash_cost = config.security.hash_cost,
        page_size = config.board.page_size,
        "configuration applied"
    );
}
