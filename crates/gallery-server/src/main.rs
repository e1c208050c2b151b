//! # Gallery Server
//!
//! Entry point for the gallery API: loads layered configuration, installs
//! the tracing subscriber and serves the REST router.

use gallery_config::ConfigLoader;
use gallery_core::{telemetry::init_telemetry, GalleryResult};
use gallery_server::{serve, startup};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The subscriber may not be installed when configuration fails.
        eprintln!("Application error: {e}");
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> GalleryResult<()> {
    let config_loader = ConfigLoader::from_default_location()?;
    let config = config_loader.get().await;

    init_telemetry(&config.observability.telemetry())?;

    startup::print_banner();
    info!("Starting Gallery API Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    serve(config).await
}
