//! Server startup utilities.

use gallery_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   ______      ____
  / ____/___ _/ / /__  _______  __
 / / __/ __ `/ / / _ \/ ___/ / / /
/ /_/ / /_/ / / /  __/ /  / /_/ /
\____/\__,_/_/_/\___/_/   \__, /
                         /____/
    "#);
}

/// Prints where the server can be reached.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let base = format!("http://{}", config.server.addr());

    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("REST API:    {}/api", base);
    info!("Health:      {}/health", base);
    info!("API Docs:    {}/swagger-ui", base);
    info!("Catalog:     {}", config.catalog.base_url);
    info!("{}", separator);
}
