//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use gallery_core::GalleryError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Variables understood by earlier deployments of the service, mapped to
/// their configuration key and the prefixed variable that supersedes them.
/// `NODE_ENV` is handled by [`resolve_environment`].
const LEGACY_ALIASES: &[(&str, &str, &str)] = &[
    ("PORT", "server.port", "GALLERY_SERVER__PORT"),
    ("JWT_SECRET", "security.jwt_secret", "GALLERY_SECURITY__JWT_SECRET"),
    ("ARTSY_CLIENT_ID", "catalog.client_id", "GALLERY_CATALOG__CLIENT_ID"),
    ("ARTSY_CLIENT_SECRET", "catalog.client_secret", "GALLERY_CATALOG__CLIENT_SECRET"),
    ("DATABASE_URL", "database.url", "GALLERY_DATABASE__URL"),
];

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `GALLERY_` prefix (`GALLERY_SERVER__PORT`)
    /// 5. Legacy variables (`PORT`, `JWT_SECRET`, `ARTSY_CLIENT_ID`, ...) when
    ///    the prefixed equivalent is unset
    pub fn new(config_dir: impl Into<String>) -> Result<Self, GalleryError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, GalleryError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), GalleryError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, GalleryError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let lookup = |name: &str| std::env::var(name).ok();
        let environment = resolve_environment(lookup);
        Self::load_from(config_dir, &environment, lookup)
    }

    /// Builds the configuration for `environment`, reading process variables
    /// through `lookup` for the legacy aliases.
    pub fn load_from<F>(config_dir: &str, environment: &str, lookup: F) -> Result<AppConfig, GalleryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder()
            .set_default("app.environment", environment)
            .map_err(config_error_to_gallery_error)?;

        for name in ["default", environment, "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config file: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("GALLERY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        for (key, value) in legacy_overrides(&lookup) {
            debug!("Applying legacy override for {}", key);
            builder = builder
                .set_override(key, value)
                .map_err(config_error_to_gallery_error)?;
        }

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize::<AppConfig>())
            .map_err(config_error_to_gallery_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), GalleryError> {
        ConfigValidator::validate(config).map_err(|errors| {
            let message = errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
            GalleryError::Configuration(message)
        })
    }

    /// Gets a specific configuration value by key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Picks the active environment: `GALLERY_ENVIRONMENT`, then `NODE_ENV`,
/// then `development`.
pub fn resolve_environment<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("GALLERY_ENVIRONMENT")
        .or_else(|| lookup("NODE_ENV"))
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "development".to_string())
}

/// Returns the `(key, value)` overrides contributed by legacy variables.
pub fn legacy_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    LEGACY_ALIASES
        .iter()
        .filter(|(_, _, prefixed)| lookup(prefixed).is_none())
        .filter_map(|(legacy, key, _)| lookup(legacy).map(|value| (*key, value)))
        .collect()
}

fn config_error_to_gallery_error(err: ConfigError) -> GalleryError {
    GalleryError::Configuration(err.to_string())
}
