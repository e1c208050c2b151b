//! Configuration validation.
//!
//! Every section is checked and all problems are reported together so an
//! operator can fix a broken deployment in one pass.

use crate::{AppConfig, CatalogConfig, DatabaseConfig, ObservabilityConfig, SecurityConfig, ServerConfig};
use thiserror::Error;
use url::Url;

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("JWT secret is too short: {actual} characters (minimum {minimum})")]
    JwtSecretTooShort { actual: usize, minimum: usize },

    #[error("JWT secret must be changed from its default value in production")]
    DefaultJwtSecret,

    #[error("Invalid port for {name}: {value}")]
    InvalidPort { name: String, value: u16 },

    #[error("Invalid pool size: min ({min}) cannot be greater than max ({max})")]
    InvalidPoolSize { min: u32, max: u32 },

    #[error("Invalid {url_type} URL: {message}")]
    InvalidUrl { url_type: String, message: String },

    #[error("Timeout '{name}' must be positive, got {value}")]
    NonPositiveTimeout { name: String, value: u64 },

    #[error("Invalid password hash cost: {value} (must be between {minimum} and {maximum})")]
    InvalidHashCost { value: u32, minimum: u32, maximum: u32 },

    #[error("Invalid log level: '{value}' (valid: trace, debug, info, warn, error)")]
    InvalidLogLevel { value: String },

    #[error("Invalid log format: '{value}' (valid: json, pretty)")]
    InvalidLogFormat { value: String },

    #[error("Catalog client credentials are required in production")]
    MissingCatalogCredentials,

    #[error("Catalog page size must be between 1 and {maximum}, got {value}")]
    InvalidPageSize { value: u32, maximum: u32 },

    #[error("Catalog refresh margin ({margin}s) must be shorter than the default token lifetime ({lifetime}s)")]
    RefreshMarginTooLarge { margin: u64, lifetime: u64 },

    #[error("Session cookie name cannot be empty")]
    EmptyCookieName,
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Minimum JWT secret length in production.
    const MIN_JWT_SECRET_LENGTH: usize = 32;
    /// Minimum Argon2 memory cost (MiB).
    const MIN_HASH_COST: u32 = 1;
    /// Maximum Argon2 memory cost (MiB).
    const MAX_HASH_COST: u32 = 64;
    /// Largest page size the catalog accepts.
    const MAX_PAGE_SIZE: u32 = 100;
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];
    /// Valid log formats.
    const VALID_LOG_FORMATS: &'static [&'static str] = &["json", "pretty"];

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();
        let production = config.app.is_production();

        Self::validate_server(&config.server, &mut errors);
        Self::validate_database(&config.database, &mut errors);
        Self::validate_security(&config.security, production, &mut errors);
        Self::validate_catalog(&config.catalog, production, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }

        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database(config: &DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.url.is_empty() {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !config.url.starts_with("sqlite:") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL must start with sqlite:".to_string(),
            });
        }

        if config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }

        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_security(config: &SecurityConfig, production: bool, errors: &mut Vec<ConfigValidationError>) {
        if production {
            if config.jwt_secret == SecurityConfig::default().jwt_secret {
                errors.push(ConfigValidationError::DefaultJwtSecret);
            } else if config.jwt_secret.len() < Self::MIN_JWT_SECRET_LENGTH {
                errors.push(ConfigValidationError::JwtSecretTooShort {
                    actual: config.jwt_secret.len(),
                    minimum: Self::MIN_JWT_SECRET_LENGTH,
                });
            }
        }

        if config.jwt_expiration_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "security.jwt_expiration_secs".to_string(),
                value: 0,
            });
        }

        if config.session_cookie_name.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyCookieName);
        }

        if !(Self::MIN_HASH_COST..=Self::MAX_HASH_COST).contains(&config.password_hash_cost) {
            errors.push(ConfigValidationError::InvalidHashCost {
                value: config.password_hash_cost,
                minimum: Self::MIN_HASH_COST,
                maximum: Self::MAX_HASH_COST,
            });
        }
    }

    fn validate_catalog(config: &CatalogConfig, production: bool, errors: &mut Vec<ConfigValidationError>) {
        match Url::parse(&config.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "catalog.base_url".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "catalog.base_url".to_string(),
                message: e.to_string(),
            }),
        }

        if production && !config.has_credentials() {
            errors.push(ConfigValidationError::MissingCatalogCredentials);
        }

        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "catalog.request_timeout_secs".to_string(),
                value: 0,
            });
        }

        if config.default_token_lifetime_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "catalog.default_token_lifetime_secs".to_string(),
                value: 0,
            });
        } else if config.refresh_margin_secs >= config.default_token_lifetime_secs {
            errors.push(ConfigValidationError::RefreshMarginTooLarge {
                margin: config.refresh_margin_secs,
                lifetime: config.default_token_lifetime_secs,
            });
        }

        if config.page_size == 0 || config.page_size > Self::MAX_PAGE_SIZE {
            errors.push(ConfigValidationError::InvalidPageSize {
                value: config.page_size,
                maximum: Self::MAX_PAGE_SIZE,
            });
        }
    }

    fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.log_level.clone(),
            });
        }

        let format = config.log_format.to_lowercase();
        if !Self::VALID_LOG_FORMATS.contains(&format.as_str()) {
            errors.push(ConfigValidationError::InvalidLogFormat {
                value: config.log_format.clone(),
            });
        }
    }
}
