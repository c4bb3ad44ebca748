//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `EMPATHY_COACH` prefix and nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use empathy_coach::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod content;
mod error;
mod server;

pub use ai::AiConfig;
pub use content::{ContentConfig, DEFAULT_FALLBACK_LINE};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Content policy (free limits, fallback line, persona template)
    #[serde(default)]
    pub content: ContentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `EMPATHY_COACH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `EMPATHY_COACH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `EMPATHY_COACH__AI__ANTHROPIC_API_KEY=...` -> `ai.anthropic_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EMPATHY_COACH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.content.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_without_api_key() {
        // Server and content defaults are fine; the AI section requires a key.
        let config = AppConfig::default();
        assert!(config.server.validate().is_ok());
        assert!(config.content.validate().is_ok());
        assert!(config.validate().is_err());
    }
}
