//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("AI timeout must be between 1 and 120 seconds")]
    InvalidAiTimeout,

    #[error("No AI provider configured")]
    NoAiProviderConfigured,

    #[error("Fallback partner line cannot be empty")]
    EmptyFallbackLine,

    #[error("Persona template is missing placeholder: {0}")]
    MissingTemplatePlaceholder(&'static str),
}
