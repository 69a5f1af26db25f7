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
    #[error("Exploration epsilon must be within [0, 1]")]
    InvalidEpsilon,

    #[error("Item exploration epsilon must be within [0, 1]")]
    InvalidItemEpsilon,

    #[error("Favorite threshold must be within the 0-10 feedback domain")]
    InvalidFavoriteThreshold,

    #[error("Collaborator timeout must be greater than zero")]
    InvalidTimeout,

    #[error("Profile directory must not be empty")]
    EmptyProfileDir,
}
