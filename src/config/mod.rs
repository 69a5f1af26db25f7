//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `STRIDE_COACH` prefix and nested values use double underscores as
//! separators, e.g. `STRIDE_COACH__POLICY__EPSILON=0.1`.

mod collaborators;
mod error;
mod policy;
mod storage;

pub use collaborators::CollaboratorConfig;
pub use error::{ConfigError, ValidationError};
pub use policy::PolicyConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has working defaults; the engine runs without any
/// environment at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Durable profile store
    #[serde(default)]
    pub storage: StorageConfig,

    /// Stochastic selection policies
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Collaborator call bounds
    #[serde(default)]
    pub collaborators: CollaboratorConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads a `.env` file if present (for development)
    /// 2. Reads environment variables with the `STRIDE_COACH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("STRIDE_COACH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        Ok(config)
    }

    /// Validate every configuration section
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.policy.validate()?;
        self.collaborators.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_policy_values_are_stable() {
        let config = AppConfig::default();
        assert!((config.policy.epsilon - 0.2).abs() < 1e-12);
        assert!((config.policy.item_epsilon - 0.3).abs() < 1e-12);
        assert!((config.policy.favorite_threshold - 7.5).abs() < 1e-12);
        assert_eq!(config.collaborators.timeout_secs, 30);
    }
}
