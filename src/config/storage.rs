//! Profile storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Durable profile store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the per-user profile records
    #[serde(default = "default_profile_dir")]
    pub profile_dir: String,
}

impl StorageConfig {
    /// Get the profile directory as a path
    pub fn profile_path(&self) -> PathBuf {
        PathBuf::from(&self.profile_dir)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.profile_dir.trim().is_empty() {
            return Err(ValidationError::EmptyProfileDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            profile_dir: default_profile_dir(),
        }
    }
}

fn default_profile_dir() -> String {
    "./data/profiles".to_string()
}
