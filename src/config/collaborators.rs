//! Collaborator call configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Bounds on calls to the classifier and text-generation services
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorConfig {
    /// Per-call timeout in seconds; on expiry the turn continues with the
    /// neutral fallback decision
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CollaboratorConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate collaborator configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for CollaboratorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
