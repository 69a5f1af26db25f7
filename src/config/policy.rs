//! Selection-policy configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Tunables of the two stochastic selection policies
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Bandit exploration probability after cold start
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Probability of exploring an untried item within the chosen category
    #[serde(default = "default_item_epsilon")]
    pub item_epsilon: f64,

    /// Rolling score at or above which a category becomes a favorite
    #[serde(default = "default_favorite_threshold")]
    pub favorite_threshold: f64,
}

impl PolicyConfig {
    /// Validate policy configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ValidationError::InvalidEpsilon);
        }
        if !(0.0..=1.0).contains(&self.item_epsilon) {
            return Err(ValidationError::InvalidItemEpsilon);
        }
        if !(0.0..=10.0).contains(&self.favorite_threshold) {
            return Err(ValidationError::InvalidFavoriteThreshold);
        }
        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            item_epsilon: default_item_epsilon(),
            favorite_threshold: default_favorite_threshold(),
        }
    }
}

fn default_epsilon() -> f64 {
    crate::domain::relief::DEFAULT_EPSILON
}

fn default_item_epsilon() -> f64 {
    crate::application::DEFAULT_ITEM_EPSILON
}

fn default_favorite_threshold() -> f64 {
    crate::domain::user::DEFAULT_FAVORITE_THRESHOLD
}
