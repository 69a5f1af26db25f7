//! Stress categories.
//!
//! The classified kind of stress in a user message, produced by the external
//! classifier. Closed set; unrecognized classifier output is handled at the
//! parse boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Classified kind of stress in a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressCategory {
    Anxiety,
    Sadness,
    Anger,
    Overwhelm,
    General,
}

impl StressCategory {
    /// All categories the classifier may emit.
    pub const ALL: [StressCategory; 5] = [
        StressCategory::Anxiety,
        StressCategory::Sadness,
        StressCategory::Anger,
        StressCategory::Overwhelm,
        StressCategory::General,
    ];

    /// Returns the classifier wire label.
    pub fn label(&self) -> &'static str {
        match self {
            StressCategory::Anxiety => "anxiety",
            StressCategory::Sadness => "sadness",
            StressCategory::Anger => "anger",
            StressCategory::Overwhelm => "overwhelm",
            StressCategory::General => "general",
        }
    }

    /// Parses a classifier label.
    ///
    /// # Errors
    ///
    /// `UnknownStressCategory` if the label is outside the set. Callers fall
    /// back to the default preferred intervention categories.
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == label)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UnknownStressCategory,
                    format!("'{}' is not a known stress category", label),
                )
            })
    }
}

impl fmt::Display for StressCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for c in StressCategory::ALL {
            assert_eq!(StressCategory::from_label(c.label()).unwrap(), c);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = StressCategory::from_label("boredom").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownStressCategory);
    }
}
