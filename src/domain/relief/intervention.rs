//! Intervention categories and concrete interventions.
//!
//! The five intervention categories are the arms of the per-user bandit; each
//! concrete intervention belongs to exactly one category.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One arm of the intervention bandit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionCategory {
    Relaxation,
    Reappraisal,
    PositiveExperiences,
    Gratitude,
    ResourceBuffers,
}

impl InterventionCategory {
    /// All categories, in arm-index order.
    pub const ALL: [InterventionCategory; 5] = [
        InterventionCategory::Relaxation,
        InterventionCategory::Reappraisal,
        InterventionCategory::PositiveExperiences,
        InterventionCategory::Gratitude,
        InterventionCategory::ResourceBuffers,
    ];

    /// Returns this category's bandit arm index.
    pub fn arm_index(&self) -> usize {
        match self {
            InterventionCategory::Relaxation => 0,
            InterventionCategory::Reappraisal => 1,
            InterventionCategory::PositiveExperiences => 2,
            InterventionCategory::Gratitude => 3,
            InterventionCategory::ResourceBuffers => 4,
        }
    }

    /// Returns the category at an arm index, if in range.
    pub fn from_arm_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the persisted label.
    pub fn label(&self) -> &'static str {
        match self {
            InterventionCategory::Relaxation => "relaxation",
            InterventionCategory::Reappraisal => "reappraisal",
            InterventionCategory::PositiveExperiences => "positive_experiences",
            InterventionCategory::Gratitude => "gratitude",
            InterventionCategory::ResourceBuffers => "resource_buffers",
        }
    }
}

impl fmt::Display for InterventionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A concrete stress-relief intervention offered to the user.
///
/// Catalog entries are static; only the item name is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Intervention {
    /// Display name, unique within the catalog.
    pub name: &'static str,
    /// One-line description for prompt assembly.
    pub description: &'static str,
    /// External link to the exercise material.
    pub link: &'static str,
    /// Owning category.
    pub category: InterventionCategory,
}
