//! Interaction history records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InteractionId, Timestamp};
use crate::domain::relief::{InterventionCategory, StressCategory};

/// One completed intervention offer with its feedback.
///
/// Records are append-only; the history is never rewritten or pruned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Correlates the offer with its feedback in logs.
    pub id: InteractionId,
    /// When the feedback arrived.
    pub timestamp: Timestamp,
    /// Stress category that triggered the offer.
    pub category: StressCategory,
    /// Intervention category of the offered item.
    pub intervention_category: InterventionCategory,
    /// Name of the offered item.
    pub intervention_name: String,
    /// Helpfulness rating, 0–10.
    pub feedback_score: u8,
    /// The user's free-text feedback, when any was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_message: Option<String>,
    /// Generated one-line summary of the interaction, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}
