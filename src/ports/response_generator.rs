//! ResponseGenerator port and the decision objects it renders.
//!
//! The engine never produces user-facing prose itself; it emits a typed
//! [`TurnDecision`] and hands it to the external text-generation service for
//! rendering. The template adapter doubles as the deterministic fallback when
//! that service times out or fails.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::empathy::AppraisalResult;
use crate::domain::relief::{Intervention, ReliefPhase, StressCategory};

/// Feedback question appended to every intervention offer.
pub const FEEDBACK_PROMPT: &str = "On a scale of 1 to 10, how helpful was this suggestion? \
     Please also share how it made you feel or any other thoughts you have about it.";

/// Question opening the stress-relief workflow.
pub const STRESS_CHECK_PROMPT: &str =
    "On a scale of 0 to 5, how stressed are you feeling right now?";

/// The engine's decision for one turn, rendered externally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnDecision {
    /// Empathetic-strategy path: respond using the sampled strategies.
    Appraisal { result: AppraisalResult },

    /// Open the relief workflow with the 0–5 stress check.
    StressCheck { category: StressCategory },

    /// Stress came back low; close warmly without an offer.
    NotStressed,

    /// Offer one concrete intervention and ask for the 0–10 rating.
    InterventionOffer {
        category: StressCategory,
        intervention: Intervention,
    },

    /// Feedback recorded; acknowledge and say goodbye.
    FeedbackAcknowledged { score: u8 },

    /// The last message did not parse; ask again without changing state.
    RePrompt { phase: ReliefPhase },
}

/// Generation errors.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Service unreachable or returned a failure.
    #[error("generator unavailable: {0}")]
    Unavailable(String),
}

/// Port for the external text-generation service.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Renders a decision into the outbound message text.
    async fn render(&self, decision: &TurnDecision) -> Result<String, GenerationError>;
}
