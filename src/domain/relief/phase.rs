//! Relief session phase.
//!
//! Drives which parser and handler the workflow applies to the next inbound
//! message of a user's stress-relief session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Phase of a user's stress-relief session.
///
/// `Idle → Offered → AwaitingFeedback → Closed → Idle`. The `Offered` phase
/// covers the 0–5 stress check; `AwaitingFeedback` covers the 0–10
/// helpfulness rating for the pending intervention. Re-prompts never change
/// phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefPhase {
    #[default]
    Idle,
    Offered,
    AwaitingFeedback,
    Closed,
}

impl StateMachine for ReliefPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReliefPhase::*;
        matches!(
            (self, target),
            (Idle, Offered)
                | (Offered, AwaitingFeedback)
                | (Offered, Idle)
                | (AwaitingFeedback, Closed)
                | (Closed, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReliefPhase::*;
        match self {
            Idle => vec![Offered],
            Offered => vec![AwaitingFeedback, Idle],
            AwaitingFeedback => vec![Closed],
            Closed => vec![Idle],
        }
    }
}
