//! UserProfile aggregate root.
//!
//! One durable record per user: the bandit statistics, the append-only
//! interaction history, the rolling per-category score averages derived from
//! it, the favorites set, the relief session phase, and the in-flight offer.
//! All mutation happens through this aggregate so a single write persists a
//! consistent snapshot.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::InteractionRecord;
use crate::domain::foundation::{
    DomainError, ErrorCode, InteractionId, StateMachine, Timestamp, UserId,
};
use crate::domain::relief::{BanditState, InterventionCategory, ReliefPhase, StressCategory};

/// Score at or above which an intervention category becomes a favorite.
pub const DEFAULT_FAVORITE_THRESHOLD: f64 = 7.5;

/// An intervention offered but not yet rated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOffer {
    /// When the offer went out.
    pub offered_at: Timestamp,
    /// Stress category that triggered the offer.
    pub stress_category: StressCategory,
    /// Bandit arm the offer consumed.
    pub arm: usize,
    /// Intervention category of the offered item.
    pub category: InterventionCategory,
    /// Name of the offered item.
    pub intervention_name: String,
}

/// Per-user durable state. Created lazily on first contact, never deleted.
///
/// # Invariants
///
/// - `favorites == { c : scores[c] >= threshold }` after every feedback
/// - `scores[c]` is the mean feedback score over history records of `c`
/// - a `PendingOffer` exists exactly while the phase is `AwaitingFeedback`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    phase: ReliefPhase,
    bandit_state: BanditState,
    scores: BTreeMap<InterventionCategory, f64>,
    favorites: BTreeSet<InterventionCategory>,
    interaction_history: Vec<InteractionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pending: Option<PendingOffer>,
    /// Stress category detected when the current session entered the relief
    /// workflow; cleared when the session leaves it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_stress: Option<StressCategory>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl UserProfile {
    /// Creates a zeroed profile for a first-contact user.
    pub fn new(user_id: UserId, now: Timestamp) -> Self {
        Self {
            user_id,
            phase: ReliefPhase::Idle,
            bandit_state: BanditState::default(),
            scores: BTreeMap::new(),
            favorites: BTreeSet::new(),
            interaction_history: Vec::new(),
            pending: None,
            active_stress: None,
            created_at: now,
            updated_at: now,
        }
    }

    // Accessors

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn phase(&self) -> ReliefPhase {
        self.phase
    }

    pub fn bandit(&self) -> &BanditState {
        &self.bandit_state
    }

    pub fn scores(&self) -> &BTreeMap<InterventionCategory, f64> {
        &self.scores
    }

    pub fn favorites(&self) -> &BTreeSet<InterventionCategory> {
        &self.favorites
    }

    pub fn history(&self) -> &[InteractionRecord] {
        &self.interaction_history
    }

    pub fn pending(&self) -> Option<&PendingOffer> {
        self.pending.as_ref()
    }

    pub fn active_stress(&self) -> Option<StressCategory> {
        self.active_stress
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Names of interventions already offered to this user, pending included.
    pub fn tried_intervention_names(&self) -> BTreeSet<&str> {
        let mut names: BTreeSet<&str> = self
            .interaction_history
            .iter()
            .map(|r| r.intervention_name.as_str())
            .collect();
        if let Some(pending) = &self.pending {
            names.insert(pending.intervention_name.as_str());
        }
        names
    }

    /// The user's highest-rated past intervention within one category.
    pub fn best_scored_in(&self, category: InterventionCategory) -> Option<&InteractionRecord> {
        self.interaction_history
            .iter()
            .filter(|r| r.intervention_category == category)
            .max_by_key(|r| r.feedback_score)
    }

    // Mutation

    /// Moves the session into the stress-check phase.
    pub fn begin_stress_check(
        &mut self,
        stress: StressCategory,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        self.phase = self.phase.transition_to(ReliefPhase::Offered)?;
        self.active_stress = Some(stress);
        self.updated_at = now;
        Ok(())
    }

    /// Records that the stress check came back low and no offer was made.
    pub fn decline_relief(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.phase = self.phase.transition_to(ReliefPhase::Idle)?;
        self.active_stress = None;
        self.updated_at = now;
        Ok(())
    }

    /// Stores the in-flight offer and advances to feedback collection.
    pub fn begin_offer(&mut self, offer: PendingOffer, now: Timestamp) -> Result<(), DomainError> {
        self.phase = self.phase.transition_to(ReliefPhase::AwaitingFeedback)?;
        self.pending = Some(offer);
        self.updated_at = now;
        Ok(())
    }

    /// Completes the pending offer with the user's helpfulness rating.
    ///
    /// Updates the bandit with the reward, appends the interaction record,
    /// recomputes the rolling mean for the offered category and rebuilds the
    /// favorites set against `threshold`, then closes the session phase.
    ///
    /// # Errors
    ///
    /// `NoPendingOffer` when no offer is awaiting feedback; out-of-range when
    /// the score leaves the 0–10 domain.
    pub fn complete_feedback(
        &mut self,
        score: u8,
        feedback_message: Option<String>,
        summary: Option<String>,
        threshold: f64,
        now: Timestamp,
    ) -> Result<&InteractionRecord, DomainError> {
        let phase = self.phase.transition_to(ReliefPhase::Closed)?;
        let arm = self
            .pending
            .as_ref()
            .map(|offer| offer.arm)
            .ok_or_else(|| DomainError::new(ErrorCode::NoPendingOffer, "No offer awaiting feedback"))?;

        // Validates the reward domain before any state is touched.
        self.bandit_state.update(arm, f64::from(score))?;
        let offer = self.pending.take().expect("pending checked above");

        self.interaction_history.push(InteractionRecord {
            id: InteractionId::new(),
            timestamp: now,
            category: offer.stress_category,
            intervention_category: offer.category,
            intervention_name: offer.intervention_name,
            feedback_score: score,
            feedback_message,
            summary,
        });
        self.update_rolling_score(offer.category, f64::from(score), threshold);

        self.phase = phase;
        self.active_stress = None;
        self.updated_at = now;
        Ok(self
            .interaction_history
            .last()
            .expect("record pushed above"))
    }

    /// Session boundary: returns the phase to idle and drops any stale offer.
    pub fn end_session(&mut self, now: Timestamp) {
        self.phase = ReliefPhase::Idle;
        self.pending = None;
        self.active_stress = None;
        self.updated_at = now;
    }

    fn update_rolling_score(
        &mut self,
        category: InterventionCategory,
        score: f64,
        threshold: f64,
    ) {
        let count = self
            .interaction_history
            .iter()
            .filter(|r| r.intervention_category == category)
            .count() as f64;
        let entry = self.scores.entry(category).or_insert(0.0);
        *entry = (*entry * (count - 1.0) + score) / count;

        self.favorites = self
            .scores
            .iter()
            .filter(|(_, s)| **s >= threshold)
            .map(|(c, _)| *c)
            .collect();
    }
}
