//! Relief session workflow.
//!
//! Sequences detection → stress check → intervention offer → feedback
//! collection → persistence for one user. Every read-modify-write runs under
//! that user's lock; turns for different users proceed in parallel. A parse
//! failure re-prompts without mutating state; a persistence failure fails the
//! turn before it is acknowledged.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::relief::{
    parse_helpfulness, parse_stress_check, ParsedRating, ReliefPhase, StressCategory,
};
use crate::domain::user::UserProfile;
use crate::ports::{ProfileRepository, TurnDecision};

use super::InterventionSelector;

/// Stress-check ratings below this value exit the workflow without an offer.
const MIN_STRESS_RATING: u8 = 2;

/// Drives one user's stress-relief session per inbound turn.
pub struct SessionWorkflow {
    repository: Arc<dyn ProfileRepository>,
    selector: InterventionSelector,
    favorite_threshold: f64,
    rng: Mutex<StdRng>,
    locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl SessionWorkflow {
    /// Creates a workflow with an entropy-seeded rng.
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        selector: InterventionSelector,
        favorite_threshold: f64,
    ) -> Self {
        Self::with_rng(
            repository,
            selector,
            favorite_threshold,
            StdRng::from_entropy(),
        )
    }

    /// Creates a workflow with an explicit rng, for deterministic tests.
    pub fn with_rng(
        repository: Arc<dyn ProfileRepository>,
        selector: InterventionSelector,
        favorite_threshold: f64,
        rng: StdRng,
    ) -> Self {
        Self {
            repository,
            selector,
            favorite_threshold,
            rng: Mutex::new(rng),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Enters the relief workflow after the classifier detected stress.
    ///
    /// From `Idle` this emits the 0–5 stress check. In any other phase the
    /// signal is ignored in favor of a re-prompt for the step the session is
    /// actually on.
    pub async fn begin_relief(
        &self,
        user_id: &UserId,
        stress: StressCategory,
    ) -> Result<TurnDecision, DomainError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_or_create(user_id).await?;
        if profile.phase() != ReliefPhase::Idle {
            tracing::debug!(user_id = %user_id, phase = ?profile.phase(),
                "relief already in progress, re-prompting");
            return Ok(TurnDecision::RePrompt {
                phase: profile.phase(),
            });
        }

        profile.begin_stress_check(stress, Timestamp::now())?;
        self.repository.save(&profile).await?;
        Ok(TurnDecision::StressCheck { category: stress })
    }

    /// Handles an inbound message for a user currently inside the workflow.
    ///
    /// Returns `None` when the user's session is idle; the message belongs
    /// to the empathetic-strategy path instead.
    pub async fn handle_message(
        &self,
        user_id: &UserId,
        message: &str,
    ) -> Result<Option<TurnDecision>, DomainError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_or_create(user_id).await?;
        match profile.phase() {
            ReliefPhase::Idle => Ok(None),
            ReliefPhase::Offered => {
                let decision = self.handle_stress_check(&mut profile, message).await?;
                Ok(Some(decision))
            }
            ReliefPhase::AwaitingFeedback => {
                let decision = self.handle_feedback(&mut profile, message).await?;
                Ok(Some(decision))
            }
            ReliefPhase::Closed => {
                // Session boundary: the closed session rolls back to idle and
                // the message is routed to the empathy path.
                profile.end_session(Timestamp::now());
                self.repository.save(&profile).await?;
                Ok(None)
            }
        }
    }

    /// Session boundary: returns the user's session phase to idle.
    pub async fn end_session(&self, user_id: &UserId) -> Result<(), DomainError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut profile = self.load_or_create(user_id).await?;
        profile.end_session(Timestamp::now());
        self.repository.save(&profile).await?;
        Ok(())
    }

    async fn handle_stress_check(
        &self,
        profile: &mut UserProfile,
        message: &str,
    ) -> Result<TurnDecision, DomainError> {
        let rating = match parse_stress_check(message) {
            ParsedRating::Score(rating) => rating,
            ParsedRating::NoScore => {
                tracing::debug!(user_id = %profile.user_id(),
                    "no stress rating detected, re-prompting");
                return Ok(TurnDecision::RePrompt {
                    phase: ReliefPhase::Offered,
                });
            }
        };

        let now = Timestamp::now();
        if rating < MIN_STRESS_RATING {
            // Not stressed enough for an intervention; no bandit arm is
            // consumed.
            profile.decline_relief(now)?;
            self.repository.save(profile).await?;
            return Ok(TurnDecision::NotStressed);
        }

        let stress = profile.active_stress().unwrap_or(StressCategory::General);
        let intervention = {
            let mut rng = self.rng.lock().await;
            self.selector.choose(stress, profile, now, &mut *rng)?
        };
        self.repository.save(profile).await?;
        Ok(TurnDecision::InterventionOffer {
            category: stress,
            intervention,
        })
    }

    async fn handle_feedback(
        &self,
        profile: &mut UserProfile,
        message: &str,
    ) -> Result<TurnDecision, DomainError> {
        let score = match parse_helpfulness(message) {
            ParsedRating::Score(score) => score,
            ParsedRating::NoScore => {
                tracing::debug!(user_id = %profile.user_id(),
                    "no helpfulness rating detected, re-prompting");
                return Ok(TurnDecision::RePrompt {
                    phase: ReliefPhase::AwaitingFeedback,
                });
            }
        };

        profile.complete_feedback(
            score,
            Some(message.to_string()),
            None,
            self.favorite_threshold,
            Timestamp::now(),
        )?;
        self.repository.save(profile).await?;

        tracing::info!(user_id = %profile.user_id(), score, "feedback recorded");
        Ok(TurnDecision::FeedbackAcknowledged { score })
    }

    async fn load_or_create(&self, user_id: &UserId) -> Result<UserProfile, DomainError> {
        match self.repository.find(user_id).await? {
            Some(profile) => Ok(profile),
            None => Ok(UserProfile::new(user_id.clone(), Timestamp::now())),
        }
    }

    async fn user_lock(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
