//! Intervention selection.
//!
//! Composes the bandit policy with the static catalog and the user's profile:
//! the bandit (scoped to the categories preferred for the detected stress)
//! picks the category, an epsilon-greedy item rule picks the concrete
//! intervention inside it, and the resulting offer is recorded on the profile.

use rand::Rng;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::relief::{
    catalog, Intervention, InterventionCategory, StressCategory, UcbPolicy,
};
use crate::domain::user::{PendingOffer, UserProfile};

/// Default probability of exploring an untried item instead of exploiting.
pub const DEFAULT_ITEM_EPSILON: f64 = 0.3;

/// Picks one concrete intervention per turn.
#[derive(Debug, Clone, Copy)]
pub struct InterventionSelector {
    policy: UcbPolicy,
    item_epsilon: f64,
}

impl InterventionSelector {
    /// Creates a selector from the bandit policy and item-exploration rate.
    pub fn new(policy: UcbPolicy, item_epsilon: f64) -> Self {
        Self {
            policy,
            item_epsilon,
        }
    }

    /// Chooses an intervention for the detected stress category and records
    /// the pending offer on the profile.
    ///
    /// The bandit runs over the arms of the stress category's preferred
    /// intervention categories only; the global state is shared, so what the
    /// bandit learns under one stress category carries over to another that
    /// prefers the same arm.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        stress: StressCategory,
        profile: &mut UserProfile,
        now: Timestamp,
        rng: &mut R,
    ) -> Result<Intervention, DomainError> {
        let preferred = catalog::preferred_categories(stress);
        let arms: Vec<usize> = preferred.iter().map(|c| c.arm_index()).collect();

        let arm = self.policy.select_among(profile.bandit(), &arms, rng);
        let category = InterventionCategory::from_arm_index(arm).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, format!("arm {} out of range", arm))
        })?;

        let intervention = self.pick_item(category, profile, rng);

        profile.begin_offer(
            PendingOffer {
                offered_at: now,
                stress_category: stress,
                arm,
                category,
                intervention_name: intervention.name.to_string(),
            },
            now,
        )?;

        tracing::debug!(
            stress = %stress,
            category = %category,
            intervention = intervention.name,
            "intervention selected"
        );
        Ok(intervention)
    }

    /// Item rule inside the chosen category: explore an untried item with
    /// probability `item_epsilon` (always, while the user has no history),
    /// otherwise exploit the user's highest-scored item of the category.
    fn pick_item<R: Rng + ?Sized>(
        &self,
        category: InterventionCategory,
        profile: &UserProfile,
        rng: &mut R,
    ) -> Intervention {
        let items = catalog::interventions(category);
        let explore = profile.history().is_empty() || rng.gen::<f64>() < self.item_epsilon;

        if !explore {
            if let Some(best) = profile.best_scored_in(category) {
                if let Some(item) = items.iter().find(|i| i.name == best.intervention_name) {
                    return *item;
                }
            }
            // Category has no history yet; fall through to exploration.
        }

        let tried = profile.tried_intervention_names();
        let untried: Vec<&Intervention> = items
            .iter()
            .filter(|i| !tried.contains(i.name))
            .collect();

        if untried.is_empty() {
            // Everything in the category was tried at least once.
            tracing::debug!(category = %category, "catalog exhausted, repeating an item");
            items[rng.gen_range(0..items.len())]
        } else {
            *untried[rng.gen_range(0..untried.len())]
        }
    }
}

impl Default for InterventionSelector {
    fn default() -> Self {
        Self::new(UcbPolicy::default(), DEFAULT_ITEM_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::relief::ReliefPhase;
    use crate::domain::user::DEFAULT_FAVORITE_THRESHOLD;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile() -> UserProfile {
        let mut p = UserProfile::new(
            UserId::new("user-1").unwrap(),
            Timestamp::from_unix_secs(1_704_326_400),
        );
        p.begin_stress_check(StressCategory::Anxiety, Timestamp::now())
            .unwrap();
        p
    }

    fn complete(profile: &mut UserProfile, score: u8) {
        let now = Timestamp::now();
        profile
            .complete_feedback(score, None, None, DEFAULT_FAVORITE_THRESHOLD, now)
            .unwrap();
        profile.end_session(now);
        profile
            .begin_stress_check(StressCategory::Anxiety, now)
            .unwrap();
    }

    #[test]
    fn chosen_category_stays_within_the_preferred_set() {
        let selector = InterventionSelector::default();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let mut p = profile();
            let intervention = selector
                .choose(StressCategory::Sadness, &mut p, Timestamp::now(), &mut rng)
                .unwrap();
            assert!(catalog::preferred_categories(StressCategory::Sadness)
                .contains(&intervention.category));
        }
    }

    #[test]
    fn choose_records_the_pending_offer_and_advances_the_phase() {
        let selector = InterventionSelector::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut p = profile();

        let intervention = selector
            .choose(StressCategory::Anger, &mut p, Timestamp::now(), &mut rng)
            .unwrap();

        assert_eq!(p.phase(), ReliefPhase::AwaitingFeedback);
        let pending = p.pending().unwrap();
        assert_eq!(pending.intervention_name, intervention.name);
        assert_eq!(pending.category, intervention.category);
        assert_eq!(pending.arm, intervention.category.arm_index());
        assert_eq!(pending.stress_category, StressCategory::Anger);
    }

    #[test]
    fn first_offer_always_explores_an_untried_item() {
        // No history: exploration is unconditional regardless of epsilon.
        let selector = InterventionSelector::new(UcbPolicy::new(0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = profile();

        let intervention = selector
            .choose(StressCategory::Anxiety, &mut p, Timestamp::now(), &mut rng)
            .unwrap();
        assert!(!intervention.name.is_empty());
    }

    #[test]
    fn exploitation_prefers_the_highest_scored_item_of_the_category() {
        // epsilon 0 on both levels: category by UCB, item by best score.
        let selector = InterventionSelector::new(UcbPolicy::new(0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(4);
        let mut p = profile();

        // Seed history: every anxiety-preferred arm tried, relaxation rated
        // highest via "Box Breathing".
        let first = selector
            .choose(StressCategory::Anxiety, &mut p, Timestamp::now(), &mut rng)
            .unwrap();
        let first_score = if first.category == InterventionCategory::Relaxation {
            9
        } else {
            2
        };
        complete(&mut p, first_score);

        let second = selector
            .choose(StressCategory::Anxiety, &mut p, Timestamp::now(), &mut rng)
            .unwrap();
        let second_score = if second.category == InterventionCategory::Relaxation {
            9
        } else {
            2
        };
        complete(&mut p, second_score);

        // Both preferred arms now tried; relaxation carries the higher mean,
        // so with epsilon 0 the bandit exploits it and the item rule returns
        // its highest-scored recorded item.
        let third = selector
            .choose(StressCategory::Anxiety, &mut p, Timestamp::now(), &mut rng)
            .unwrap();
        assert_eq!(third.category, InterventionCategory::Relaxation);
        let best = p
            .best_scored_in(InterventionCategory::Relaxation)
            .unwrap()
            .intervention_name
            .clone();
        assert_eq!(third.name, best);
    }

    #[test]
    fn exhausted_category_falls_back_to_repeating_items() {
        // Force permanent exploration over the single-item reappraisal
        // category: once tried, the untried pool is empty.
        let selector = InterventionSelector::new(UcbPolicy::new(0.0), 1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = profile();

        // Anger prefers reappraisal then relaxation; pull arms until every
        // item of both categories was offered.
        for _ in 0..6 {
            selector
                .choose(StressCategory::Anger, &mut p, Timestamp::now(), &mut rng)
                .unwrap();
            complete(&mut p, 5);
        }

        // All four items tried; the next epsilon-path choice must still work.
        let offered = selector
            .choose(StressCategory::Anger, &mut p, Timestamp::now(), &mut rng)
            .unwrap();
        assert!(catalog::preferred_categories(StressCategory::Anger)
            .contains(&offered.category));
    }
}
