//! Weighted strategy sampling with positional decay.
//!
//! Given the empathy opportunities detected across the atomic segments of one
//! utterance, the sampler accumulates every opportunity's strategy population
//! into a single candidate map (earlier-detected opportunities contribute at
//! full weight, later ones decayed) and draws a small strategy set from it.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{taxonomy, EmpathyOpportunity, Strategy};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Positional decay step applied per opportunity index (modulo 3).
const DECAY_STEP: f64 = 0.3;

/// How repeated opportunity labels across segments are treated.
///
/// `DedupFirst` is the canonical behavior: duplicates are collapsed (first
/// occurrence kept) before positional weighting. `PerOccurrence` is the
/// documented variant that lets every occurrence contribute; it is not used
/// by the application layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingMode {
    #[default]
    DedupFirst,
    PerOccurrence,
}

/// The set of strategies sampled for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalResult {
    strategies: BTreeSet<Strategy>,
}

impl AppraisalResult {
    /// Returns the sampled strategies.
    pub fn strategies(&self) -> &BTreeSet<Strategy> {
        &self.strategies
    }

    /// Returns the number of distinct strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if no strategy was sampled.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Returns (id, description) pairs for prompt assembly.
    pub fn descriptions(&self) -> Vec<(&'static str, &'static str)> {
        self.strategies
            .iter()
            .map(|s| (s.id(), s.description()))
            .collect()
    }
}

/// Samples response strategies for one utterance.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppraisalSampler {
    mode: WeightingMode,
}

impl AppraisalSampler {
    /// Creates a sampler with the canonical dedup-before-weighting mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sampler with an explicit weighting mode.
    pub fn with_mode(mode: WeightingMode) -> Self {
        Self { mode }
    }

    /// Builds the combined candidate map for a label sequence.
    ///
    /// Label `i` (after mode-dependent deduplication) contributes its
    /// population scaled by `1 - (i % 3) * 0.3`. An empty sequence falls back
    /// to the `general` table. Every candidate ends up with positive weight.
    pub fn candidate_weights(
        &self,
        labels: &[EmpathyOpportunity],
    ) -> Vec<(Strategy, f64)> {
        let ordered = self.ordered_labels(labels);

        let mut combined: BTreeMap<Strategy, f64> = BTreeMap::new();
        for (i, eo) in ordered.iter().enumerate() {
            let decay = 1.0 - (i % 3) as f64 * DECAY_STEP;
            for &(strategy, weight) in taxonomy::weights_for(*eo) {
                *combined.entry(strategy).or_insert(0.0) += weight * decay;
            }
        }
        combined.into_iter().collect()
    }

    /// Draws `draws` strategies from the combined candidate map and returns
    /// the resulting set (duplicate draws collapse).
    ///
    /// # Errors
    ///
    /// `InternalError` if the combined map degenerates to zero total weight,
    /// which the taxonomy invariants rule out for any input.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        labels: &[EmpathyOpportunity],
        draws: usize,
        rng: &mut R,
    ) -> Result<AppraisalResult, DomainError> {
        let candidates = self.candidate_weights(labels);
        let dist = WeightedIndex::new(candidates.iter().map(|(_, w)| *w)).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("degenerate candidate weights: {}", e),
            )
        })?;

        let strategies = (0..draws)
            .map(|_| candidates[dist.sample(rng)].0)
            .collect();
        Ok(AppraisalResult { strategies })
    }

    fn ordered_labels(&self, labels: &[EmpathyOpportunity]) -> Vec<EmpathyOpportunity> {
        let mut ordered = match self.mode {
            WeightingMode::DedupFirst => {
                let mut seen = BTreeSet::new();
                labels
                    .iter()
                    .copied()
                    .filter(|eo| seen.insert(*eo))
                    .collect()
            }
            WeightingMode::PerOccurrence => labels.to_vec(),
        };
        if ordered.is_empty() {
            ordered.push(EmpathyOpportunity::General);
        }
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Strategy;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strategies_in(eo: EmpathyOpportunity) -> BTreeSet<Strategy> {
        taxonomy::weights_for(eo).iter().map(|(s, _)| *s).collect()
    }

    #[test]
    fn empty_input_falls_back_to_general() {
        let sampler = AppraisalSampler::new();
        let candidates = sampler.candidate_weights(&[]);
        let expected = strategies_in(EmpathyOpportunity::General);
        assert_eq!(
            candidates.iter().map(|(s, _)| *s).collect::<BTreeSet<_>>(),
            expected
        );
    }

    #[test]
    fn dedup_first_collapses_repeats() {
        let sampler = AppraisalSampler::new();
        let once = sampler.candidate_weights(&[EmpathyOpportunity::General]);
        let thrice = sampler.candidate_weights(&[
            EmpathyOpportunity::General,
            EmpathyOpportunity::General,
            EmpathyOpportunity::General,
        ]);
        assert_eq!(once, thrice);
    }

    #[test]
    fn per_occurrence_variant_accumulates_repeats() {
        let sampler = AppraisalSampler::with_mode(WeightingMode::PerOccurrence);
        let once = sampler.candidate_weights(&[EmpathyOpportunity::General]);
        let twice = sampler.candidate_weights(&[
            EmpathyOpportunity::General,
            EmpathyOpportunity::General,
        ]);
        // Second occurrence contributes at decay 0.7.
        for ((s1, w1), (s2, w2)) in once.iter().zip(twice.iter()) {
            assert_eq!(s1, s2);
            assert!((w2 - w1 * 1.7).abs() < 1e-9);
        }
    }

    #[test]
    fn positional_decay_cycles_every_three_labels() {
        let sampler = AppraisalSampler::new();
        let labels = [
            EmpathyOpportunity::NegativeFeelingsExplicit,
            EmpathyOpportunity::NegativeFeelingsImplicit,
            EmpathyOpportunity::NegativeJudgmentExplicit,
            EmpathyOpportunity::NegativeJudgmentImplicit,
        ];
        // Index 3 wraps back to full weight; a strategy unique to the fourth
        // label must appear undamped. elicit_feelings_3rd only occurs in
        // negative_judgment_implicit.
        let candidates = sampler.candidate_weights(&labels);
        let raw = taxonomy::weights_for(EmpathyOpportunity::NegativeJudgmentImplicit);
        let expected = raw
            .iter()
            .find(|(s, _)| *s == Strategy::ElicitFeelings3rd)
            .map(|(_, w)| *w)
            .unwrap();
        let actual = candidates
            .iter()
            .find(|(s, _)| *s == Strategy::ElicitFeelings3rd)
            .map(|(_, w)| *w)
            .unwrap();
        assert!((actual - expected).abs() < 1e-9);
    }

    #[test]
    fn scenario_general_only_never_draws_foreign_strategies() {
        let sampler = AppraisalSampler::new();
        let mut rng = StdRng::seed_from_u64(7);
        let allowed = strategies_in(EmpathyOpportunity::General);

        for _ in 0..10_000 {
            let result = sampler
                .sample(&[EmpathyOpportunity::General], 1, &mut rng)
                .unwrap();
            assert_eq!(result.len(), 1);
            for s in result.strategies() {
                assert!(allowed.contains(s), "{} not in general's table", s);
            }
        }
    }

    #[test]
    fn duplicate_draws_collapse_to_a_set() {
        let sampler = AppraisalSampler::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let result = sampler
                .sample(&[EmpathyOpportunity::NegativeAppreciationExplicit], 2, &mut rng)
                .unwrap();
            assert!((1..=2).contains(&result.len()));
        }
    }

    #[test]
    fn descriptions_cover_every_sampled_strategy() {
        let sampler = AppraisalSampler::new();
        let mut rng = StdRng::seed_from_u64(11);
        let result = sampler
            .sample(&[EmpathyOpportunity::NegativeFeelingsImplicit], 2, &mut rng)
            .unwrap();
        assert_eq!(result.descriptions().len(), result.len());
    }

    proptest! {
        /// Every sampled strategy has positive weight under the combined map.
        #[test]
        fn sampled_strategies_have_positive_combined_weight(
            indices in proptest::collection::vec(0usize..9, 0..6),
            seed in any::<u64>(),
            draws in 1usize..3,
        ) {
            let labels: Vec<_> = indices
                .iter()
                .map(|&i| EmpathyOpportunity::ALL[i])
                .collect();
            let sampler = AppraisalSampler::new();
            let mut rng = StdRng::seed_from_u64(seed);

            let result = sampler.sample(&labels, draws, &mut rng).unwrap();
            let candidates = sampler.candidate_weights(&labels);
            for s in result.strategies() {
                let weight = candidates
                    .iter()
                    .find(|(c, _)| c == s)
                    .map(|(_, w)| *w);
                prop_assert!(matches!(weight, Some(w) if w > 0.0));
            }
        }
    }
}
