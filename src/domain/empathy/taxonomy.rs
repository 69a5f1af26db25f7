//! Static strategy weight table.
//!
//! Maps each empathy opportunity to its probability-weighted population of
//! response strategies. Raw weights are observation counts from annotated
//! counseling transcripts; they are normalized once at load so every
//! opportunity's weights sum to 1.0.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::{EmpathyOpportunity, Strategy};

type RawRow = &'static [(Strategy, u32)];

fn raw_population(eo: EmpathyOpportunity) -> RawRow {
    use EmpathyOpportunity as Eo;
    use Strategy as S;
    match eo {
        Eo::NegativeFeelingsExplicit => &[
            (S::NeutralSupportExplicitAppreciation, 9),
            (S::SharingFeelingsViews, 3),
            (S::UnderstandFeelingsViews, 4),
            (S::ElicitIndirectConfirmation, 1),
            (S::ElicitIndirectCoaching, 4),
            (S::ElicitIndirectFeelingInvitation, 1),
            (S::ElicitIndirectFeelingNegative, 1),
            (S::ElicitDirectFeeling, 1),
        ],
        Eo::NegativeFeelingsImplicit => &[
            (S::AcceptanceExplicitImplicitJudgment, 11),
            (S::NeutralSupportExplicitAppreciation, 8),
            (S::NeutralSupportNormalization, 1),
            (S::SharingFeelingsViews, 2),
            (S::UnderstandFeelingsViews, 9),
            (S::ElicitIndirectCoaching, 14),
            (S::ElicitIndirectFeelingInvitation, 3),
            (S::ElicitDirectFeeling, 1),
        ],
        Eo::NegativeJudgmentExplicit => &[
            (S::AcceptanceExplicitImplicitJudgment, 2),
            (S::NeutralSupportExplicitAppreciation, 5),
            (S::UnderstandFeelingsViews, 3),
            (S::ElicitIndirectCoaching, 3),
        ],
        Eo::NegativeJudgmentImplicit => &[
            (S::AcceptanceExplicitImplicitJudgment, 7),
            (S::AcceptanceRepetition, 1),
            (S::NeutralSupportExplicitAppreciation, 7),
            (S::SharingFeelingsViews, 2),
            (S::UnderstandFeelingsViews, 3),
            (S::ElicitIndirectCoaching, 15),
            (S::ElicitIndirectJudgment, 1),
            (S::ElicitDirectFeeling, 1),
            (S::ElicitFeelings3rd, 1),
        ],
        Eo::PositiveSelfJudgmentExplicit => &[
            (S::AcceptanceExplicitImplicitJudgment, 2),
            (S::NeutralSupportExplicitAppreciation, 1),
            (S::SharingFeelingsViews, 1),
            (S::ElicitDirectAppreciation, 1),
            (S::ElicitIndirectCoaching, 2),
            (S::ElicitDirectJudgment, 1),
            (S::ElicitIndirectFeelingInvitation, 1),
        ],
        Eo::PositiveSelfJudgmentImplicit => &[
            (S::AcceptanceExplicitImplicitJudgment, 49),
            (S::AcceptanceRepetition, 1),
            (S::NeutralSupportExplicitAppreciation, 5),
            (S::NeutralSupportExplicitJudgment, 1),
            (S::NeutralSupportNormalization, 1),
            (S::SharingFeelingsViews, 1),
            (S::ElicitIndirectConfirmation, 3),
            (S::ElicitIndirectCoaching, 7),
            (S::ElicitDirectFeeling, 4),
        ],
        Eo::NegativeAppreciationExplicit => &[
            (S::SharingFeelingsViews, 3),
            (S::ElicitIndirectCoaching, 9),
            (S::ElicitIndirectFeelingEmotive, 1),
            (S::ElicitIndirectFeelingInvitation, 1),
        ],
        Eo::NegativeAppreciationImplicit => &[
            (S::AcceptanceExplicitImplicitJudgment, 2),
            (S::AcceptanceRepetition, 1),
            (S::NeutralSupportExplicitAppreciation, 10),
            (S::SharingFeelingsViews, 11),
            (S::UnderstandFeelingsViews, 10),
            (S::ElicitIndirectCoaching, 11),
            (S::ElicitIndirectFeelingInvitation, 3),
        ],
        Eo::General => &[
            (S::AcceptanceRepetition, 7),
            (S::NeutralSupportExplicitAppreciation, 1),
            (S::NeutralSupportExplicitJudgment, 1),
            (S::SharingFeelingsViews, 3),
            (S::ElicitIndirectCoaching, 1),
            (S::ElicitIndirectFeelingInvitation, 2),
        ],
    }
}

/// Normalized weight table, built once at first use.
///
/// Invariant: for every opportunity the weights sum to 1.0 and every listed
/// strategy has a strictly positive weight.
static STRATEGY_WEIGHTS: Lazy<HashMap<EmpathyOpportunity, Vec<(Strategy, f64)>>> =
    Lazy::new(|| {
        EmpathyOpportunity::ALL
            .iter()
            .map(|&eo| {
                let raw = raw_population(eo);
                let total: u32 = raw.iter().map(|(_, w)| w).sum();
                let row = raw
                    .iter()
                    .map(|&(s, w)| (s, f64::from(w) / f64::from(total)))
                    .collect();
                (eo, row)
            })
            .collect()
    });

/// Returns the normalized (strategy, weight) population for an opportunity.
///
/// Total over the closed enum; every opportunity has a population.
pub fn weights_for(eo: EmpathyOpportunity) -> &'static [(Strategy, f64)] {
    STRATEGY_WEIGHTS
        .get(&eo)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
