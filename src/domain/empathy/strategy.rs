//! Clinical empathetic-response strategies.
//!
//! The closed enumeration of response techniques the counselor can apply.
//! Each strategy carries a one-line description handed to the text generator
//! alongside a sampled [`AppraisalResult`](super::AppraisalResult).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A clinical empathetic-response technique from the fixed taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    AcceptanceExplicitImplicitJudgment,
    AcceptanceRepetition,
    NeutralSupportExplicitAppreciation,
    NeutralSupportExplicitJudgment,
    NeutralSupportNormalization,
    SharingFeelingsViews,
    UnderstandFeelingsViews,
    ElicitDirectAppreciation,
    ElicitDirectFeeling,
    ElicitDirectJudgment,
    #[serde(rename = "elicit_feelings_3rd")]
    ElicitFeelings3rd,
    ElicitIndirectCoaching,
    ElicitIndirectConfirmation,
    ElicitIndirectFeelingEmotive,
    ElicitIndirectFeelingInvitation,
    ElicitIndirectFeelingNegative,
    ElicitIndirectJudgment,
}

impl Strategy {
    /// All strategies in the taxonomy.
    pub const ALL: [Strategy; 17] = [
        Strategy::AcceptanceExplicitImplicitJudgment,
        Strategy::AcceptanceRepetition,
        Strategy::NeutralSupportExplicitAppreciation,
        Strategy::NeutralSupportExplicitJudgment,
        Strategy::NeutralSupportNormalization,
        Strategy::SharingFeelingsViews,
        Strategy::UnderstandFeelingsViews,
        Strategy::ElicitDirectAppreciation,
        Strategy::ElicitDirectFeeling,
        Strategy::ElicitDirectJudgment,
        Strategy::ElicitFeelings3rd,
        Strategy::ElicitIndirectCoaching,
        Strategy::ElicitIndirectConfirmation,
        Strategy::ElicitIndirectFeelingEmotive,
        Strategy::ElicitIndirectFeelingInvitation,
        Strategy::ElicitIndirectFeelingNegative,
        Strategy::ElicitIndirectJudgment,
    ];

    /// Returns the taxonomy identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Strategy::AcceptanceExplicitImplicitJudgment => "acceptance_explicit_implicit_judgment",
            Strategy::AcceptanceRepetition => "acceptance_repetition",
            Strategy::NeutralSupportExplicitAppreciation => "neutral_support_explicit_appreciation",
            Strategy::NeutralSupportExplicitJudgment => "neutral_support_explicit_judgment",
            Strategy::NeutralSupportNormalization => "neutral_support_normalization",
            Strategy::SharingFeelingsViews => "sharing_feelings_views",
            Strategy::UnderstandFeelingsViews => "understand_feelings_views",
            Strategy::ElicitDirectAppreciation => "elicit_direct_appreciation",
            Strategy::ElicitDirectFeeling => "elicit_direct_feeling",
            Strategy::ElicitDirectJudgment => "elicit_direct_judgment",
            Strategy::ElicitFeelings3rd => "elicit_feelings_3rd",
            Strategy::ElicitIndirectCoaching => "elicit_indirect_coaching",
            Strategy::ElicitIndirectConfirmation => "elicit_indirect_confirmation",
            Strategy::ElicitIndirectFeelingEmotive => "elicit_indirect_feeling_emotive",
            Strategy::ElicitIndirectFeelingInvitation => "elicit_indirect_feeling_invitation",
            Strategy::ElicitIndirectFeelingNegative => "elicit_indirect_feeling_negative",
            Strategy::ElicitIndirectJudgment => "elicit_indirect_judgment",
        }
    }

    /// Returns the description handed to the text generator for prompt assembly.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::AcceptanceExplicitImplicitJudgment => {
                "Accept the user's stated or implied self-judgment without contradicting it, signalling that their view is heard as legitimate."
            }
            Strategy::AcceptanceRepetition => {
                "Repeat back a key phrase of the user's own words to show their statement was registered as said."
            }
            Strategy::NeutralSupportExplicitAppreciation => {
                "Offer explicit appreciation of what the user shared or attempted, without judging the outcome."
            }
            Strategy::NeutralSupportExplicitJudgment => {
                "Offer a supportive, explicitly positive judgment of the user's effort or progress."
            }
            Strategy::NeutralSupportNormalization => {
                "Normalize the user's experience by noting that it is common and understandable in their situation."
            }
            Strategy::SharingFeelingsViews => {
                "Share a brief feeling or view of your own about the user's situation to create mutuality."
            }
            Strategy::UnderstandFeelingsViews => {
                "State your understanding of the user's feelings or views in your own words, checking it lands correctly."
            }
            Strategy::ElicitDirectAppreciation => {
                "Directly ask the user what they appreciate or value about the situation."
            }
            Strategy::ElicitDirectFeeling => {
                "Directly ask the user how the situation makes them feel."
            }
            Strategy::ElicitDirectJudgment => {
                "Directly ask the user for their own judgment or evaluation of the situation."
            }
            Strategy::ElicitFeelings3rd => {
                "Ask how a third person in the user's life experiences or would see the situation."
            }
            Strategy::ElicitIndirectCoaching => {
                "Invite the user to think through a next step themselves rather than prescribing one."
            }
            Strategy::ElicitIndirectConfirmation => {
                "Tentatively restate what the user seems to mean, inviting them to confirm or correct it."
            }
            Strategy::ElicitIndirectFeelingEmotive => {
                "Name the emotion the user's words suggest, leaving room for them to take it up or not."
            }
            Strategy::ElicitIndirectFeelingInvitation => {
                "Open an invitation to say more about how things are going emotionally, without pressing."
            }
            Strategy::ElicitIndirectFeelingNegative => {
                "Gently surface a possible negative feeling behind the user's words, phrased as a guess."
            }
            Strategy::ElicitIndirectJudgment => {
                "Indirectly invite the user to evaluate the situation, e.g. by wondering aloud how it compares to what they hoped."
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = Strategy::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids.len(), Strategy::ALL.len());
    }

    #[test]
    fn every_strategy_has_a_description() {
        for s in Strategy::ALL {
            assert!(!s.description().is_empty());
        }
    }

    #[test]
    fn serde_uses_taxonomy_ids() {
        let json = serde_json::to_string(&Strategy::ElicitFeelings3rd).unwrap();
        assert_eq!(json, "\"elicit_feelings_3rd\"");
    }
}
