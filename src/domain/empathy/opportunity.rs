//! Empathy Opportunity labels.
//!
//! An Empathy Opportunity (EO) is the classified category of emotional content
//! in a user utterance, produced by the external classifier. The label set is
//! closed; classifier output is parsed through [`EmpathyOpportunity::from_label`]
//! and anything outside the set is the `UnknownOpportunity` error condition.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Classified category of emotional content in one utterance segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmpathyOpportunity {
    NegativeFeelingsExplicit,
    NegativeFeelingsImplicit,
    NegativeJudgmentExplicit,
    NegativeJudgmentImplicit,
    PositiveSelfJudgmentExplicit,
    PositiveSelfJudgmentImplicit,
    NegativeAppreciationExplicit,
    NegativeAppreciationImplicit,
    General,
}

impl EmpathyOpportunity {
    /// All labels, in the taxonomy's canonical order.
    pub const ALL: [EmpathyOpportunity; 9] = [
        EmpathyOpportunity::NegativeFeelingsExplicit,
        EmpathyOpportunity::NegativeFeelingsImplicit,
        EmpathyOpportunity::NegativeJudgmentExplicit,
        EmpathyOpportunity::NegativeJudgmentImplicit,
        EmpathyOpportunity::PositiveSelfJudgmentExplicit,
        EmpathyOpportunity::PositiveSelfJudgmentImplicit,
        EmpathyOpportunity::NegativeAppreciationExplicit,
        EmpathyOpportunity::NegativeAppreciationImplicit,
        EmpathyOpportunity::General,
    ];

    /// Returns the classifier wire label.
    pub fn label(&self) -> &'static str {
        match self {
            EmpathyOpportunity::NegativeFeelingsExplicit => "negative_feelings_explicit",
            EmpathyOpportunity::NegativeFeelingsImplicit => "negative_feelings_implicit",
            EmpathyOpportunity::NegativeJudgmentExplicit => "negative_judgment_explicit",
            EmpathyOpportunity::NegativeJudgmentImplicit => "negative_judgment_implicit",
            EmpathyOpportunity::PositiveSelfJudgmentExplicit => "positive_self_judgment_explicit",
            EmpathyOpportunity::PositiveSelfJudgmentImplicit => "positive_self_judgment_implicit",
            EmpathyOpportunity::NegativeAppreciationExplicit => "negative_appreciation_explicit",
            EmpathyOpportunity::NegativeAppreciationImplicit => "negative_appreciation_implicit",
            EmpathyOpportunity::General => "general",
        }
    }

    /// Parses a classifier label.
    ///
    /// # Errors
    ///
    /// `UnknownOpportunity` if the label is not part of the taxonomy.
    /// Callers should substitute [`EmpathyOpportunity::General`] and continue.
    pub fn from_label(label: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .copied()
            .find(|eo| eo.label() == label)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UnknownOpportunity,
                    format!("'{}' is not a known empathy opportunity", label),
                )
            })
    }
}

impl fmt::Display for EmpathyOpportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
