//! Empathetic-strategy path.
//!
//! Turns the classifier's per-segment opportunity labels into the sampled
//! strategy set handed to the text generator. Unknown labels are substituted
//! with `general` rather than failing the turn.

use rand::Rng;

use crate::domain::empathy::{AppraisalResult, AppraisalSampler, EmpathyOpportunity};
use crate::domain::foundation::DomainError;
use crate::ports::ClassifiedSegment;

/// Handles one empathy turn: label parsing, draw sizing, sampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppraisalHandler {
    sampler: AppraisalSampler,
}

impl AppraisalHandler {
    /// Creates a handler with the canonical sampler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples the strategy set for one utterance.
    ///
    /// One classified segment draws a single strategy, more segments draw
    /// two; duplicate labels across segments are deduplicated by the sampler.
    pub fn appraise<R: Rng + ?Sized>(
        &self,
        segments: &[ClassifiedSegment],
        rng: &mut R,
    ) -> Result<AppraisalResult, DomainError> {
        let mut labels = Vec::new();
        for segment in segments {
            for raw in &segment.labels {
                match EmpathyOpportunity::from_label(raw) {
                    Ok(eo) => labels.push(eo),
                    Err(err) => {
                        tracing::warn!(
                            label = %raw,
                            error = %err,
                            "unknown empathy opportunity, substituting general"
                        );
                        labels.push(EmpathyOpportunity::General);
                    }
                }
            }
        }

        let draws = if segments.len() <= 1 { 1 } else { 2 };
        self.sampler.sample(&labels, draws, rng)
    }
}
