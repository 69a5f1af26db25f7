//! Scripted classifier for tests and local development.
//!
//! Returns pre-configured answers instead of calling the classification
//! service. Defaults to the neutral `general` answers.

use async_trait::async_trait;

use crate::ports::{ClassifiedSegment, ClassifierError, StressSignal, UtteranceClassifier};

/// Classifier returning fixed answers.
#[derive(Debug, Clone)]
pub struct ScriptedClassifier {
    segments: Vec<ClassifiedSegment>,
    stress: StressSignal,
}

impl ScriptedClassifier {
    /// Creates a classifier that answers `general` for everything.
    pub fn new() -> Self {
        Self {
            segments: vec![ClassifiedSegment::new(vec!["general".to_string()])],
            stress: StressSignal {
                category: "general".to_string(),
                confidence: 1.0,
            },
        }
    }

    /// Sets the segments returned for opportunity classification.
    pub fn with_segments(mut self, segments: Vec<ClassifiedSegment>) -> Self {
        self.segments = segments;
        self
    }

    /// Sets the stress detection answer.
    pub fn with_stress(mut self, category: impl Into<String>, confidence: f32) -> Self {
        self.stress = StressSignal {
            category: category.into(),
            confidence,
        };
        self
    }
}

impl Default for ScriptedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UtteranceClassifier for ScriptedClassifier {
    async fn classify_opportunities(
        &self,
        _utterance: &str,
    ) -> Result<Vec<ClassifiedSegment>, ClassifierError> {
        Ok(self.segments.clone())
    }

    async fn detect_stress(&self, _utterance: &str) -> Result<StressSignal, ClassifierError> {
        Ok(self.stress.clone())
    }
}
