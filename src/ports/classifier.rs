//! UtteranceClassifier port - interface to the external classification service.
//!
//! The classifier segments an utterance into atomic statements and labels the
//! empathy opportunities in each, or detects the kind of stress a message
//! expresses. Labels cross the port as raw strings; parsing into the closed
//! domain enums happens in the application layer, where unknown labels are
//! substituted with `general`.

use async_trait::async_trait;
use thiserror::Error;

/// Empathy-opportunity labels detected in one atomic segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSegment {
    /// Raw taxonomy labels, classifier's confidence order.
    pub labels: Vec<String>,
}

impl ClassifiedSegment {
    /// Creates a segment from raw labels.
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

/// Stress detection result for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct StressSignal {
    /// Raw stress category label.
    pub category: String,
    /// Classifier confidence, 0.0–1.0.
    pub confidence: f32,
}

/// Classifier errors.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Service unreachable or returned a failure.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// Response could not be parsed into labels.
    #[error("classifier response unparseable: {0}")]
    Parse(String),
}

/// Port for the external utterance classifier.
#[async_trait]
pub trait UtteranceClassifier: Send + Sync {
    /// Segments an utterance and labels the empathy opportunities per segment.
    async fn classify_opportunities(
        &self,
        utterance: &str,
    ) -> Result<Vec<ClassifiedSegment>, ClassifierError>;

    /// Detects the stress category a message expresses.
    async fn detect_stress(&self, utterance: &str) -> Result<StressSignal, ClassifierError>;
}
