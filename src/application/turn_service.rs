//! Turn orchestration over the collaborator ports.
//!
//! Wraps the classifier and generator calls in timeouts and maps any failure
//! to a deterministic neutral fallback, so a slow or broken collaborator can
//! never crash a turn or leave it unacknowledged.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::adapters::collaborators::TemplateGenerator;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::relief::StressCategory;
use crate::ports::{
    ClassifiedSegment, ResponseGenerator, TurnDecision, UtteranceClassifier,
};

use super::AppraisalHandler;
use super::SessionWorkflow;

/// Composes the ports into full conversational turns.
pub struct TurnService {
    classifier: Arc<dyn UtteranceClassifier>,
    generator: Arc<dyn ResponseGenerator>,
    workflow: Arc<SessionWorkflow>,
    appraisal: AppraisalHandler,
    collaborator_timeout: Duration,
    rng: Mutex<StdRng>,
}

impl TurnService {
    /// Creates a turn service.
    pub fn new(
        classifier: Arc<dyn UtteranceClassifier>,
        generator: Arc<dyn ResponseGenerator>,
        workflow: Arc<SessionWorkflow>,
        collaborator_timeout: Duration,
    ) -> Self {
        Self {
            classifier,
            generator,
            workflow,
            appraisal: AppraisalHandler::new(),
            collaborator_timeout,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Handles one inbound message.
    ///
    /// A user inside the relief workflow gets the relief handling; everyone
    /// else gets the empathetic-strategy path.
    pub async fn handle_turn(&self, user_id: &UserId, message: &str) -> Result<String, DomainError> {
        if let Some(decision) = self.workflow.handle_message(user_id, message).await? {
            return Ok(self.render(&decision).await);
        }
        self.empathy_turn(message).await
    }

    /// Enters the relief workflow: detects the stress category in the message
    /// and opens the stress check.
    pub async fn begin_relief_turn(
        &self,
        user_id: &UserId,
        message: &str,
    ) -> Result<String, DomainError> {
        let stress = self.detect_stress_or_fallback(message).await;
        let decision = self.workflow.begin_relief(user_id, stress).await?;
        Ok(self.render(&decision).await)
    }

    /// Runs the empathetic-strategy path for one utterance.
    pub async fn empathy_turn(&self, message: &str) -> Result<String, DomainError> {
        let segments = self.classify_or_fallback(message).await;
        let result = {
            let mut rng = self.rng.lock().await;
            self.appraisal.appraise(&segments, &mut *rng)?
        };
        let decision = TurnDecision::Appraisal { result };
        Ok(self.render(&decision).await)
    }

    async fn classify_or_fallback(&self, message: &str) -> Vec<ClassifiedSegment> {
        match timeout(
            self.collaborator_timeout,
            self.classifier.classify_opportunities(message),
        )
        .await
        {
            Ok(Ok(segments)) => segments,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "classifier failed, using general fallback");
                vec![ClassifiedSegment::new(vec!["general".to_string()])]
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.collaborator_timeout.as_secs(),
                    "classifier timed out, using general fallback"
                );
                vec![ClassifiedSegment::new(vec!["general".to_string()])]
            }
        }
    }

    async fn detect_stress_or_fallback(&self, message: &str) -> StressCategory {
        let signal = match timeout(
            self.collaborator_timeout,
            self.classifier.detect_stress(message),
        )
        .await
        {
            Ok(Ok(signal)) => signal,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "stress detection failed, assuming general");
                return StressCategory::General;
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.collaborator_timeout.as_secs(),
                    "stress detection timed out, assuming general"
                );
                return StressCategory::General;
            }
        };

        match StressCategory::from_label(&signal.category) {
            Ok(category) => category,
            Err(err) => {
                tracing::warn!(error = %err, "unknown stress category, assuming general");
                StressCategory::General
            }
        }
    }

    /// Renders a decision, falling back to the templates when the external
    /// generator times out or fails. The turn is acknowledged either way.
    async fn render(&self, decision: &TurnDecision) -> String {
        match timeout(self.collaborator_timeout, self.generator.render(decision)).await {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "generator failed, using template fallback");
                TemplateGenerator::render_template(decision)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.collaborator_timeout.as_secs(),
                    "generator timed out, using template fallback"
                );
                TemplateGenerator::render_template(decision)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::collaborators::ScriptedClassifier;
    use crate::adapters::storage::InMemoryProfileRepository;
    use crate::application::InterventionSelector;
    use crate::domain::user::DEFAULT_FAVORITE_THRESHOLD;
    use crate::ports::{ClassifierError, GenerationError, StressSignal};
    use async_trait::async_trait;

    struct FailingClassifier;

    #[async_trait]
    impl UtteranceClassifier for FailingClassifier {
        async fn classify_opportunities(
            &self,
            _utterance: &str,
        ) -> Result<Vec<ClassifiedSegment>, ClassifierError> {
            Err(ClassifierError::Unavailable("connection refused".into()))
        }

        async fn detect_stress(&self, _utterance: &str) -> Result<StressSignal, ClassifierError> {
            Err(ClassifierError::Unavailable("connection refused".into()))
        }
    }

    struct HangingGenerator;

    #[async_trait]
    impl ResponseGenerator for HangingGenerator {
        async fn render(&self, _decision: &TurnDecision) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!("sleep outlives every test timeout")
        }
    }

    fn service(
        classifier: Arc<dyn UtteranceClassifier>,
        generator: Arc<dyn ResponseGenerator>,
    ) -> TurnService {
        let workflow = Arc::new(SessionWorkflow::with_rng(
            Arc::new(InMemoryProfileRepository::new()),
            InterventionSelector::default(),
            DEFAULT_FAVORITE_THRESHOLD,
            StdRng::seed_from_u64(23),
        ));
        TurnService::new(classifier, generator, workflow, Duration::from_millis(100))
    }

    fn user() -> UserId {
        UserId::new("whatsapp:+14155550100").unwrap()
    }

    #[tokio::test]
    async fn empathy_turn_renders_sampled_strategies() {
        let svc = service(
            Arc::new(ScriptedClassifier::new()),
            Arc::new(crate::adapters::collaborators::TemplateGenerator::new()),
        );

        let text = svc.empathy_turn("I went for a walk today").await.unwrap();
        assert!(text.contains("empathetic strategies"));
    }

    #[tokio::test]
    async fn classifier_failure_falls_back_to_general() {
        let svc = service(
            Arc::new(FailingClassifier),
            Arc::new(crate::adapters::collaborators::TemplateGenerator::new()),
        );

        // The turn is still acknowledged with a rendered decision.
        let text = svc.empathy_turn("anything").await.unwrap();
        assert!(!text.is_empty());
    }

    #[tokio::test]
    async fn stress_detection_failure_still_opens_the_workflow() {
        let svc = service(
            Arc::new(FailingClassifier),
            Arc::new(crate::adapters::collaborators::TemplateGenerator::new()),
        );

        let text = svc.begin_relief_turn(&user(), "everything is too much").await.unwrap();
        assert!(text.contains("0 to 5"));
    }

    #[tokio::test]
    async fn generator_timeout_falls_back_to_templates() {
        let svc = service(
            Arc::new(ScriptedClassifier::new().with_stress("anxiety", 0.9)),
            Arc::new(HangingGenerator),
        );

        let text = svc.begin_relief_turn(&user(), "so anxious lately").await.unwrap();
        assert!(text.contains("0 to 5"));
    }

    #[tokio::test]
    async fn full_relief_conversation_over_the_service() {
        let svc = service(
            Arc::new(ScriptedClassifier::new().with_stress("anxiety", 0.9)),
            Arc::new(crate::adapters::collaborators::TemplateGenerator::new()),
        );
        let id = user();

        let opening = svc.begin_relief_turn(&id, "work is stressing me out").await.unwrap();
        assert!(opening.contains("0 to 5"));

        let offer = svc.handle_turn(&id, "four").await.unwrap();
        assert!(offer.contains("scale of 1 to 10"));

        let goodbye = svc.handle_turn(&id, "9").await.unwrap();
        assert!(goodbye.contains("glad"));
    }
}
