//! Template-based response renderer.
//!
//! Deterministic rendering of [`TurnDecision`] values into outbound text. In
//! production this stands in whenever the external text-generation service
//! times out or fails; in tests and the console loop it is the generator.

use async_trait::async_trait;

use crate::ports::{
    GenerationError, ResponseGenerator, TurnDecision, FEEDBACK_PROMPT, STRESS_CHECK_PROMPT,
};

/// Renders decisions from fixed templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    /// Creates a template renderer.
    pub fn new() -> Self {
        Self
    }

    /// Renders a decision synchronously; never fails.
    pub fn render_template(decision: &TurnDecision) -> String {
        match decision {
            TurnDecision::Appraisal { result } => {
                let mut text = String::from(
                    "Responding with these empathetic strategies:\n",
                );
                for (id, description) in result.descriptions() {
                    text.push_str(&format!("- {}: {}\n", id, description));
                }
                text
            }
            TurnDecision::StressCheck { .. } => STRESS_CHECK_PROMPT.to_string(),
            TurnDecision::NotStressed => {
                "Glad to hear your stress level seems manageable right now. Take care, \
                 and reach out any time!"
                    .to_string()
            }
            TurnDecision::InterventionOffer {
                category,
                intervention,
            } => {
                format!(
                    "For the {} you're feeling, I recommend trying {}: {} {}\n\n{}",
                    category,
                    intervention.name,
                    intervention.description,
                    intervention.link,
                    FEEDBACK_PROMPT
                )
            }
            TurnDecision::FeedbackAcknowledged { score } => {
                if *score >= 7 {
                    "I'm glad that helped! I'll be checking in again in two days. Goodbye!"
                        .to_string()
                } else if *score < 4 {
                    "I'm sorry that didn't help. It takes time to find what works best for \
                     you; I'll suggest something different next time. Goodbye!"
                        .to_string()
                } else {
                    "Thank you for your feedback! I'll be checking in again in two days. \
                     Goodbye!"
                        .to_string()
                }
            }
            TurnDecision::RePrompt { .. } => {
                "Can you please provide the specific rating of how helpful the practice \
                 was? Thank you!"
                    .to_string()
            }
        }
    }
}

#[async_trait]
impl ResponseGenerator for TemplateGenerator {
    async fn render(&self, decision: &TurnDecision) -> Result<String, GenerationError> {
        Ok(Self::render_template(decision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::relief::{catalog, InterventionCategory, StressCategory};

    #[tokio::test]
    async fn offer_rendering_includes_link_and_feedback_prompt() {
        let generator = TemplateGenerator::new();
        let decision = TurnDecision::InterventionOffer {
            category: StressCategory::Anxiety,
            intervention: catalog::interventions(InterventionCategory::Relaxation)[1],
        };

        let text = generator.render(&decision).await.unwrap();
        assert!(text.contains("Box Breathing"));
        assert!(text.contains("https://"));
        assert!(text.contains("scale of 1 to 10"));
    }

    #[tokio::test]
    async fn feedback_acknowledgement_varies_with_score() {
        let generator = TemplateGenerator::new();
        let glad = generator
            .render(&TurnDecision::FeedbackAcknowledged { score: 9 })
            .await
            .unwrap();
        let sorry = generator
            .render(&TurnDecision::FeedbackAcknowledged { score: 2 })
            .await
            .unwrap();
        assert!(glad.contains("glad"));
        assert!(sorry.contains("sorry"));
    }

    #[tokio::test]
    async fn stress_check_uses_the_fixed_prompt() {
        let generator = TemplateGenerator::new();
        let text = generator
            .render(&TurnDecision::StressCheck {
                category: StressCategory::Overwhelm,
            })
            .await
            .unwrap();
        assert_eq!(text, STRESS_CHECK_PROMPT);
    }
}
