//! Deterministic local answer template.
//!
//! With no context passages, answers with a fixed "insufficient information"
//! message. Otherwise echoes a truncated lead of the first passage and the
//! question. Stable output, no external state.

use sibyl_core::constants::{FALLBACK_MODEL_ID, FALLBACK_SNIPPET_LEN};
use sibyl_core::errors::SibylResult;
use sibyl_core::models::{FallbackReason, GeneratedAnswer, Provenance};
use sibyl_core::traits::IAnswerGenerator;

/// Fixed reply when no context is available.
pub const INSUFFICIENT_INFORMATION: &str = "I'm not sure based on the available documents.";

/// Template-based fallback generator. Always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateFallback;

impl TemplateFallback {
    pub fn new() -> Self {
        Self
    }

    /// Produce the fallback answer, tagging the provenance with why the
    /// fallback ran. An empty context overrides the trigger: the reason
    /// becomes `EmptyContext` and the fixed message is returned.
    pub fn answer(
        &self,
        question: &str,
        context: &[String],
        trigger: FallbackReason,
    ) -> GeneratedAnswer {
        let (text, reason) = if context.is_empty() {
            (
                INSUFFICIENT_INFORMATION.to_string(),
                FallbackReason::EmptyContext,
            )
        } else {
            let snippet: String = context[0].chars().take(FALLBACK_SNIPPET_LEN).collect();
            (
                format!(
                    "Based on the documents: {snippet} ... \
                     Therefore: this is a suggested answer to '{question}'."
                ),
                trigger,
            )
        };

        GeneratedAnswer {
            text,
            model: FALLBACK_MODEL_ID.to_string(),
            provenance: Provenance::Fallback {
                model: FALLBACK_MODEL_ID.to_string(),
                reason,
            },
            usage: None,
        }
    }
}

impl IAnswerGenerator for TemplateFallback {
    fn generate(&self, question: &str, context: &[String]) -> SibylResult<GeneratedAnswer> {
        Ok(self.answer(question, context, FallbackReason::NoCredential))
    }

    fn name(&self) -> &str {
        FALLBACK_MODEL_ID
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_returns_fixed_message() {
        let answer = TemplateFallback::new().answer("anything?", &[], FallbackReason::NoCredential);
        assert_eq!(answer.text, INSUFFICIENT_INFORMATION);
        assert_eq!(
            answer.provenance,
            Provenance::Fallback {
                model: "fallback-local".to_string(),
                reason: FallbackReason::EmptyContext,
            }
        );
    }

    #[test]
    fn non_empty_context_echoes_first_passage_lead() {
        let context = vec![
            "Our mission is to empower customers.".to_string(),
            "Unrelated second passage.".to_string(),
        ];
        let answer = TemplateFallback::new().answer(
            "What is our mission?",
            &context,
            FallbackReason::NoCredential,
        );
        assert!(answer.text.contains("Our mission is to empower customers."));
        assert!(answer.text.contains("What is our mission?"));
        assert!(!answer.text.contains("Unrelated"));
    }

    #[test]
    fn long_first_passage_is_truncated() {
        let long = "x".repeat(500);
        let answer =
            TemplateFallback::new().answer("q?", &[long], FallbackReason::NoCredential);
        assert!(answer.text.contains(&"x".repeat(200)));
        assert!(!answer.text.contains(&"x".repeat(201)));
    }

    #[test]
    fn trigger_reason_is_preserved_with_context() {
        let answer = TemplateFallback::new().answer(
            "q?",
            &["ctx".to_string()],
            FallbackReason::ProviderError("HTTP 503".to_string()),
        );
        match answer.provenance {
            Provenance::Fallback { reason, .. } => {
                assert_eq!(reason, FallbackReason::ProviderError("HTTP 503".to_string()));
            }
            other => panic!("expected fallback, got {other:?}"),
        }
    }

    #[test]
    fn output_is_deterministic() {
        let f = TemplateFallback::new();
        let ctx = vec!["stable context".to_string()];
        let a = f.answer("q?", &ctx, FallbackReason::NoCredential);
        let b = f.answer("q?", &ctx, FallbackReason::NoCredential);
        assert_eq!(a.text, b.text);
    }
}
