//! GenerationEngine — total answer generation.
//!
//! Remote when credentialed, template fallback otherwise; a remote failure
//! is caught here and converted to the fallback with its reason tagged.
//! No transport error ever propagates past this boundary.

use sibyl_core::config::GenerationConfig;
use sibyl_core::models::{FallbackReason, GeneratedAnswer};
use sibyl_core::traits::IAnswerGenerator;
use tracing::{info, warn};

use crate::providers::{OpenAiChat, TemplateFallback};

/// The main generation engine.
pub struct GenerationEngine {
    remote: Option<Box<dyn IAnswerGenerator>>,
    fallback: TemplateFallback,
}

impl GenerationEngine {
    pub fn new(config: &GenerationConfig) -> Self {
        let remote: Option<Box<dyn IAnswerGenerator>> = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .map(|api_key| {
                Box::new(OpenAiChat::new(
                    api_key,
                    config.model.clone(),
                    config.endpoint.clone(),
                    config.temperature,
                )) as Box<dyn IAnswerGenerator>
            });

        info!(
            remote = remote.is_some(),
            model = remote.as_ref().map(|r| r.name()).unwrap_or("fallback-local"),
            "generation engine initialized"
        );

        Self {
            remote,
            fallback: TemplateFallback::new(),
        }
    }

    /// Build an engine around an explicit remote generator. Used by tests.
    pub fn with_remote(remote: Option<Box<dyn IAnswerGenerator>>) -> Self {
        Self {
            remote,
            fallback: TemplateFallback::new(),
        }
    }

    /// Generate an answer. Total: always returns an answer, with the
    /// degradation mode tagged in its provenance.
    pub fn generate(&self, question: &str, context: &[String]) -> GeneratedAnswer {
        match &self.remote {
            Some(remote) if remote.is_available() => {
                match remote.generate(question, context) {
                    Ok(answer) => answer,
                    Err(e) => {
                        warn!(error = %e, "remote generation failed, using template fallback");
                        self.fallback.answer(
                            question,
                            context,
                            FallbackReason::ProviderError(e.to_string()),
                        )
                    }
                }
            }
            _ => self
                .fallback
                .answer(question, context, FallbackReason::NoCredential),
        }
    }
}
