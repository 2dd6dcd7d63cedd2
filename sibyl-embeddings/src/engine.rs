//! EmbeddingEngine — the crate's entry point.
//!
//! Builds the provider chain from config (remote first when a credential is
//! present, digest fallback always last), consults the L1 cache, and
//! guarantees a total function: callers always get vectors, with the
//! degradation mode tagged in the outcome.

use sibyl_core::config::EmbeddingConfig;
use sibyl_core::models::{FallbackReason, Provenance};
use tracing::{info, warn};

use crate::cache::EmbeddingCache;
use crate::chain::ProviderChain;
use crate::providers::{DigestFallback, OpenAiEmbeddings};

/// Result of an embedding call: one vector per input text, in order, plus
/// the degradation mode that produced them.
#[derive(Debug, Clone)]
pub struct EmbeddingOutcome {
    pub vectors: Vec<Vec<f32>>,
    pub provenance: Provenance,
}

/// The main embedding engine.
pub struct EmbeddingEngine {
    chain: ProviderChain,
    fallback_dim: usize,
    cache: EmbeddingCache,
    dim: usize,
}

impl EmbeddingEngine {
    pub fn new(config: &EmbeddingConfig) -> Self {
        let mut chain = ProviderChain::new();

        if let Some(api_key) = config.api_key.clone().filter(|k| !k.is_empty()) {
            chain.push_primary(Box::new(OpenAiEmbeddings::new(
                api_key,
                config.model.clone(),
                config.endpoint.clone(),
                config.dim,
            )));
        }
        chain.push_fallback(Box::new(DigestFallback::new(config.dim)));

        info!(
            provider = chain.active_provider(),
            dim = config.dim,
            remote = chain.has_primary(),
            "embedding engine initialized"
        );

        Self {
            chain,
            fallback_dim: config.dim,
            cache: EmbeddingCache::new(config.l1_cache_size),
            dim: config.dim,
        }
    }

    /// Build an engine around an explicit provider chain. Used by tests and
    /// by callers that bring their own providers.
    pub fn with_chain(chain: ProviderChain, dim: usize, l1_cache_size: u64) -> Self {
        Self {
            chain,
            fallback_dim: dim,
            cache: EmbeddingCache::new(l1_cache_size),
            dim,
        }
    }

    /// Embed a batch of texts. Total: never fails from the caller's
    /// perspective. Cached per text under the serving provider's name.
    pub fn embed_texts(&self, texts: &[String]) -> EmbeddingOutcome {
        let active = self.chain.active_provider().to_string();

        // Full cache hit under the active provider short-circuits the chain.
        let cached: Vec<Option<Vec<f32>>> = texts
            .iter()
            .map(|t| self.cache.get(&EmbeddingCache::key(&active, t)))
            .collect();
        if !texts.is_empty() && cached.iter().all(Option::is_some) {
            let vectors = cached.into_iter().flatten().collect();
            return EmbeddingOutcome {
                vectors,
                provenance: self.chain.active_provenance(),
            };
        }

        match self.chain.embed_batch(texts) {
            Ok((vectors, provenance)) => {
                let model = provenance.model();
                for (text, vector) in texts.iter().zip(&vectors) {
                    self.cache
                        .insert(EmbeddingCache::key(model, text), vector.clone());
                }
                EmbeddingOutcome {
                    vectors,
                    provenance,
                }
            }
            // Unreachable with the digest fallback in the chain, but the
            // boundary stays total regardless.
            Err(e) => {
                warn!(error = %e, "provider chain exhausted, embedding directly via digest fallback");
                let fallback = DigestFallback::new(self.fallback_dim);
                let vectors = texts.iter().map(|t| fallback.vector_for(t)).collect();
                EmbeddingOutcome {
                    vectors,
                    provenance: Provenance::Fallback {
                        model: sibyl_core::constants::FALLBACK_MODEL_ID.to_string(),
                        reason: FallbackReason::ProviderError(e.to_string()),
                    },
                }
            }
        }
    }

    /// Embed a single text.
    pub fn embed_one(&self, text: &str) -> (Vec<f32>, Provenance) {
        let texts = [text.to_string()];
        let outcome = self.embed_texts(&texts);
        let vector = outcome
            .vectors
            .into_iter()
            .next()
            .unwrap_or_else(|| DigestFallback::new(self.dim).vector_for(text));
        (vector, outcome.provenance)
    }

    /// Configured dimensionality.
    pub fn dimensions(&self) -> usize {
        self.dim
    }

    /// Model identifier that would serve the next request.
    pub fn active_model(&self) -> String {
        self.chain.active_provider().to_string()
    }
}
