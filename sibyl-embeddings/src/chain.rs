//! Provider fallback chain with tagged provenance.
//!
//! Tries providers in priority order. Fallback is modeled as data, not a
//! thrown-and-caught exception: the result carries a [`Provenance`] naming
//! the serving model and, when degraded, the reason.

use sibyl_core::constants::FALLBACK_MODEL_ID;
use sibyl_core::errors::{EmbeddingError, SibylResult};
use sibyl_core::models::{FallbackReason, Provenance};
use sibyl_core::traits::IEmbeddingProvider;
use tracing::warn;

struct ChainEntry {
    provider: Box<dyn IEmbeddingProvider>,
    /// Whether serving from this entry counts as degraded operation.
    is_fallback: bool,
}

/// Ordered provider chain. The last entry is expected to be a local,
/// infallible fallback so the chain as a whole never fails in practice.
#[derive(Default)]
pub struct ProviderChain {
    entries: Vec<ChainEntry>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primary (non-degraded) provider.
    pub fn push_primary(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.entries.push(ChainEntry {
            provider,
            is_fallback: false,
        });
    }

    /// Add a fallback provider. Results from it are tagged degraded.
    pub fn push_fallback(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.entries.push(ChainEntry {
            provider,
            is_fallback: true,
        });
    }

    fn active_entry(&self) -> Option<&ChainEntry> {
        self.entries.iter().find(|e| e.provider.is_available())
    }

    /// Name of the provider that would serve the next request.
    pub fn active_provider(&self) -> &str {
        self.active_entry()
            .map(|e| e.provider.name())
            .unwrap_or("none")
    }

    /// Provenance of a result served by the active entry without invoking
    /// it, e.g. for cache hits. The tag comes from the entry's fallback
    /// flag, never from its name. When the active entry is a fallback,
    /// every earlier entry is unavailable, so the reason is the missing
    /// credential.
    pub fn active_provenance(&self) -> Provenance {
        match self.active_entry() {
            Some(entry) if entry.is_fallback => Provenance::Fallback {
                model: entry.provider.name().to_string(),
                reason: FallbackReason::NoCredential,
            },
            Some(entry) => Provenance::Live {
                model: entry.provider.name().to_string(),
            },
            None => Provenance::Fallback {
                model: FALLBACK_MODEL_ID.to_string(),
                reason: FallbackReason::NoCredential,
            },
        }
    }

    /// Whether any primary provider is configured at all.
    pub fn has_primary(&self) -> bool {
        self.entries.iter().any(|e| !e.is_fallback)
    }

    /// Embed a batch via the first provider that succeeds.
    ///
    /// The provenance records which provider served and why earlier ones
    /// were passed over: no credential (unavailable or absent primary) or
    /// the first recorded provider error.
    pub fn embed_batch(&self, texts: &[String]) -> SibylResult<(Vec<Vec<f32>>, Provenance)> {
        let mut reason: Option<FallbackReason> = None;

        for entry in &self.entries {
            if !entry.provider.is_available() {
                reason.get_or_insert(FallbackReason::NoCredential);
                continue;
            }

            match entry.provider.embed_batch(texts) {
                Ok(vectors) => {
                    let provenance = if entry.is_fallback {
                        Provenance::Fallback {
                            model: entry.provider.name().to_string(),
                            reason: reason.unwrap_or(FallbackReason::NoCredential),
                        }
                    } else {
                        Provenance::Live {
                            model: entry.provider.name().to_string(),
                        }
                    };
                    return Ok((vectors, provenance));
                }
                Err(e) => {
                    warn!(
                        provider = entry.provider.name(),
                        error = %e,
                        "embedding provider failed, trying next in chain"
                    );
                    reason.get_or_insert(FallbackReason::ProviderError(e.to_string()));
                }
            }
        }

        Err(EmbeddingError::ProviderUnavailable {
            provider: format!("all {} providers exhausted", self.entries.len()),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;
    impl IEmbeddingProvider for FailingProvider {
        fn embed_batch(&self, _texts: &[String]) -> SibylResult<Vec<Vec<f32>>> {
            Err(EmbeddingError::RequestFailed {
                reason: "mock failure".to_string(),
            }
            .into())
        }
        fn dimensions(&self) -> usize {
            4
        }
        fn name(&self) -> &str {
            "failing-mock"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    struct FixedProvider {
        name: String,
    }
    impl IEmbeddingProvider for FixedProvider {
        fn embed_batch(&self, texts: &[String]) -> SibylResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0, 0.0, 0.0]).collect())
        }
        fn dimensions(&self) -> usize {
            4
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    fn texts() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn primary_success_is_live() {
        let mut chain = ProviderChain::new();
        chain.push_primary(Box::new(FixedProvider {
            name: "remote".to_string(),
        }));
        chain.push_fallback(Box::new(FixedProvider {
            name: "local".to_string(),
        }));

        let (vectors, provenance) = chain.embed_batch(&texts()).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(
            provenance,
            Provenance::Live {
                model: "remote".to_string()
            }
        );
    }

    #[test]
    fn primary_error_degrades_with_reason() {
        let mut chain = ProviderChain::new();
        chain.push_primary(Box::new(FailingProvider));
        chain.push_fallback(Box::new(FixedProvider {
            name: "local".to_string(),
        }));

        let (_, provenance) = chain.embed_batch(&texts()).unwrap();
        match provenance {
            Provenance::Fallback { model, reason } => {
                assert_eq!(model, "local");
                assert!(matches!(reason, FallbackReason::ProviderError(_)));
            }
            other => panic!("expected fallback provenance, got {other:?}"),
        }
    }

    #[test]
    fn missing_primary_means_no_credential() {
        let mut chain = ProviderChain::new();
        chain.push_fallback(Box::new(FixedProvider {
            name: "local".to_string(),
        }));

        let (_, provenance) = chain.embed_batch(&texts()).unwrap();
        assert_eq!(
            provenance,
            Provenance::Fallback {
                model: "local".to_string(),
                reason: FallbackReason::NoCredential,
            }
        );
    }

    #[test]
    fn empty_chain_errors() {
        let chain = ProviderChain::new();
        assert!(chain.embed_batch(&texts()).is_err());
    }

    #[test]
    fn active_provenance_follows_entry_flag_not_name() {
        let mut degraded = ProviderChain::new();
        degraded.push_fallback(Box::new(FixedProvider {
            name: "digest-v2".to_string(),
        }));
        assert_eq!(
            degraded.active_provenance(),
            Provenance::Fallback {
                model: "digest-v2".to_string(),
                reason: FallbackReason::NoCredential,
            }
        );

        let mut live = ProviderChain::new();
        live.push_primary(Box::new(FixedProvider {
            name: "remote".to_string(),
        }));
        assert_eq!(
            live.active_provenance(),
            Provenance::Live {
                model: "remote".to_string(),
            }
        );
    }
}
