//! Deterministic pseudo-embedding fallback.
//!
//! Derives a vector from the blake3 digest of the text: the 32 digest bytes
//! are cycled to fill `dim`, each byte mapped linearly from [0,255] to
//! [-1,1], then L2-normalized. Not semantically meaningful, but stable —
//! the same text yields a bit-identical vector across calls and processes,
//! with no external state. This is what lets the system operate, and be
//! tested, without network access.

use sibyl_core::constants::FALLBACK_MODEL_ID;
use sibyl_core::errors::SibylResult;
use sibyl_core::traits::IEmbeddingProvider;

/// Digest-based fallback embedding provider. Always available.
pub struct DigestFallback {
    dim: usize,
}

impl DigestFallback {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// Compute the fallback vector for one text.
    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        let digest = blake3::hash(text.as_bytes());
        let bytes = digest.as_bytes();

        let mut v: Vec<f32> = (0..self.dim)
            .map(|i| (bytes[i % bytes.len()] as f32 / 255.0) * 2.0 - 1.0)
            .collect();

        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl IEmbeddingProvider for DigestFallback {
    fn embed_batch(&self, texts: &[String]) -> SibylResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dim
    }

    fn name(&self) -> &str {
        FALLBACK_MODEL_ID
    }

    fn is_available(&self) -> bool {
        true
    }
}
