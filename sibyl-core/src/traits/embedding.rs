use crate::errors::SibylResult;

/// Embedding generation provider.
///
/// Implementations may fail (remote providers); the embedding engine wraps a
/// chain of these and converts failure into deterministic fallback output.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one vector per input, preserving order.
    /// Every returned vector has length `dimensions()`.
    fn embed_batch(&self, texts: &[String]) -> SibylResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Model identifier reported in provenance metadata.
    fn name(&self) -> &str;

    /// Whether this provider is currently usable (e.g. has a credential).
    fn is_available(&self) -> bool;
}
