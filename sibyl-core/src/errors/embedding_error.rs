/// Embedding-provider errors. These are recovered inside the embedding
/// engine (converted to fallback output) and never cross the orchestrator
/// boundary.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("embedding response missing vectors: expected {expected}, got {actual}")]
    EmptyResponse { expected: usize, actual: usize },
}
