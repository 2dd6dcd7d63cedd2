/// Answer-generation errors. Recovered inside the generation engine the same
/// way embedding errors are; the orchestrator only ever sees a result.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("generation request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("generation response contained no choices")]
    EmptyResponse,
}
