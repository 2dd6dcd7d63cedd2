//! Error taxonomy for the Sibyl workspace.
//!
//! Per-subsystem enums, aggregated into [`SibylError`]. Caller-input errors
//! reject immediately; provider failures are recovered inside the engines and
//! never surface here; persistence corruption is the one fatal condition.

mod embedding_error;
mod generation_error;
mod index_error;
mod store_error;

pub use embedding_error::EmbeddingError;
pub use generation_error::GenerationError;
pub use index_error::IndexError;
pub use store_error::StoreError;

/// Convenience alias used across the workspace.
pub type SibylResult<T> = Result<T, SibylError>;

/// Top-level error for the Sibyl system.
#[derive(Debug, thiserror::Error)]
pub enum SibylError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed caller input, rejected before any pipeline stage runs.
    #[error("validation failed: {message}")]
    Validation { message: String },
}

impl SibylError {
    /// Shorthand for a caller-input validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
