/// Vector-index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Both persistence artifacts exist but disagree with each other.
    /// Fatal at startup; never silently repaired.
    #[error("corrupt index persistence: {details}")]
    CorruptPersistence { details: String },

    /// A vector's length does not match the index dimensionality.
    /// Rejected before any state is mutated.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// `add` was called with differing id and vector counts.
    #[error("id/vector count mismatch: {ids} ids, {vectors} vectors")]
    CountMismatch { ids: usize, vectors: usize },

    /// I/O failure while reading or writing the index artifacts.
    #[error("index persistence I/O: {message}")]
    Persistence { message: String },
}

impl From<std::io::Error> for IndexError {
    fn from(e: std::io::Error) -> Self {
        Self::Persistence {
            message: e.to_string(),
        }
    }
}
