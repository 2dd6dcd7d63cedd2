/// Errors surfaced by the backing record store collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store query failed: {message}")]
    QueryFailed { message: String },

    #[error("atomic persist failed: {message}")]
    PersistFailed { message: String },
}
