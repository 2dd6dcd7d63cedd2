use serde::{Deserialize, Serialize};

use super::RecordId;

/// A resolved text passage: the chunk text plus its owning document.
/// Produced by the backing store when resolving search hits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub record_id: RecordId,
    pub text: String,
    pub document_id: i64,
    pub document_title: String,
    /// Ordinal position of this chunk within its document.
    pub position: u32,
}
