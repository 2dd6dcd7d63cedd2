use serde::{Deserialize, Serialize};

use super::RecordId;

/// One nearest-neighbor hit: record id plus cosine similarity score.
/// Search results are ordered descending by score, ties broken by
/// ascending storage position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub record_id: RecordId,
    pub score: f32,
}

/// A fully resolved reference attached to an answer, in retrieval order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub record_id: RecordId,
    pub score: f32,
    pub text: String,
    pub document_id: i64,
    pub document_title: String,
}
