use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RecordId, Reference};

/// An embedding row enumerated from the backing store. Used by full index
/// rebuilds and by the drift check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub record_id: RecordId,
    pub vector: Vec<f32>,
    pub model: String,
    pub dim: usize,
}

/// One retrieved hit as recorded in the question's retrieval trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub record_id: RecordId,
    pub score: f32,
    pub document_id: i64,
}

/// Debugging trace of what retrieval saw for a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalTrace {
    pub top_k: usize,
    pub retrieved: Vec<TraceEntry>,
}

/// A question to be persisted alongside its answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub text: String,
    /// Opaque identity of the asking user, if known.
    pub user: Option<String>,
    pub trace: RetrievalTrace,
    pub asked_at: DateTime<Utc>,
}

/// A generated answer to be persisted with its question as one atomic unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub text: String,
    pub model: String,
    pub references: Vec<Reference>,
    /// Free-form provenance metadata: token usage, fallback reason, etc.
    pub meta: serde_json::Value,
}
