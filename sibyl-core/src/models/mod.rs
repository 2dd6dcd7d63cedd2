//! Data model shared across the workspace.

mod outcome;
mod passage;
mod provenance;
mod records;
mod search;

pub use outcome::{AskOutcome, GeneratedAnswer};
pub use passage::Passage;
pub use provenance::{FallbackReason, Provenance};
pub use records::{AnswerRecord, EmbeddingRecord, QuestionRecord, RetrievalTrace, TraceEntry};
pub use search::{Reference, SearchHit};

/// Stable identifier of an indexed text passage (a chunk in the backing
/// store). Opaque to the index; position in the id-map is what matters.
pub type RecordId = i64;
