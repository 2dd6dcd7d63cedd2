use crate::errors::SibylResult;
use crate::models::{AnswerRecord, EmbeddingRecord, Passage, QuestionRecord, RecordId};

/// The backing record store collaborator.
///
/// The relational storage of documents, chunks, questions, and answers is
/// external to this workspace; this trait is the whole surface the pipeline
/// consumes from it.
pub trait IRecordStore: Send + Sync {
    /// Enumerate every embedding record. Used by full index rebuilds.
    fn embedding_records(&self) -> SibylResult<Vec<EmbeddingRecord>>;

    /// Authoritative count of embedding records. Used by the drift check.
    fn embedding_count(&self) -> SibylResult<usize>;

    /// Resolve record ids to passages. Ids with no matching passage are
    /// simply absent from the result; the caller drops them.
    fn resolve_passages(&self, ids: &[RecordId]) -> SibylResult<Vec<Passage>>;

    /// Persist a question and its answer as one atomic unit: both written,
    /// or neither.
    fn persist_exchange(
        &self,
        question: &QuestionRecord,
        answer: &AnswerRecord,
    ) -> SibylResult<()>;
}
