//! In-memory [`IRecordStore`] implementation plus corpus seeding helpers.
//!
//! Backs the integration suites across the workspace: deterministic,
//! no I/O, and inspectable (persisted exchanges can be read back).

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use sibyl_core::errors::{SibylResult, StoreError};
use sibyl_core::models::{AnswerRecord, EmbeddingRecord, Passage, QuestionRecord, RecordId};
use sibyl_core::traits::IRecordStore;

#[derive(Default)]
struct StoreState {
    passages: BTreeMap<RecordId, Passage>,
    embeddings: BTreeMap<RecordId, EmbeddingRecord>,
    exchanges: Vec<(QuestionRecord, AnswerRecord)>,
    fail_persist: bool,
}

/// Mutex-guarded in-memory record store.
#[derive(Default)]
pub struct InMemoryRecordStore {
    state: Mutex<StoreState>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a passage (a chunk of a document).
    pub fn seed_passage(
        &self,
        record_id: RecordId,
        document_id: i64,
        document_title: &str,
        text: &str,
        position: u32,
    ) {
        self.lock().passages.insert(
            record_id,
            Passage {
                record_id,
                text: text.to_string(),
                document_id,
                document_title: document_title.to_string(),
                position,
            },
        );
    }

    /// Seed an embedding record for an already-seeded passage.
    pub fn seed_embedding(&self, record: EmbeddingRecord) {
        self.lock().embeddings.insert(record.record_id, record);
    }

    /// Drop a passage, leaving any embedding record behind. Simulates a
    /// chunk deleted after indexing.
    pub fn remove_passage(&self, record_id: RecordId) {
        self.lock().passages.remove(&record_id);
    }

    /// Drop an embedding record. Changes the authoritative count, which the
    /// synchronizer should notice as drift.
    pub fn remove_embedding(&self, record_id: RecordId) {
        self.lock().embeddings.remove(&record_id);
    }

    /// Make the next `persist_exchange` calls fail, for atomicity tests.
    pub fn fail_persists(&self, fail: bool) {
        self.lock().fail_persist = fail;
    }

    /// Every exchange persisted so far, in order.
    pub fn exchanges(&self) -> Vec<(QuestionRecord, AnswerRecord)> {
        self.lock().exchanges.clone()
    }

    pub fn exchange_count(&self) -> usize {
        self.lock().exchanges.len()
    }
}

impl IRecordStore for InMemoryRecordStore {
    fn embedding_records(&self) -> SibylResult<Vec<EmbeddingRecord>> {
        Ok(self.lock().embeddings.values().cloned().collect())
    }

    fn embedding_count(&self) -> SibylResult<usize> {
        Ok(self.lock().embeddings.len())
    }

    fn resolve_passages(&self, ids: &[RecordId]) -> SibylResult<Vec<Passage>> {
        let state = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.passages.get(id).cloned())
            .collect())
    }

    fn persist_exchange(
        &self,
        question: &QuestionRecord,
        answer: &AnswerRecord,
    ) -> SibylResult<()> {
        let mut state = self.lock();
        if state.fail_persist {
            return Err(StoreError::PersistFailed {
                message: "simulated persist failure".to_string(),
            }
            .into());
        }
        state.exchanges.push((question.clone(), answer.clone()));
        Ok(())
    }
}
