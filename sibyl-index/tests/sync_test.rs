//! Drift detection and repair against an in-memory record store.

use std::sync::atomic::{AtomicUsize, Ordering};

use sibyl_core::errors::SibylResult;
use sibyl_core::models::{AnswerRecord, EmbeddingRecord, Passage, QuestionRecord, RecordId};
use sibyl_core::traits::IRecordStore;
use sibyl_index::{IndexSynchronizer, SharedVectorIndex, SyncPolicy};
use tempfile::TempDir;
use test_fixtures::InMemoryRecordStore;

/// Delegating store that counts full-enumeration calls. `embedding_records`
/// is only ever called on the rebuild path, so its call count is the
/// rebuild count.
struct CountingStore {
    inner: InMemoryRecordStore,
    enumerations: AtomicUsize,
}

impl CountingStore {
    fn new(inner: InMemoryRecordStore) -> Self {
        Self {
            inner,
            enumerations: AtomicUsize::new(0),
        }
    }

    fn rebuild_pulls(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }
}

impl IRecordStore for CountingStore {
    fn embedding_records(&self) -> SibylResult<Vec<EmbeddingRecord>> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        self.inner.embedding_records()
    }

    fn embedding_count(&self) -> SibylResult<usize> {
        self.inner.embedding_count()
    }

    fn resolve_passages(&self, ids: &[RecordId]) -> SibylResult<Vec<Passage>> {
        self.inner.resolve_passages(ids)
    }

    fn persist_exchange(
        &self,
        question: &QuestionRecord,
        answer: &AnswerRecord,
    ) -> SibylResult<()> {
        self.inner.persist_exchange(question, answer)
    }
}

fn record(id: RecordId, vector: Vec<f32>) -> EmbeddingRecord {
    EmbeddingRecord {
        record_id: id,
        dim: vector.len(),
        vector,
        model: "test-model".to_string(),
    }
}

#[test]
fn drift_triggers_exactly_one_rebuild() {
    let dir = TempDir::new().unwrap();
    let index = SharedVectorIndex::open(2, dir.path().join("drift.index")).unwrap();

    // Index holds 3 records, the store holds 5.
    let store = InMemoryRecordStore::new();
    for id in 0..5 {
        store.seed_embedding(record(id, vec![id as f32 + 1.0, 1.0]));
    }
    index
        .add(
            &[0, 1, 2],
            &[vec![1.0, 1.0], vec![2.0, 1.0], vec![3.0, 1.0]],
        )
        .unwrap();
    let store = CountingStore::new(store);

    let synchronizer = IndexSynchronizer::new();
    let rebuilt = synchronizer.ensure_in_sync(&index, &store).unwrap();

    assert!(rebuilt);
    assert_eq!(store.rebuild_pulls(), 1, "exactly one rebuild pull");
    assert_eq!(index.count(), 5);

    // The repaired index serves searches over the full record set.
    let hits = index.search(&[5.0, 1.0], 5).unwrap();
    assert_eq!(hits.len(), 5);
}

#[test]
fn in_sync_index_is_left_alone() {
    let dir = TempDir::new().unwrap();
    let index = SharedVectorIndex::open(2, dir.path().join("insync.index")).unwrap();

    let store = InMemoryRecordStore::new();
    store.seed_embedding(record(1, vec![1.0, 0.0]));
    index.add(&[1], &[vec![1.0, 0.0]]).unwrap();
    let store = CountingStore::new(store);

    let synchronizer = IndexSynchronizer::new();
    let rebuilt = synchronizer.ensure_in_sync(&index, &store).unwrap();

    assert!(!rebuilt);
    assert_eq!(store.rebuild_pulls(), 0);
}

#[test]
fn repeated_sync_after_repair_does_nothing() {
    let dir = TempDir::new().unwrap();
    let index = SharedVectorIndex::open(2, dir.path().join("repeat.index")).unwrap();

    let store = InMemoryRecordStore::new();
    for id in 0..4 {
        store.seed_embedding(record(id, vec![1.0, id as f32]));
    }
    let store = CountingStore::new(store);

    let synchronizer = IndexSynchronizer::new();
    assert!(synchronizer.ensure_in_sync(&index, &store).unwrap());
    assert!(!synchronizer.ensure_in_sync(&index, &store).unwrap());
    assert_eq!(store.rebuild_pulls(), 1);
}

#[test]
fn deletion_in_store_is_repaired_by_rebuild() {
    let dir = TempDir::new().unwrap();
    let index = SharedVectorIndex::open(2, dir.path().join("delete.index")).unwrap();

    let store = InMemoryRecordStore::new();
    for id in 0..3 {
        store.seed_embedding(record(id, vec![1.0, id as f32]));
    }
    let synchronizer = IndexSynchronizer::new();
    synchronizer.ensure_in_sync(&index, &store).unwrap();
    assert_eq!(index.count(), 3);

    store.remove_embedding(1);
    assert!(synchronizer.ensure_in_sync(&index, &store).unwrap());
    assert_eq!(index.count(), 2);
    let remaining: Vec<i64> = index
        .search(&[1.0, 1.0], 10)
        .unwrap()
        .iter()
        .map(|h| h.record_id)
        .collect();
    assert!(!remaining.contains(&1));
}

#[test]
fn custom_policy_is_honored() {
    struct NeverRebuild;
    impl SyncPolicy for NeverRebuild {
        fn needs_rebuild(&self, _index_count: usize, _store_count: usize) -> bool {
            false
        }
    }

    let dir = TempDir::new().unwrap();
    let index = SharedVectorIndex::open(2, dir.path().join("policy.index")).unwrap();
    let store = InMemoryRecordStore::new();
    store.seed_embedding(record(1, vec![1.0, 0.0]));

    let synchronizer = IndexSynchronizer::with_policy(Box::new(NeverRebuild));
    assert!(!synchronizer.ensure_in_sync(&index, &store).unwrap());
    assert_eq!(index.count(), 0, "policy said no, index untouched");
}
