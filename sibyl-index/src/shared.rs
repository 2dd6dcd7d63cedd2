//! Shared handle for the process-wide index instance.
//!
//! Single-writer/multi-reader discipline: `search` and `count` take the read
//! lock; `add` and `rebuild` hold the write lock for their full duration,
//! including the synchronous persistence write. The handle is constructed at
//! startup and injected wherever it is needed — there is no lazily
//! initialized global.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sibyl_core::errors::IndexError;
use sibyl_core::models::{EmbeddingRecord, RecordId, SearchHit};

use crate::index::VectorIndex;

/// Cloneable, thread-safe handle to a [`VectorIndex`].
#[derive(Clone)]
pub struct SharedVectorIndex {
    inner: Arc<RwLock<VectorIndex>>,
}

impl SharedVectorIndex {
    /// Wrap an already-opened index.
    pub fn new(index: VectorIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    /// Open the index at `path` and wrap it.
    pub fn open(dim: usize, path: impl Into<std::path::PathBuf>) -> Result<Self, IndexError> {
        Ok(Self::new(VectorIndex::open(dim, path)?))
    }

    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>, IndexError> {
        self.read().search(query, top_k)
    }

    pub fn add(&self, ids: &[RecordId], vectors: &[Vec<f32>]) -> Result<(), IndexError> {
        self.write().add(ids, vectors)
    }

    pub fn rebuild(&self, records: &[EmbeddingRecord]) -> Result<(), IndexError> {
        self.write().rebuild(records)
    }

    pub fn count(&self) -> usize {
        self.read().count()
    }

    pub fn dim(&self) -> usize {
        self.read().dim()
    }

    // A poisoned lock means a writer panicked mid-mutation; the in-memory
    // state is still structurally valid (appends complete before persist),
    // so we recover the guard rather than propagate the poison.
    fn read(&self) -> RwLockReadGuard<'_, VectorIndex> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VectorIndex> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
