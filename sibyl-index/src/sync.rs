//! Drift detection and repair between the index and the backing store.
//!
//! The default policy is deliberately coarse: any disagreement between
//! `index.count()` and the store's embedding-record count triggers a full
//! rebuild. Correctness-first — rebuild cost is linear in corpus size.
//! Known limitation: content changes to an existing record with an unchanged
//! count are invisible to it. The policy seam exists so a content-hash or
//! versioned incremental policy can be substituted without touching the
//! index.

use sibyl_core::errors::SibylResult;
use sibyl_core::traits::IRecordStore;
use tracing::{debug, info};

use crate::shared::SharedVectorIndex;

/// Decides whether the index has drifted from the backing store.
pub trait SyncPolicy: Send + Sync {
    fn needs_rebuild(&self, index_count: usize, store_count: usize) -> bool;
}

/// Default policy: rebuild on any count mismatch.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountMismatchPolicy;

impl SyncPolicy for CountMismatchPolicy {
    fn needs_rebuild(&self, index_count: usize, store_count: usize) -> bool {
        index_count != store_count
    }
}

/// Keeps a [`SharedVectorIndex`] consistent with the backing store.
/// Invoked at the start of every retrieval request (read-before-use).
pub struct IndexSynchronizer {
    policy: Box<dyn SyncPolicy>,
}

impl Default for IndexSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSynchronizer {
    /// Synchronizer with the default count-mismatch policy.
    pub fn new() -> Self {
        Self {
            policy: Box::new(CountMismatchPolicy),
        }
    }

    /// Synchronizer with a custom drift policy.
    pub fn with_policy(policy: Box<dyn SyncPolicy>) -> Self {
        Self { policy }
    }

    /// Check for drift and repair it with at most one full rebuild.
    /// Returns whether a rebuild happened.
    pub fn ensure_in_sync(
        &self,
        index: &SharedVectorIndex,
        store: &dyn IRecordStore,
    ) -> SibylResult<bool> {
        let store_count = store.embedding_count()?;
        let index_count = index.count();

        if !self.policy.needs_rebuild(index_count, store_count) {
            debug!(count = index_count, "index in sync with store");
            return Ok(false);
        }

        info!(index_count, store_count, "index drift detected, rebuilding");
        let records = store.embedding_records()?;
        index.rebuild(&records)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_mismatch_policy() {
        let p = CountMismatchPolicy;
        assert!(!p.needs_rebuild(3, 3));
        assert!(p.needs_rebuild(3, 5));
        assert!(p.needs_rebuild(5, 3));
        assert!(!p.needs_rebuild(0, 0));
    }
}
