//! # sibyl-index
//!
//! In-memory, disk-persisted vector similarity index plus the machinery
//! that keeps it consistent with the backing record store.
//!
//! The index is flat: brute-force inner product over L2-normalized vectors,
//! O(n·dim) per search. Persistence is two co-located artifacts rewritten
//! together on every mutation: a binary vector blob and a JSON id-map
//! sidecar.

pub mod index;
pub mod persistence;
pub mod shared;
pub mod sync;

pub use index::VectorIndex;
pub use shared::SharedVectorIndex;
pub use sync::{CountMismatchPolicy, IndexSynchronizer, SyncPolicy};
