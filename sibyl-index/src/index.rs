//! The flat vector index: normalized storage, parallel id-map, brute-force
//! cosine search.

use std::path::{Path, PathBuf};

use sibyl_core::errors::IndexError;
use sibyl_core::models::{EmbeddingRecord, RecordId, SearchHit};
use tracing::{debug, info};

use crate::persistence::{self, LoadOutcome};

/// In-memory vector index with synchronous disk persistence.
///
/// Invariants, held after every mutation:
/// - every stored vector has L2 norm 1 (zero-norm inputs pass through
///   unchanged rather than dividing by zero);
/// - `id_map.len() == count()`, with position `i` in the id-map owning the
///   `i`-th stored vector.
#[derive(Debug)]
pub struct VectorIndex {
    dim: usize,
    path: PathBuf,
    /// Flat row-major storage, `count * dim` floats.
    storage: Vec<f32>,
    /// Record id for each stored vector, in insertion order.
    id_map: Vec<RecordId>,
}

impl VectorIndex {
    /// Load the index from `path`, or create an empty one (persisted
    /// immediately) when either artifact is missing.
    ///
    /// Both artifacts present but structurally inconsistent is fatal:
    /// `IndexError::CorruptPersistence`. Callers must surface it to the
    /// operator rather than rebuild over it.
    pub fn open(dim: usize, path: impl Into<PathBuf>) -> Result<Self, IndexError> {
        let path = path.into();
        match persistence::load(&path)? {
            LoadOutcome::Loaded {
                dim: stored_dim,
                storage,
                id_map,
            } => {
                if stored_dim != dim {
                    return Err(IndexError::CorruptPersistence {
                        details: format!(
                            "blob dimensionality {stored_dim} disagrees with configured {dim}"
                        ),
                    });
                }
                info!(count = id_map.len(), dim, path = %path.display(), "vector index opened");
                Ok(Self {
                    dim,
                    path,
                    storage,
                    id_map,
                })
            }
            LoadOutcome::Absent => {
                let index = Self {
                    dim,
                    path,
                    storage: Vec::new(),
                    id_map: Vec::new(),
                };
                index.persist()?;
                info!(dim, path = %index.path.display(), "empty vector index created");
                Ok(index)
            }
        }
    }

    /// Number of vectors currently stored.
    pub fn count(&self) -> usize {
        self.id_map.len()
    }

    /// Configured dimensionality.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Location of the vector blob on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append vectors to the index and extend the id-map, then persist.
    ///
    /// Empty input is a no-op and skips the persistence write. Dimension
    /// and count mismatches are rejected before any state changes.
    pub fn add(&mut self, ids: &[RecordId], vectors: &[Vec<f32>]) -> Result<(), IndexError> {
        if ids.len() != vectors.len() {
            return Err(IndexError::CountMismatch {
                ids: ids.len(),
                vectors: vectors.len(),
            });
        }
        if ids.is_empty() {
            return Ok(());
        }
        self.check_dims(vectors)?;

        for v in vectors {
            let mut row = v.clone();
            l2_normalize(&mut row);
            self.storage.extend_from_slice(&row);
        }
        self.id_map.extend_from_slice(ids);

        debug!(added = ids.len(), total = self.count(), "vectors added");
        self.persist()
    }

    /// Discard all storage and re-insert the given records in order, then
    /// persist. The only path that reflects updates and deletions.
    pub fn rebuild(&mut self, records: &[EmbeddingRecord]) -> Result<(), IndexError> {
        for r in records {
            if r.vector.len() != self.dim {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dim,
                    actual: r.vector.len(),
                });
            }
        }

        self.storage.clear();
        self.id_map.clear();
        self.storage.reserve(records.len() * self.dim);
        self.id_map.reserve(records.len());

        for r in records {
            let mut row = r.vector.clone();
            l2_normalize(&mut row);
            self.storage.extend_from_slice(&row);
            self.id_map.push(r.record_id);
        }

        info!(count = self.count(), "index rebuilt");
        self.persist()
    }

    /// Brute-force cosine search: normalize the query, inner product against
    /// every stored row, return the `top_k` best hits descending by score,
    /// ties broken by ascending storage position.
    ///
    /// An empty index or `top_k == 0` yields an empty result.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>, IndexError> {
        if query.len() != self.dim {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim,
                actual: query.len(),
            });
        }
        if self.count() == 0 || top_k == 0 {
            return Ok(Vec::new());
        }

        let mut q = query.to_vec();
        l2_normalize(&mut q);

        let mut scored: Vec<(usize, f32)> = self
            .storage
            .chunks_exact(self.dim)
            .enumerate()
            .map(|(pos, row)| (pos, dot(&q, row)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(pos, score)| SearchHit {
                record_id: self.id_map[pos],
                score,
            })
            .collect())
    }

    /// Record ids in insertion order. Exposed for tests and diagnostics.
    pub fn id_map(&self) -> &[RecordId] {
        &self.id_map
    }

    fn check_dims(&self, vectors: &[Vec<f32>]) -> Result<(), IndexError> {
        for v in vectors {
            if v.len() != self.dim {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dim,
                    actual: v.len(),
                });
            }
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), IndexError> {
        persistence::persist(&self.path, self.dim, &self.storage, &self.id_map)
    }
}

/// L2-normalize in place. Zero-norm vectors pass through unchanged.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
