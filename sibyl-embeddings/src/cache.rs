//! L1 in-memory embedding cache.
//!
//! Keys are `model:blake3(text)` so vectors from different providers never
//! collide. TinyLFU admission, idle TTL of one hour.

use std::time::Duration;

use moka::sync::Cache;

/// In-memory embedding cache.
pub struct EmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { cache }
    }

    /// Cache key for a text under a given model.
    pub fn key(model: &str, text: &str) -> String {
        format!("{model}:{}", blake3::hash(text.as_bytes()).to_hex())
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, vector: Vec<f32>) {
        self.cache.insert(key, vector);
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
