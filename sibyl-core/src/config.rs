//! Process configuration.
//!
//! Built once at startup (defaults, then environment overrides) and treated
//! as immutable for the process lifetime.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Remote embedding model identifier.
    pub model: String,
    /// Fixed dimensionality of every vector in the system.
    pub dim: usize,
    /// Remote API credential. `None` means fallback-only operation.
    pub api_key: Option<String>,
    /// OpenAI-compatible embeddings endpoint.
    pub endpoint: String,
    /// L1 embedding-cache capacity (entries).
    pub l1_cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: constants::DEFAULT_EMBEDDING_MODEL.to_string(),
            dim: constants::DEFAULT_EMBEDDING_DIM,
            api_key: None,
            endpoint: constants::DEFAULT_EMBEDDINGS_ENDPOINT.to_string(),
            l1_cache_size: constants::DEFAULT_L1_CACHE_SIZE,
        }
    }
}

/// Answer generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub api_key: Option<String>,
    /// OpenAI-compatible chat-completions endpoint.
    pub endpoint: String,
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: constants::DEFAULT_GENERATION_MODEL.to_string(),
            api_key: None,
            endpoint: constants::DEFAULT_CHAT_ENDPOINT.to_string(),
            temperature: constants::DEFAULT_TEMPERATURE,
        }
    }
}

/// Vector index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Location of the vector blob; the id-map sidecar lives at
    /// `<path>.map.json`.
    pub path: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_INDEX_PATH),
        }
    }
}

/// Retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Maximum number of passages retrieved per question.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: constants::DEFAULT_TOP_K,
        }
    }
}

/// Top-level configuration for the whole system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SibylConfig {
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
}

impl SibylConfig {
    /// Build a config from defaults, then apply environment overrides.
    ///
    /// No variables are required; absent ones keep their defaults. A single
    /// `SIBYL_API_KEY` credentials both remote providers.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SIBYL_EMBEDDING_MODEL") {
            cfg.embedding.model = v;
        }
        if let Some(dim) = env_parse::<usize>("SIBYL_EMBEDDING_DIM") {
            cfg.embedding.dim = dim;
        }
        if let Ok(v) = std::env::var("SIBYL_API_KEY") {
            if !v.is_empty() {
                cfg.embedding.api_key = Some(v.clone());
                cfg.generation.api_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("SIBYL_GENERATION_MODEL") {
            cfg.generation.model = v;
        }
        if let Some(t) = env_parse::<f32>("SIBYL_TEMPERATURE") {
            cfg.generation.temperature = t;
        }
        if let Ok(v) = std::env::var("SIBYL_INDEX_PATH") {
            cfg.index.path = PathBuf::from(v);
        }
        if let Some(k) = env_parse::<usize>("SIBYL_TOP_K") {
            cfg.retrieval.top_k = k;
        }

        cfg
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
