//! System-wide default values. Overridable via config.

/// Default embedding dimensionality (matches text-embedding-3-small).
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Default remote embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default remote generation model identifier.
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";

/// Default OpenAI-compatible embeddings endpoint.
pub const DEFAULT_EMBEDDINGS_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

/// Default OpenAI-compatible chat-completions endpoint.
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default on-disk location of the vector blob. The id-map sidecar lives
/// next to it at `<path>.map.json`.
pub const DEFAULT_INDEX_PATH: &str = "sibyl.index";

/// Default number of passages retrieved per question.
pub const DEFAULT_TOP_K: usize = 5;

/// Default sampling temperature for answer generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default L1 embedding-cache capacity (entries).
pub const DEFAULT_L1_CACHE_SIZE: u64 = 4096;

/// Model identifier reported by deterministic local fallbacks.
pub const FALLBACK_MODEL_ID: &str = "fallback-local";

/// How many leading characters of the first context passage the fallback
/// answer template echoes.
pub const FALLBACK_SNIPPET_LEN: usize = 200;
