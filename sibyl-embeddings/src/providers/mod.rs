//! Embedding provider implementations.

mod digest_fallback;
mod openai;

pub use digest_fallback::DigestFallback;
pub use openai::OpenAiEmbeddings;
