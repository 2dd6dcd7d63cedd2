//! # sibyl-embeddings
//!
//! Turns text into fixed-dimension vectors. A remote OpenAI-compatible
//! provider sits in front of a deterministic digest fallback; any remote
//! failure degrades to the fallback and the result carries a tagged
//! [`Provenance`](sibyl_core::models::Provenance) saying so. From the
//! caller's perspective, embedding never fails.

pub mod cache;
pub mod chain;
pub mod engine;
pub mod providers;

pub use engine::{EmbeddingEngine, EmbeddingOutcome};
