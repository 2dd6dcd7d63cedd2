//! # sibyl-retrieval
//!
//! End-to-end answering pipeline. A single linear state machine per
//! request: sync the index against the backing store, embed the question,
//! search, resolve hits to passages, generate an answer from them, and
//! persist the question/answer pair atomically. Provider stages degrade to
//! deterministic fallbacks instead of failing; only caller-input errors,
//! store errors, and index corruption surface to the caller.

pub mod orchestrator;
pub mod telemetry;

pub use orchestrator::{EmbeddedTexts, RetrievalOrchestrator};
