//! # sibyl-core
//!
//! Foundation crate for the Sibyl retrieval-augmented Q&A system.
//! Defines the shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SibylConfig;
pub use errors::{SibylError, SibylResult};
pub use models::{
    AnswerRecord, EmbeddingRecord, FallbackReason, GeneratedAnswer, Passage, Provenance,
    QuestionRecord, RecordId, Reference, RetrievalTrace, SearchHit,
};
