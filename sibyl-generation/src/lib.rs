//! # sibyl-generation
//!
//! Turns a question plus context passages into an answer. A remote
//! chat-completions provider runs under a fixed system instruction; when no
//! credential is configured or the remote call fails, a deterministic local
//! template answers instead. Like embedding, this boundary is total: the
//! orchestrator always gets an answer, tagged with its provenance.

pub mod engine;
pub mod providers;

pub use engine::GenerationEngine;
