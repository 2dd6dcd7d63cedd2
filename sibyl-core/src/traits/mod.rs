//! Boundary traits between the workspace crates and external collaborators.

mod embedding;
mod generation;
mod store;

pub use embedding::IEmbeddingProvider;
pub use generation::IAnswerGenerator;
pub use store::IRecordStore;
