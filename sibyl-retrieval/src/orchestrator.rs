//! The retrieval orchestrator.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use sibyl_core::config::SibylConfig;
use sibyl_core::errors::{SibylError, SibylResult};
use sibyl_core::models::{
    AnswerRecord, AskOutcome, Passage, Provenance, QuestionRecord, RecordId, Reference,
    RetrievalTrace, TraceEntry,
};
use sibyl_core::traits::IRecordStore;
use sibyl_embeddings::{EmbeddingEngine, EmbeddingOutcome};
use sibyl_generation::GenerationEngine;
use sibyl_index::{IndexSynchronizer, SharedVectorIndex};
use tracing::{debug, info, warn};

/// Result of the direct embedding utility surface.
#[derive(Debug, Clone)]
pub struct EmbeddedTexts {
    pub vectors: Vec<Vec<f32>>,
    pub dim: usize,
    pub model: String,
    pub provenance: Provenance,
}

/// Composes the index, synchronizer, providers, and backing store into the
/// answer workflow. One instance per process, constructed at startup with
/// its collaborators injected.
pub struct RetrievalOrchestrator {
    index: SharedVectorIndex,
    synchronizer: IndexSynchronizer,
    embeddings: EmbeddingEngine,
    generation: GenerationEngine,
    store: Arc<dyn IRecordStore>,
    top_k: usize,
}

impl RetrievalOrchestrator {
    /// Build the orchestrator from config plus the injected index and store.
    pub fn new(
        config: &SibylConfig,
        index: SharedVectorIndex,
        store: Arc<dyn IRecordStore>,
    ) -> Self {
        Self {
            index,
            synchronizer: IndexSynchronizer::new(),
            embeddings: EmbeddingEngine::new(&config.embedding),
            generation: GenerationEngine::new(&config.generation),
            store,
            top_k: config.retrieval.top_k,
        }
    }

    /// Build from explicit parts. Used by tests that bring their own
    /// engines or sync policy.
    pub fn with_parts(
        index: SharedVectorIndex,
        synchronizer: IndexSynchronizer,
        embeddings: EmbeddingEngine,
        generation: GenerationEngine,
        store: Arc<dyn IRecordStore>,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            synchronizer,
            embeddings,
            generation,
            store,
            top_k,
        }
    }

    /// Answer a question end to end and persist the exchange.
    ///
    /// Caller-input errors reject before any pipeline stage runs. Provider
    /// failures degrade to fallbacks and never surface here. The one fatal
    /// mid-pipeline condition is index persistence corruption during sync.
    pub fn ask(&self, question: &str, user: Option<&str>) -> SibylResult<AskOutcome> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SibylError::validation("question must not be empty"));
        }

        // 1. Repair drift before serving reads from the index.
        let rebuilt = self.synchronizer.ensure_in_sync(&self.index, self.store.as_ref())?;
        if rebuilt {
            debug!("index rebuilt before retrieval");
        }

        // 2–3. Embed the question and search.
        let (query, embedding_provenance) = self.embeddings.embed_one(question);
        let hits = self.index.search(&query, self.top_k)?;
        debug!(hits = hits.len(), top_k = self.top_k, "retrieval complete");

        // 4. Resolve hits to passages; ids with no passage are dropped.
        let ids: Vec<RecordId> = hits.iter().map(|h| h.record_id).collect();
        let passages = self.store.resolve_passages(&ids)?;
        let by_id: HashMap<RecordId, Passage> =
            passages.into_iter().map(|p| (p.record_id, p)).collect();

        let mut references = Vec::with_capacity(hits.len());
        let mut context = Vec::with_capacity(hits.len());
        for hit in &hits {
            match by_id.get(&hit.record_id) {
                Some(passage) => {
                    context.push(passage.text.clone());
                    references.push(Reference {
                        record_id: passage.record_id,
                        score: hit.score,
                        text: passage.text.clone(),
                        document_id: passage.document_id,
                        document_title: passage.document_title.clone(),
                    });
                }
                None => {
                    warn!(record_id = hit.record_id, "retrieved id has no passage, dropping");
                }
            }
        }

        // 5. Generate. Total: always yields an answer.
        let generated = self.generation.generate(question, &context);
        let answer_provenance = generated.provenance.clone();

        // 6–7. Assemble and persist atomically.
        let question_record = QuestionRecord {
            text: question.to_string(),
            user: user.map(str::to_string),
            trace: RetrievalTrace {
                top_k: self.top_k,
                retrieved: references
                    .iter()
                    .map(|r| TraceEntry {
                        record_id: r.record_id,
                        score: r.score,
                        document_id: r.document_id,
                    })
                    .collect(),
            },
            asked_at: Utc::now(),
        };
        let answer_record = AnswerRecord {
            text: generated.text,
            model: generated.model,
            references,
            meta: serde_json::json!({
                "embedding": &embedding_provenance,
                "generation": &answer_provenance,
                "usage": generated.usage,
            }),
        };
        self.store.persist_exchange(&question_record, &answer_record)?;

        info!(
            references = answer_record.references.len(),
            degraded = embedding_provenance.is_fallback() || answer_provenance.is_fallback(),
            "question answered"
        );

        Ok(AskOutcome {
            question: question_record,
            answer: answer_record,
            embedding_provenance,
            answer_provenance,
        })
    }

    /// Direct embedding utility: vectors, dimensionality, serving model.
    pub fn embed_texts(&self, texts: &[String]) -> SibylResult<EmbeddedTexts> {
        if texts.is_empty() {
            return Err(SibylError::validation("texts must not be empty"));
        }
        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(SibylError::validation("texts must not contain empty entries"));
        }

        let EmbeddingOutcome {
            vectors,
            provenance,
        } = self.embeddings.embed_texts(texts);
        Ok(EmbeddedTexts {
            dim: self.embeddings.dimensions(),
            model: provenance.model().to_string(),
            vectors,
            provenance,
        })
    }

    /// Ingestion-side path: embed passage texts and append them to the
    /// index. Returns the embedding outcome so the caller can persist the
    /// vectors as embedding records in the backing store; newly created
    /// records append, while updates and deletions are reflected by the
    /// synchronizer's next rebuild.
    pub fn index_passages(
        &self,
        items: &[(RecordId, String)],
    ) -> SibylResult<EmbeddingOutcome> {
        let texts: Vec<String> = items.iter().map(|(_, t)| t.clone()).collect();
        let outcome = self.embeddings.embed_texts(&texts);

        let ids: Vec<RecordId> = items.iter().map(|(id, _)| *id).collect();
        self.index.add(&ids, &outcome.vectors)?;

        info!(added = ids.len(), total = self.index.count(), "passages indexed");
        Ok(outcome)
    }

    /// The shared index handle, for status surfaces.
    pub fn index(&self) -> &SharedVectorIndex {
        &self.index
    }
}
