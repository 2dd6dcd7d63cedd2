use serde::{Deserialize, Serialize};

use super::{AnswerRecord, Provenance, QuestionRecord};

/// What an answer generator returns: the text plus where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedAnswer {
    pub text: String,
    pub model: String,
    pub provenance: Provenance,
    /// Raw usage metadata from the remote provider, when available.
    pub usage: Option<serde_json::Value>,
}

/// The end-to-end result of one `ask` request, as handed back to the caller
/// after the question/answer pair has been persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskOutcome {
    pub question: QuestionRecord,
    pub answer: AnswerRecord,
    /// Degradation mode of the embedding stage.
    pub embedding_provenance: Provenance,
    /// Degradation mode of the generation stage.
    pub answer_provenance: Provenance,
}

impl AskOutcome {
    /// Whether any stage of the pipeline ran in fallback mode. This is the
    /// health signal a status boundary can report.
    pub fn degraded(&self) -> bool {
        self.embedding_provenance.is_fallback() || self.answer_provenance.is_fallback()
    }
}
