//! Remote embedding provider for OpenAI-compatible `/v1/embeddings` APIs.

use serde::{Deserialize, Serialize};
use sibyl_core::errors::{EmbeddingError, SibylResult};
use sibyl_core::traits::IEmbeddingProvider;
use tracing::debug;

/// HTTP embedding provider. Vectors are propagated exactly as the service
/// returns them, in request order.
pub struct OpenAiEmbeddings {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    endpoint: String,
    dim: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl OpenAiEmbeddings {
    pub fn new(api_key: String, model: String, endpoint: String, dim: usize) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            model,
            endpoint,
            dim,
        }
    }
}

impl IEmbeddingProvider for OpenAiEmbeddings {
    fn embed_batch(&self, texts: &[String]) -> SibylResult<Vec<Vec<f32>>> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmbedRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .map_err(|e| EmbeddingError::RequestFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::RequestFailed {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let parsed: EmbedResponse =
            response.json().map_err(|e| EmbeddingError::RequestFailed {
                reason: format!("JSON parse error: {e}"),
            })?;

        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::EmptyResponse {
                expected: texts.len(),
                actual: parsed.data.len(),
            }
            .into());
        }

        debug!(count = texts.len(), model = %self.model, "remote embeddings fetched");
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimensions(&self) -> usize {
        self.dim
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}
