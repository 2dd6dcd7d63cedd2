//! Remote answer generator for OpenAI-compatible chat-completions APIs.

use serde::{Deserialize, Serialize};
use sibyl_core::errors::{GenerationError, SibylResult};
use sibyl_core::models::{GeneratedAnswer, Provenance};
use sibyl_core::traits::IAnswerGenerator;
use tracing::debug;

use super::SYSTEM_PROMPT;

/// HTTP chat-completions provider.
pub struct OpenAiChat {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiChat {
    pub fn new(api_key: String, model: String, endpoint: String, temperature: f32) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            model,
            endpoint,
            temperature,
        }
    }

    fn user_content(question: &str, context: &[String]) -> String {
        format!(
            "Question: {question}\n\nContext:\n{}",
            context.join("\n\n---\n\n")
        )
    }
}

impl IAnswerGenerator for OpenAiChat {
    fn generate(&self, question: &str, context: &[String]) -> SibylResult<GeneratedAnswer> {
        let content = Self::user_content(question, context);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: &content,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| GenerationError::RequestFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::RequestFailed {
                reason: format!("API returned {status}: {body}"),
            }
            .into());
        }

        let parsed: ChatResponse =
            response.json().map_err(|e| GenerationError::RequestFailed {
                reason: format!("JSON parse error: {e}"),
            })?;

        let choice = parsed.choices.into_iter().next().ok_or(GenerationError::EmptyResponse)?;
        let text = choice.message.content.unwrap_or_default();

        debug!(model = %self.model, "remote answer generated");
        Ok(GeneratedAnswer {
            text,
            model: self.model.clone(),
            provenance: Provenance::Live {
                model: self.model.clone(),
            },
            usage: parsed.usage,
        })
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}
