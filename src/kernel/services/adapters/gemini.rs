//! Gemini `generateContent` client (blocking; run it off the UI thread).

use crate::kernel::services::ports::{
    AssistantSettings, GenerationError, GenerationRequest, GenerationResponse, TextGenerator,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    agent: ureq::Agent,
    settings: AssistantSettings,
}

impl GeminiClient {
    pub fn new(settings: AssistantSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build();
        Self { agent, settings }
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }
}

pub(crate) fn request_body(request: &GenerationRequest) -> serde_json::Value {
    json!({
        "systemInstruction": { "parts": [{ "text": request.system_role }] },
        "contents": [{ "role": "user", "parts": [{ "text": request.instruction }] }],
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; empty when the model returned none.
    pub(crate) fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub(crate) fn remote_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("request failed with status {status}"))
}

impl TextGenerator for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        let Some(api_key) = self.settings.api_key() else {
            return Err(GenerationError::MissingCredential(
                self.settings.api_key_hint(),
            ));
        };

        tracing::debug!(model = %self.settings.model, "sending generation request");
        let response = self
            .agent
            .post(&self.endpoint_url())
            .set(API_KEY_HEADER, &api_key)
            .send_json(request_body(request));

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(GenerationError::Remote {
                    status,
                    message: remote_message(status, &body),
                });
            }
            Err(ureq::Error::Transport(e)) => {
                return Err(GenerationError::Transport(e.to_string()));
            }
        };

        let parsed: GenerateContentResponse = response
            .into_json()
            .map_err(|e| GenerationError::Decode(e.to_string()))?;
        Ok(GenerationResponse {
            text: parsed.text(),
        })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/gemini.rs"]
mod tests;
