//! Gemini backend using the Google Generative Language HTTP API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::GenerativeBackend;
use crate::{BackendError, Result};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Backend that sends prompts to the Gemini generateContent endpoint.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    /// Create a backend for the default `gemini-pro` model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: "gemini-pro".to_string(),
        }
    }

    /// Use a different Gemini model variant.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait::async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!("Sending {} char prompt to {}", prompt.len(), self.model);

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Http(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(BackendError::EmptyCompletion);
        }

        debug!("Received {} char completion", text.len());
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn request_wire_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Analyze this receipt".to_string(),
                }],
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "Analyze this receipt"}]}]
            })
        );
    }

    #[test]
    fn response_first_candidate_text() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"title\": \"Lunch\"}"}]}}]}"#,
        )
        .unwrap();

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        assert_eq!(text, r#"{"title": "Lunch"}"#);
    }

    #[test]
    fn response_without_candidates() {
        let body: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(body.candidates.is_empty());
    }

    #[test]
    fn endpoint_includes_model_and_key() {
        let backend = GeminiBackend::new("secret").with_model("gemini-1.5-flash");
        assert_eq!(
            backend.endpoint(),
            format!("{API_BASE}/gemini-1.5-flash:generateContent?key=secret")
        );
    }
}
