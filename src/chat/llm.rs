use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub(crate) const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Tried in order; only a "model not found" answer moves on to the next.
pub(crate) const CANDIDATE_MODELS: &[&str] = &[
    "models/gemini-2.5-flash",
    "models/gemini-2.0-flash",
    "models/gemini-flash-latest",
    "models/gemini-2.5-pro",
    "models/gemini-2.0-flash-exp",
    "models/gemini-pro-latest",
];

#[derive(Debug, thiserror::Error)]
pub(crate) enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("model returned no text")]
    EmptyResponse,
    #[error("no models configured")]
    NoModels,
}

impl LlmError {
    fn is_model_not_found(&self) -> bool {
        match self {
            Self::Api { status, body } => {
                *status == reqwest::StatusCode::NOT_FOUND
                    || body.contains("NOT_FOUND")
                    || body.contains("not found")
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Generation {
    pub(crate) text: String,
    pub(crate) model: String,
}

/// Anything that turns a prompt into text.
pub(crate) trait LanguageModel {
    fn generate(&self, prompt: &str) -> Result<Generation, LlmError>;
}

pub(crate) struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
}

impl GeminiClient {
    pub(crate) fn new(api_key: String, base_url: Option<String>) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            models: CANDIDATE_MODELS.iter().map(|m| m.to_string()).collect(),
        })
    }

    fn generate_with(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/{}:generateContent", self.base_url, model);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let reply: GenerateResponse = response.json()?;
        reply.text().ok_or(LlmError::EmptyResponse)
    }
}

impl LanguageModel for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<Generation, LlmError> {
        let mut last_err = None;
        for model in &self.models {
            match self.generate_with(model, prompt) {
                Ok(text) => {
                    tracing::info!(model = %model, chars = text.len(), "gemini answered");
                    return Ok(Generation {
                        text,
                        model: model.clone(),
                    });
                }
                Err(e) if e.is_model_not_found() => {
                    tracing::warn!(model = %model, "model not available, trying next");
                    last_err = Some(e);
                }
                Err(e) => {
                    tracing::error!(model = %model, error = %e, "gemini request failed");
                    return Err(e);
                }
            }
        }
        Err(last_err.unwrap_or(LlmError::NoModels))
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
#[path = "llm_tests.rs"]
mod tests;
