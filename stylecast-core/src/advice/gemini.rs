use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AdviceError, AdviceGenerator};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    http: Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ErrorDetails>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: Option<String>,
}

#[async_trait]
impl AdviceGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AdviceError> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(AdviceError::MissingApiKey);
        }

        let url = format!("{BASE_URL}/{}:generateContent?key={api_key}", self.model);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt.to_string() }],
                role: Some("user".to_string()),
            }],
            generation_config: GenerationConfig { temperature: 0.8 },
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "requesting Gemini");

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(AdviceError::RateLimited);
        }
        if !status.is_success() {
            return Err(AdviceError::InvalidResponse(status.as_u16()));
        }

        let decoded: GenerateResponse = response.json().await?;

        if let Some(text) = decoded
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.trim().to_string())
        {
            if text.is_empty() {
                return Err(AdviceError::Empty);
            }
            return Ok(text);
        }

        if let Some(detail) = decoded.error {
            return Err(AdviceError::Api(
                detail.message.unwrap_or_else(|| "Unknown".to_string()),
            ));
        }

        Err(AdviceError::Empty)
    }
}
