//! Gemini API translator adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranslateApiError, Translator};
use crate::domain::translation::{
    DetectionPrompt, Language, TranslationPrompt, TranslationRequest,
};

/// Gemini API model to use
const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// Request types for Gemini API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: i32,
}

// Response types for Gemini API

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ApiError {
    message: String,
    status: Option<String>,
    code: Option<i32>,
}

/// Gemini API translator
pub struct GeminiTranslator {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiTranslator {
    /// Create a new Gemini translator with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new Gemini translator with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::new(api_key)
        }
    }

    /// Override the API base URL (used by tests against a mock server)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new(api_key)
        }
    }

    /// Build the API URL
    fn api_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Build a request body carrying a single text instruction
    fn build_request(instruction: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: instruction.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig {
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: 0, // Disable thinking for faster response
                }),
            }),
        }
    }

    /// Extract text from response
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }

    /// Strip one pair of surrounding quotes the model sometimes adds
    fn strip_quotes(text: &str) -> &str {
        let trimmed = text.trim();
        for (open, close) in [('"', '"'), ('\'', '\''), ('\u{201c}', '\u{201d}')] {
            if trimmed.len() >= 2 && trimmed.starts_with(open) && trimmed.ends_with(close) {
                return trimmed[open.len_utf8()..trimmed.len() - close.len_utf8()].trim();
            }
        }
        trimmed
    }

    /// Issue a generateContent exchange and return the extracted text
    async fn generate(&self, instruction: &str) -> Result<String, TranslateApiError> {
        let url = self.api_url();
        let body = Self::build_request(instruction);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslateApiError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TranslateApiError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslateApiError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranslateApiError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // Parse response
        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TranslateApiError::ParseError(e.to_string()))?;

        // Check for API error in response body
        if let Some(error) = response.error {
            return Err(TranslateApiError::ApiError(error.message));
        }

        let text = Self::extract_text(&response).ok_or(TranslateApiError::EmptyResponse)?;

        let cleaned = Self::strip_quotes(&text);
        if cleaned.is_empty() {
            return Err(TranslateApiError::EmptyResponse);
        }

        Ok(cleaned.to_string())
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateApiError> {
        let prompt = TranslationPrompt::build(request);
        self.generate(prompt.content()).await
    }

    async fn detect_language(&self, text: &str) -> Result<Language, TranslateApiError> {
        let prompt = DetectionPrompt::build(text);
        let reply = self.generate(prompt.content()).await?;
        DetectionPrompt::parse_reply(&reply).ok_or(TranslateApiError::DetectionFailed)
    }
}
