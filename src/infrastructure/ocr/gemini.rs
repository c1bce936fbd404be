//! Gemini multimodal OCR adapter
//!
//! Fallback engine when neither tesseract nor a Cloud Vision key is
//! available: sends the image inline to generateContent and asks the
//! model to read it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{OcrEngine, OcrError};
use crate::domain::ocr::ImageData;

/// Gemini API model to use
const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Extraction instruction sent alongside the image
const OCR_INSTRUCTION: &str = "Extract all text visible in this image. Output ONLY the extracted text, preserving line breaks. No commentary.";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

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

/// Gemini multimodal OCR adapter
pub struct GeminiOcr {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiOcr {
    /// Create a new Gemini OCR adapter
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
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

    /// Build the request body: instruction part followed by inline image data
    fn build_request(image: &ImageData) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part {
                        text: Some(OCR_INSTRUCTION.to_string()),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: image.mime_type().to_string(),
                            data: image.to_base64(),
                        }),
                    },
                ],
            }],
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
}

#[async_trait]
impl OcrEngine for GeminiOcr {
    async fn extract_text(&self, image: &ImageData) -> Result<String, OcrError> {
        let url = self.api_url();
        let body = Self::build_request(image);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| OcrError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(OcrError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OcrError::EngineError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| OcrError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(OcrError::EngineError(error.message));
        }

        let text = Self::extract_text(&response).ok_or(OcrError::NoTextFound)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(OcrError::NoTextFound);
        }

        Ok(trimmed.to_string())
    }
}
