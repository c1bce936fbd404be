//! Google Cloud Vision OCR adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{OcrEngine, OcrError};
use crate::domain::ocr::ImageData;

/// Cloud Vision API base URL
const API_BASE_URL: &str = "https://vision.googleapis.com/v1";

// Request types for the images:annotate endpoint

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: AnnotateImage,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct AnnotateImage {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    feature_type: String,
    max_results: u32,
}

// Response types

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    responses: Option<Vec<AnnotateImageResponse>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    full_text_annotation: Option<FullTextAnnotation>,
    text_annotations: Option<Vec<TextAnnotation>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct FullTextAnnotation {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextAnnotation {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct ApiError {
    message: String,
    code: Option<i32>,
}

/// Cloud Vision OCR adapter using the images:annotate TEXT_DETECTION feature
pub struct VisionOcr {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl VisionOcr {
    /// Create a new Cloud Vision OCR adapter
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
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
        format!("{}/images:annotate?key={}", self.base_url, self.api_key)
    }

    /// Build the request body
    fn build_request(image: &ImageData) -> AnnotateRequest {
        AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: AnnotateImage {
                    content: image.to_base64(),
                },
                features: vec![Feature {
                    feature_type: "TEXT_DETECTION".to_string(),
                    max_results: 1,
                }],
            }],
        }
    }

    /// Extract text from a response, preferring the full text annotation
    fn extract_text(response: &AnnotateResponse) -> Option<String> {
        let first = response.responses.as_ref()?.first()?;

        if let Some(text) = first
            .full_text_annotation
            .as_ref()
            .and_then(|a| a.text.as_deref())
        {
            return Some(text.to_string());
        }

        first
            .text_annotations
            .as_ref()?
            .first()?
            .description
            .clone()
    }
}

#[async_trait]
impl OcrEngine for VisionOcr {
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

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
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

        let response: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| OcrError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(OcrError::EngineError(error.message));
        }

        if let Some(first) = response.responses.as_ref().and_then(|r| r.first()) {
            if let Some(error) = &first.error {
                return Err(OcrError::EngineError(error.message.clone()));
            }
        }

        let text = Self::extract_text(&response).ok_or(OcrError::NoTextFound)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(OcrError::NoTextFound);
        }

        Ok(trimmed.to_string())
    }
}
