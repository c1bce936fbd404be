//! Translation port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::translation::{Language, TranslationRequest};

/// Translation errors
#[derive(Debug, Clone, Error)]
pub enum TranslateApiError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty response from translation API")]
    EmptyResponse,

    #[error("Could not determine source language")]
    DetectionFailed,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for translation and language detection
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate the request text to its target language.
    ///
    /// # Returns
    /// The translated text or an error
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateApiError>;

    /// Detect the language of a piece of text using a constrained prompt
    /// against the same API.
    async fn detect_language(&self, text: &str) -> Result<Language, TranslateApiError>;
}

/// Blanket implementation for boxed translator types
#[async_trait]
impl Translator for Box<dyn Translator> {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateApiError> {
        self.as_ref().translate(request).await
    }

    async fn detect_language(&self, text: &str) -> Result<Language, TranslateApiError> {
        self.as_ref().detect_language(text).await
    }
}
