//! OCR port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ocr::ImageData;

/// OCR errors
#[derive(Debug, Clone, Error)]
pub enum OcrError {
    #[error("tesseract not found. Install it or configure a cloud OCR engine.")]
    TesseractNotFound,

    #[error("No OCR engine available. Install tesseract or set an OCR API key.")]
    NoEngineAvailable,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("No text found in image")]
    NoTextFound,

    #[error("OCR request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse OCR response: {0}")]
    ParseError(String),

    #[error("OCR engine error: {0}")]
    EngineError(String),
}

/// Port for extracting text from image pixels
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extract text from an image.
    ///
    /// # Returns
    /// The extracted text or an error
    async fn extract_text(&self, image: &ImageData) -> Result<String, OcrError>;
}

/// Blanket implementation for boxed OCR engine types
#[async_trait]
impl OcrEngine for Box<dyn OcrEngine> {
    async fn extract_text(&self, image: &ImageData) -> Result<String, OcrError> {
        self.as_ref().extract_text(image).await
    }
}
