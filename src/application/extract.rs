//! Extract text (OCR) use case

use thiserror::Error;

use crate::domain::ocr::ImageData;

use super::ports::{NotificationIcon, Notifier, OcrEngine, OcrError};

/// Errors from the extract use case
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),
}

/// Input parameters for the extract use case
#[derive(Debug, Clone)]
pub struct ExtractInput {
    /// The image to read
    pub image: ImageData,
    /// Whether to show notifications
    pub enable_notify: bool,
}

/// Output from the extract use case
#[derive(Debug, Clone)]
pub struct ExtractOutput {
    /// The extracted text
    pub text: String,
    /// Image size in human-readable form
    pub image_size: String,
}

/// Extract text from an image through the configured OCR engine.
pub struct ExtractTextUseCase<O, N>
where
    O: OcrEngine,
    N: Notifier,
{
    engine: O,
    notifier: N,
}

impl<O, N> ExtractTextUseCase<O, N>
where
    O: OcrEngine,
    N: Notifier,
{
    /// Create a new use case instance
    pub fn new(engine: O, notifier: N) -> Self {
        Self { engine, notifier }
    }

    /// Execute the extraction workflow
    pub async fn execute(&self, input: ExtractInput) -> Result<ExtractOutput, ExtractError> {
        let image_size = input.image.human_readable_size();

        if input.enable_notify {
            let _ = self
                .notifier
                .notify("LingoClip", "Reading image...", NotificationIcon::Processing)
                .await;
        }

        let text = self.engine.extract_text(&input.image).await?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ExtractError::Ocr(OcrError::NoTextFound));
        }

        Ok(ExtractOutput {
            text: trimmed.to_string(),
            image_size,
        })
    }
}
