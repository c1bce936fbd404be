//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ocr::ImageData;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Clipboard is empty")]
    Empty,

    #[error("Clipboard does not contain an image")]
    NoImage,

    #[error("Failed to copy to clipboard: {0}")]
    CopyFailed(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),
}

/// Port for clipboard operations
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Copy text to the system clipboard.
    async fn copy(&self, text: &str) -> Result<(), ClipboardError>;

    /// Read text from the system clipboard.
    async fn read_text(&self) -> Result<String, ClipboardError>;

    /// Read an image from the system clipboard, re-encoded as PNG.
    async fn read_image(&self) -> Result<ImageData, ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl Clipboard for Box<dyn Clipboard> {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().copy(text).await
    }

    async fn read_text(&self) -> Result<String, ClipboardError> {
        self.as_ref().read_text().await
    }

    async fn read_image(&self) -> Result<ImageData, ClipboardError> {
        self.as_ref().read_image().await
    }
}
