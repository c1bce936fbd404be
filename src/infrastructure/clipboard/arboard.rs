//! Cross-platform clipboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland). Clipboard bitmaps
//! come back as raw RGBA and are re-encoded as PNG for the OCR engines.

use std::io::Cursor;

use async_trait::async_trait;

use crate::application::ports::{Clipboard, ClipboardError};
use crate::domain::ocr::{ImageData, ImageMimeType};

/// Cross-platform clipboard adapter using arboard
pub struct ArboardClipboard;

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        Self
    }

    /// Encode a raw RGBA clipboard bitmap as PNG
    fn encode_png(
        width: usize,
        height: usize,
        rgba: Vec<u8>,
    ) -> Result<ImageData, ClipboardError> {
        let buffer = image::RgbaImage::from_raw(width as u32, height as u32, rgba)
            .ok_or_else(|| {
                ClipboardError::ReadFailed("Clipboard image has invalid dimensions".to_string())
            })?;

        let mut bytes = Vec::new();
        buffer
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| ClipboardError::ReadFailed(e.to_string()))?;

        Ok(ImageData::new(bytes, ImageMimeType::Png))
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clipboard for ArboardClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();

        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

            clipboard
                .set_text(&text)
                .map_err(|e| ClipboardError::CopyFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::CopyFailed(format!("Task join error: {}", e)))?
    }

    async fn read_text(&self) -> Result<String, ClipboardError> {
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

            match clipboard.get_text() {
                Ok(text) if text.trim().is_empty() => Err(ClipboardError::Empty),
                Ok(text) => Ok(text),
                Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
                Err(e) => Err(ClipboardError::ReadFailed(e.to_string())),
            }
        })
        .await
        .map_err(|e| ClipboardError::ReadFailed(format!("Task join error: {}", e)))?
    }

    async fn read_image(&self) -> Result<ImageData, ClipboardError> {
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

            let bitmap = match clipboard.get_image() {
                Ok(bitmap) => bitmap,
                Err(arboard::Error::ContentNotAvailable) => return Err(ClipboardError::NoImage),
                Err(e) => return Err(ClipboardError::ReadFailed(e.to_string())),
            };

            Self::encode_png(bitmap.width, bitmap.height, bitmap.bytes.into_owned())
        })
        .await
        .map_err(|e| ClipboardError::ReadFailed(format!("Task join error: {}", e)))?
    }
}
