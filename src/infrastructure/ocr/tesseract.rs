//! Tesseract OCR adapter for local, on-device recognition

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{OcrEngine, OcrError};
use crate::domain::ocr::ImageData;

/// Local OCR adapter driving the `tesseract` CLI.
///
/// The image is piped to stdin and the recognized text read from stdout,
/// so no temporary files are needed.
pub struct TesseractOcr;

impl TesseractOcr {
    /// Create a new tesseract OCR adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn extract_text(&self, image: &ImageData) -> Result<String, OcrError> {
        let mut child = Command::new("tesseract")
            .args(["stdin", "stdout"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OcrError::TesseractNotFound
                } else {
                    OcrError::EngineError(e.to_string())
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(image.data())
                .await
                .map_err(|e| OcrError::EngineError(e.to_string()))?;
            // Close stdin so tesseract sees EOF
            drop(stdin);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| OcrError::EngineError(e.to_string()))?;

        if !output.status.success() {
            return Err(OcrError::EngineError(format!(
                "tesseract exited with status: {}",
                output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(OcrError::NoTextFound);
        }

        Ok(text)
    }
}
