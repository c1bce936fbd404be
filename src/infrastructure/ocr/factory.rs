//! OCR engine factory with capability detection
//!
//! Strategy selection is a static fallback chain: local tesseract binary
//! present, then Cloud Vision key present, then Gemini multimodal.

use std::fmt;
use std::process::Stdio;
use std::str::FromStr;

use tokio::process::Command;

use crate::application::ports::{OcrEngine, OcrError};

use super::gemini::GeminiOcr;
use super::tesseract::TesseractOcr;
use super::vision::VisionOcr;

/// Available OCR engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrEngineKind {
    /// Local tesseract CLI
    Tesseract,
    /// Google Cloud Vision images:annotate
    Vision,
    /// Gemini multimodal generateContent
    Gemini,
}

impl fmt::Display for OcrEngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcrEngineKind::Tesseract => write!(f, "tesseract"),
            OcrEngineKind::Vision => write!(f, "vision"),
            OcrEngineKind::Gemini => write!(f, "gemini"),
        }
    }
}

/// User preference for OCR engine selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OcrEnginePreference {
    /// Walk the fallback chain (default)
    #[default]
    Auto,
    /// Pin the local tesseract CLI
    Tesseract,
    /// Pin Cloud Vision
    Vision,
    /// Pin Gemini multimodal
    Gemini,
}

impl fmt::Display for OcrEnginePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcrEnginePreference::Auto => write!(f, "auto"),
            OcrEnginePreference::Tesseract => write!(f, "tesseract"),
            OcrEnginePreference::Vision => write!(f, "vision"),
            OcrEnginePreference::Gemini => write!(f, "gemini"),
        }
    }
}

/// Error type for parsing an OCR engine preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOcrEngineError {
    pub value: String,
}

impl fmt::Display for ParseOcrEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid OCR engine '{}'. Valid options: auto, tesseract, vision, gemini",
            self.value
        )
    }
}

impl std::error::Error for ParseOcrEngineError {}

impl FromStr for OcrEnginePreference {
    type Err = ParseOcrEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(OcrEnginePreference::Auto),
            "tesseract" => Ok(OcrEnginePreference::Tesseract),
            "vision" => Ok(OcrEnginePreference::Vision),
            "gemini" => Ok(OcrEnginePreference::Gemini),
            _ => Err(ParseOcrEngineError {
                value: s.to_string(),
            }),
        }
    }
}

/// Check if the tesseract binary is available using `which`
pub async fn is_tesseract_available() -> bool {
    Command::new("which")
        .arg("tesseract")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Detect the best available OCR engine.
///
/// Priority: local tesseract binary, then Cloud Vision (key present),
/// then Gemini multimodal (key present).
pub async fn detect_ocr_engine(
    gemini_api_key: Option<&str>,
    vision_api_key: Option<&str>,
) -> Option<OcrEngineKind> {
    if is_tesseract_available().await {
        return Some(OcrEngineKind::Tesseract);
    }

    if vision_api_key.is_some_and(|k| !k.is_empty()) {
        return Some(OcrEngineKind::Vision);
    }

    if gemini_api_key.is_some_and(|k| !k.is_empty()) {
        return Some(OcrEngineKind::Gemini);
    }

    None
}

/// Create an OCR engine for the given preference.
///
/// Returns the engine and the selected kind, or an error if the
/// preferred engine is unavailable.
pub async fn create_ocr_engine(
    preference: OcrEnginePreference,
    gemini_api_key: Option<&str>,
    vision_api_key: Option<&str>,
) -> Result<(Box<dyn OcrEngine>, OcrEngineKind), OcrError> {
    match preference {
        OcrEnginePreference::Auto => {
            match detect_ocr_engine(gemini_api_key, vision_api_key).await {
                Some(kind) => create_specific_engine(kind, gemini_api_key, vision_api_key),
                None => Err(OcrError::NoEngineAvailable),
            }
        }
        OcrEnginePreference::Tesseract => {
            if is_tesseract_available().await {
                create_specific_engine(OcrEngineKind::Tesseract, gemini_api_key, vision_api_key)
            } else {
                Err(OcrError::TesseractNotFound)
            }
        }
        OcrEnginePreference::Vision => {
            create_specific_engine(OcrEngineKind::Vision, gemini_api_key, vision_api_key)
        }
        OcrEnginePreference::Gemini => {
            create_specific_engine(OcrEngineKind::Gemini, gemini_api_key, vision_api_key)
        }
    }
}

/// Create a specific OCR engine
fn create_specific_engine(
    kind: OcrEngineKind,
    gemini_api_key: Option<&str>,
    vision_api_key: Option<&str>,
) -> Result<(Box<dyn OcrEngine>, OcrEngineKind), OcrError> {
    match kind {
        OcrEngineKind::Tesseract => Ok((
            Box::new(TesseractOcr::new()) as Box<dyn OcrEngine>,
            OcrEngineKind::Tesseract,
        )),
        OcrEngineKind::Vision => {
            let key = vision_api_key
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    OcrError::EngineError(
                        "Cloud Vision requires an OCR API key. Run 'lingo-clip config set ocr_api_key <key>'"
                            .to_string(),
                    )
                })?;
            Ok((
                Box::new(VisionOcr::new(key)) as Box<dyn OcrEngine>,
                OcrEngineKind::Vision,
            ))
        }
        OcrEngineKind::Gemini => {
            let key = gemini_api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
                OcrError::EngineError(
                    "Gemini OCR requires an API key. Run 'lingo-clip config set api_key <key>'"
                        .to_string(),
                )
            })?;
            Ok((
                Box::new(GeminiOcr::new(key)) as Box<dyn OcrEngine>,
                OcrEngineKind::Gemini,
            ))
        }
    }
}
