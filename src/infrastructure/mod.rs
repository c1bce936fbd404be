//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Gemini API, tesseract,
//! the clipboard, and the desktop notification service.

pub mod clipboard;
pub mod config;
pub mod notification;
pub mod ocr;
pub mod translation;

// Re-export adapters
pub use clipboard::ArboardClipboard;
pub use config::XdgConfigStore;
pub use notification::NotifyRustNotifier;
pub use ocr::{
    create_ocr_engine, detect_ocr_engine, GeminiOcr, OcrEngineKind, OcrEnginePreference,
    TesseractOcr, VisionOcr,
};
pub use translation::GeminiTranslator;
