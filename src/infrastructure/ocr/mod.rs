//! OCR adapters

mod factory;
mod gemini;
mod tesseract;
mod vision;

pub use factory::{
    create_ocr_engine, detect_ocr_engine, is_tesseract_available, OcrEngineKind,
    OcrEnginePreference, ParseOcrEngineError,
};
pub use gemini::GeminiOcr;
pub use tesseract::TesseractOcr;
pub use vision::VisionOcr;
