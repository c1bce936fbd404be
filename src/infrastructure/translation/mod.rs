//! Translation adapters

mod gemini;

pub use gemini::GeminiTranslator;
