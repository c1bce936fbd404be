//! Translation domain module

mod language;
mod prompt;
mod request;

pub use language::{Language, SourceLanguage, ALL_LANGUAGES};
pub use prompt::{DetectionPrompt, TranslationPrompt};
pub use request::TranslationRequest;
