//! Translation request value object

use super::language::{Language, SourceLanguage};

/// A single translation request.
/// Transient: exists only for the duration of one API exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Source language, possibly ambiguous
    pub source: SourceLanguage,
    /// Target language
    pub target: Language,
    /// Free-text hint to disambiguate the phrase
    pub context: Option<String>,
}

impl TranslationRequest {
    /// Create a request with automatic source detection and no context
    pub fn new(text: impl Into<String>, target: Language) -> Self {
        Self {
            text: text.into(),
            source: SourceLanguage::Auto,
            target,
            context: None,
        }
    }

    /// Set a known source language
    pub fn with_source(mut self, source: SourceLanguage) -> Self {
        self.source = source;
        self
    }

    /// Attach a context hint
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = (!context.trim().is_empty()).then_some(context);
        self
    }

    /// Whether the request carries any translatable text
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
