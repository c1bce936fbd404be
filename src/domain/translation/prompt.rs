//! Prompt value objects for translation and language detection

use super::language::Language;
use super::request::TranslationRequest;

/// Base instruction for all translation requests
const TRANSLATE_INSTRUCTION: &str = "You are a translation assistant. Output ONLY the translated text, with no quotes, explanations, or meta-commentary.";

/// Value object holding the complete instruction sent with a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPrompt {
    content: String,
}

impl TranslationPrompt {
    /// Build the instruction for a translation request.
    ///
    /// Names the source language when it is known, and appends the
    /// user-supplied context hint when present.
    pub fn build(request: &TranslationRequest) -> Self {
        let mut content = match request.source.known() {
            Some(source) => format!(
                "{}\n\nTranslate the following text from {} to {}.",
                TRANSLATE_INSTRUCTION,
                source.label(),
                request.target.label()
            ),
            None => format!(
                "{}\n\nTranslate the following text to {}.",
                TRANSLATE_INSTRUCTION,
                request.target.label()
            ),
        };

        if let Some(context) = &request.context {
            content.push_str(&format!("\nContext: {}", context));
        }

        content.push_str(&format!("\n\nText:\n{}", request.text));
        Self { content }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the content
    pub fn into_content(self) -> String {
        self.content
    }
}

/// Value object holding the constrained language-detection instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionPrompt {
    content: String,
}

impl DetectionPrompt {
    /// Build a detection prompt constrained to a bare ISO 639-1 code reply
    pub fn build(text: &str) -> Self {
        let content = format!(
            "Identify the language of the following text. Answer with ONLY its ISO 639-1 code (two lowercase letters, e.g. en, es, ja). No other output.\n\nText:\n{}",
            text
        );
        Self { content }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Parse a model reply into a language, tolerating stray whitespace,
    /// quotes, and trailing punctuation.
    pub fn parse_reply(reply: &str) -> Option<Language> {
        let cleaned: String = reply
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .take(2)
            .collect();
        cleaned.parse().ok()
    }
}
