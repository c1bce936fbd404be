//! Language table value objects
//!
//! Fixed mapping of display name to ISO 639-1 code, loaded once as a
//! static table. Read-only after startup.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidLanguageError;

/// All supported target languages
pub const ALL_LANGUAGES: &[Language] = &[
    Language::English,
    Language::Spanish,
    Language::French,
    Language::German,
    Language::Italian,
    Language::Portuguese,
    Language::Dutch,
    Language::Polish,
    Language::Russian,
    Language::Turkish,
    Language::Arabic,
    Language::Hindi,
    Language::Japanese,
    Language::Korean,
    Language::Chinese,
    Language::Vietnamese,
];

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Dutch,
    Polish,
    Russian,
    Turkish,
    Arabic,
    Hindi,
    Japanese,
    Korean,
    Chinese,
    Vietnamese,
}

impl Language {
    /// Get the ISO 639-1 code for this language
    pub const fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Italian => "it",
            Self::Portuguese => "pt",
            Self::Dutch => "nl",
            Self::Polish => "pl",
            Self::Russian => "ru",
            Self::Turkish => "tr",
            Self::Arabic => "ar",
            Self::Hindi => "hi",
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::Chinese => "zh",
            Self::Vietnamese => "vi",
        }
    }

    /// Get the human-readable display name
    pub const fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Italian => "Italian",
            Self::Portuguese => "Portuguese",
            Self::Dutch => "Dutch",
            Self::Polish => "Polish",
            Self::Russian => "Russian",
            Self::Turkish => "Turkish",
            Self::Arabic => "Arabic",
            Self::Hindi => "Hindi",
            Self::Japanese => "Japanese",
            Self::Korean => "Korean",
            Self::Chinese => "Chinese",
            Self::Vietnamese => "Vietnamese",
        }
    }
}

impl FromStr for Language {
    type Err = InvalidLanguageError;

    /// Accepts either an ISO 639-1 code or a display name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        ALL_LANGUAGES
            .iter()
            .find(|lang| lang.code() == needle || lang.label().to_lowercase() == needle)
            .copied()
            .ok_or(InvalidLanguageError {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Source language for a translation request.
///
/// `Auto` means the source is ambiguous and must be resolved with a
/// preliminary language-detection request before translating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceLanguage {
    #[default]
    Auto,
    Known(Language),
}

impl SourceLanguage {
    /// Get the resolved language, if any
    pub fn known(&self) -> Option<Language> {
        match self {
            Self::Auto => None,
            Self::Known(lang) => Some(*lang),
        }
    }

    /// Whether detection is required before translation
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl FromStr for SourceLanguage {
    type Err = InvalidLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse::<Language>().map(Self::Known)
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Known(lang) => write!(f, "{}", lang),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_by_code() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("ja".parse::<Language>().unwrap(), Language::Japanese);
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Chinese);
    }

    #[test]
    fn parse_by_display_name() {
        assert_eq!("Spanish".parse::<Language>().unwrap(), Language::Spanish);
        assert_eq!("german".parse::<Language>().unwrap(), Language::German);
        assert_eq!("KOREAN".parse::<Language>().unwrap(), Language::Korean);
    }

    #[test]
    fn parse_with_whitespace() {
        assert_eq!("  fr  ".parse::<Language>().unwrap(), Language::French);
    }

    #[test]
    fn parse_invalid() {
        assert!("tlh".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn code_and_label_round_trip() {
        for lang in ALL_LANGUAGES {
            assert_eq!(lang.code().parse::<Language>().unwrap(), *lang);
            assert_eq!(lang.label().parse::<Language>().unwrap(), *lang);
        }
    }

    #[test]
    fn display_is_code() {
        assert_eq!(Language::English.to_string(), "en");
        assert_eq!(Language::Vietnamese.to_string(), "vi");
    }

    #[test]
    fn all_languages_constant() {
        assert_eq!(ALL_LANGUAGES.len(), 16);
    }

    #[test]
    fn source_language_auto() {
        assert_eq!("auto".parse::<SourceLanguage>().unwrap(), SourceLanguage::Auto);
        assert_eq!("AUTO".parse::<SourceLanguage>().unwrap(), SourceLanguage::Auto);
        assert!(SourceLanguage::Auto.is_auto());
        assert!(SourceLanguage::Auto.known().is_none());
    }

    #[test]
    fn source_language_known() {
        let src = "es".parse::<SourceLanguage>().unwrap();
        assert_eq!(src, SourceLanguage::Known(Language::Spanish));
        assert_eq!(src.known(), Some(Language::Spanish));
        assert!(!src.is_auto());
    }

    #[test]
    fn auto_is_not_a_target_language() {
        assert!("auto".parse::<Language>().is_err());
    }

    #[test]
    fn default_target_is_english() {
        assert_eq!(Language::default(), Language::English);
    }
}
