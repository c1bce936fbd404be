//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::translation::Language;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub ocr_api_key: Option<String>,
    pub target_lang: Option<String>,
    pub clipboard: Option<bool>,
    pub notify: Option<bool>,
    pub ocr_engine: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            ocr_api_key: None,
            target_lang: Some("en".to_string()),
            clipboard: Some(false),
            notify: Some(false),
            ocr_engine: Some("auto".to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            ocr_api_key: other.ocr_api_key.or(self.ocr_api_key),
            target_lang: other.target_lang.or(self.target_lang),
            clipboard: other.clipboard.or(self.clipboard),
            notify: other.notify.or(self.notify),
            ocr_engine: other.ocr_engine.or(self.ocr_engine),
        }
    }

    /// Get target language as parsed Language, or English if not set/invalid
    pub fn target_lang_or_default(&self) -> Language {
        self.target_lang
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get auto-copy-to-clipboard setting, or false if not set
    pub fn clipboard_or_default(&self) -> bool {
        self.clipboard.unwrap_or(false)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get OCR engine preference, or "auto" if not set
    pub fn ocr_engine_or_default(&self) -> &str {
        self.ocr_engine.as_deref().unwrap_or("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.api_key.is_none());
        assert!(config.ocr_api_key.is_none());
        assert_eq!(config.target_lang, Some("en".to_string()));
        assert_eq!(config.clipboard, Some(false));
        assert_eq!(config.notify, Some(false));
        assert_eq!(config.ocr_engine, Some("auto".to_string()));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.api_key.is_none());
        assert!(config.ocr_api_key.is_none());
        assert!(config.target_lang.is_none());
        assert!(config.clipboard.is_none());
        assert!(config.ocr_engine.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_key: Some("base_key".to_string()),
            target_lang: Some("en".to_string()),
            clipboard: Some(false),
            ..Default::default()
        };

        let other = AppConfig {
            api_key: Some("other_key".to_string()),
            target_lang: None, // Should not override
            clipboard: Some(true),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.api_key, Some("other_key".to_string()));
        assert_eq!(merged.target_lang, Some("en".to_string())); // Kept from base
        assert_eq!(merged.clipboard, Some(true));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            ocr_api_key: Some("vision-key".to_string()),
            notify: Some(true),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.ocr_api_key, Some("vision-key".to_string()));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn target_lang_or_default_parses() {
        let config = AppConfig {
            target_lang: Some("ja".to_string()),
            ..Default::default()
        };
        assert_eq!(config.target_lang_or_default(), Language::Japanese);
    }

    #[test]
    fn target_lang_or_default_accepts_display_name() {
        let config = AppConfig {
            target_lang: Some("Spanish".to_string()),
            ..Default::default()
        };
        assert_eq!(config.target_lang_or_default(), Language::Spanish);
    }

    #[test]
    fn target_lang_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            target_lang: Some("invalid".to_string()),
            ..Default::default()
        };
        assert_eq!(config.target_lang_or_default(), Language::English);
    }

    #[test]
    fn boolean_defaults() {
        let config = AppConfig::empty();
        assert!(!config.clipboard_or_default());
        assert!(!config.notify_or_default());
    }

    #[test]
    fn ocr_engine_or_default() {
        assert_eq!(AppConfig::empty().ocr_engine_or_default(), "auto");
        let config = AppConfig {
            ocr_engine: Some("tesseract".to_string()),
            ..Default::default()
        };
        assert_eq!(config.ocr_engine_or_default(), "tesseract");
    }
}
