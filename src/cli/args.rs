//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::translation::{Language, SourceLanguage};
use crate::infrastructure::OcrEnginePreference;

/// LingoClip - AI-powered text and screenshot translation
#[derive(Parser, Debug)]
#[command(name = "lingo-clip")]
#[command(version = "1.2.0")]
#[command(about = "AI-powered text and screenshot translation using Google Gemini")]
#[command(long_about = None)]
pub struct Cli {
    /// Text to translate (reads the clipboard when omitted)
    #[arg(value_name = "TEXT", conflicts_with = "image")]
    pub text: Option<String>,

    /// Target language (code or name, e.g. en, ja, Spanish)
    #[arg(short = 't', long = "to", value_name = "LANG")]
    pub to: Option<String>,

    /// Source language (code, name, or 'auto' to detect)
    #[arg(short = 'f', long = "from", value_name = "LANG")]
    pub from: Option<String>,

    /// Extra context to steer the translation (tone, audience, domain)
    #[arg(short = 'x', long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Copy the translation to the clipboard
    #[arg(short = 'c', long)]
    pub copy: bool,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Translate text extracted from an image file
    #[arg(short = 'i', long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Print the extracted text without translating it
    #[arg(long)]
    pub ocr_only: bool,

    /// OCR engine to use (auto, tesseract, vision, gemini)
    #[arg(long, value_name = "ENGINE")]
    pub ocr_engine: Option<String>,

    /// Run as daemon (control via: lingo-clip daemon translate/cancel/status)
    #[arg(long, conflicts_with_all = ["text", "image", "ocr_only"])]
    pub daemon: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send commands to running daemon
    Daemon {
        #[command(subcommand)]
        action: DaemonAction,
    },
    /// List supported languages
    Languages,
}

/// Daemon control actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum DaemonAction {
    /// Translate the current clipboard contents
    Translate,
    /// Cancel the in-flight request
    Cancel,
    /// Show daemon status
    Status,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed translate options (oneshot mode)
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub text: Option<String>,
    pub image: Option<PathBuf>,
    pub ocr_only: bool,
    pub target: Language,
    pub source: SourceLanguage,
    pub context: Option<String>,
    pub clipboard: bool,
    pub notify: bool,
    pub ocr_engine: OcrEnginePreference,
}

/// Parsed daemon options
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    pub target: Language,
    pub source: SourceLanguage,
    pub clipboard: bool,
    pub notify: bool,
    pub ocr_engine: OcrEnginePreference,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "ocr_api_key",
    "target_lang",
    "clipboard",
    "notify",
    "ocr_engine",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
