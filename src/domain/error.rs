//! Domain error types

use thiserror::Error;

/// Error when parsing a language name or code
#[derive(Debug, Clone, Error)]
#[error("Unknown language: \"{input}\". Use an ISO 639-1 code (e.g. en, es, ja) or a language name (e.g. English). Run 'lingo-clip languages' to list all.")]
pub struct InvalidLanguageError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
