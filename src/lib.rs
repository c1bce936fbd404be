//! LingoClip - AI-powered text and screenshot translation CLI
//!
//! This crate provides the core functionality for translating text and
//! screenshots between languages using Google Gemini AI, with OCR support
//! for reading text out of images.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Gemini, OCR engines, clipboard, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
