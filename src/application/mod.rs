//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod extract;
pub mod ports;
pub mod translate;

// Re-export use cases
pub use extract::{ExtractError, ExtractInput, ExtractOutput, ExtractTextUseCase};
pub use translate::{
    TranslateError, TranslateInput, TranslateOutput, TranslatePhase, TranslateTextUseCase,
};
