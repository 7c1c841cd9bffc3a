//! AI enhancement of word records
//!
//! This module provides:
//! - The field catalogue and value shapes
//! - Prompt templates and response parsing
//! - The `AiProvider` seam with an OpenAI-compatible HTTP implementation
//! - `EnhancementTracker`, which fills fields one at a time and persists progress

pub mod fields;
pub mod parse;
pub mod prompts;
pub mod provider;
pub mod tracker;

pub use fields::*;
pub use provider::{AiProvider, OpenAiCompatibleProvider, ProviderError};
pub use tracker::{EnhancementReport, EnhancementResult, EnhancementTracker, FailedField};

/// Version of the generation schema (prompts and value shapes). Raising it
/// invalidates every previously generated field once.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;
