//! Word records and their lifecycle
//!
//! This module provides:
//! - The `WordRecord` aggregate (base fields, AI enhancement, learning state)
//! - `WordRecordManager`, the single mutation funnel for records
//! - The lazily-read review queue
//! - Deck statistics

pub mod manager;
pub mod models;
pub mod stats;

pub use manager::{DueIter, DueQueue, WordRecordManager};
pub use models::*;
pub use stats::DeckStats;
