//! Spaced repetition scheduling
//!
//! This module provides:
//! - Per-assessment interval ladders (`IntervalTable`)
//! - The pure next-review computation and button previews
//! - `ReviewScheduler`, which records assessments on word records

pub mod ladder;
pub mod review;

pub use ladder::{
    calculate_next_review, format_interval, preview_intervals, IntervalTable, LadderError, ReviewResult,
};
pub use review::{apply_assessment, ReviewScheduler};
