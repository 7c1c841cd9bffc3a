//! Interval ladders
//!
//! Each assessment owns an ascending ladder of review intervals. A record's
//! `stage` counts the rungs climbed on the ladder of its last assessment:
//!
//! - Forgot: consecutive Forgot answers climb the Forgot ladder; arriving
//!   from any other state starts at rung 0.
//! - Vague: arriving from Forgot resumes at the ladder midpoint; otherwise
//!   the rung is the current stage, so the stage advances by one.
//! - Remembered: consecutive Remembered answers climb the Remembered
//!   ladder; after a Forgot or Vague it starts over at rung 0. Reaching
//!   the last rung marks the word mastered, and later Remembered answers
//!   hold there.
//!
//! Rungs past the end of a ladder reuse its last interval.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::words::{LearningState, MemoryLevel};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LadderError {
    #[error("The {0} ladder is empty")]
    Empty(MemoryLevel),

    #[error("The {0} ladder is not ascending")]
    NotAscending(MemoryLevel),

    #[error("A Forgot interval exceeds the shortest Remembered interval")]
    ForgotTooLong,
}

/// Review intervals for all three assessments, indexed by `MemoryLevel`
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTable {
    ladders: [Vec<Duration>; 3],
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            ladders: [
                vec![
                    Duration::minutes(5),
                    Duration::minutes(30),
                    Duration::hours(2),
                    Duration::hours(8),
                    Duration::hours(12),
                    Duration::days(1),
                ],
                vec![
                    Duration::hours(4),
                    Duration::hours(12),
                    Duration::days(2),
                    Duration::days(5),
                    Duration::days(14),
                ],
                vec![
                    Duration::days(1),
                    Duration::days(3),
                    Duration::days(7),
                    Duration::days(15),
                    Duration::days(30),
                ],
            ],
        }
    }
}

fn slot(level: MemoryLevel) -> usize {
    match level {
        MemoryLevel::Forgot => 0,
        MemoryLevel::Vague => 1,
        MemoryLevel::Remembered => 2,
    }
}

impl IntervalTable {
    /// Build a table, checking that every ladder is non-empty and
    /// non-decreasing, and that forgetting never schedules further out
    /// than the shortest Remembered interval.
    pub fn new(
        forgot: Vec<Duration>,
        vague: Vec<Duration>,
        remembered: Vec<Duration>,
    ) -> Result<Self, LadderError> {
        let table = Self {
            ladders: [forgot, vague, remembered],
        };

        for level in MemoryLevel::ALL {
            let ladder = table.ladder(level);
            if ladder.is_empty() {
                return Err(LadderError::Empty(level));
            }
            if ladder.windows(2).any(|w| w[0] > w[1]) {
                return Err(LadderError::NotAscending(level));
            }
        }

        let longest_forgot = table.ladder(MemoryLevel::Forgot).iter().max();
        let shortest_remembered = table.ladder(MemoryLevel::Remembered).iter().min();
        if let (Some(forgot), Some(remembered)) = (longest_forgot, shortest_remembered) {
            if forgot > remembered {
                return Err(LadderError::ForgotTooLong);
            }
        }

        Ok(table)
    }

    pub fn ladder(&self, level: MemoryLevel) -> &[Duration] {
        &self.ladders[slot(level)]
    }

    /// Interval for `rung`, clamped to the last entry
    pub fn interval(&self, level: MemoryLevel, rung: usize) -> Duration {
        let ladder = self.ladder(level);
        ladder[rung.min(ladder.len() - 1)]
    }

    pub fn final_rung(&self, level: MemoryLevel) -> usize {
        self.ladder(level).len() - 1
    }
}

/// Result of scheduling one assessment
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewResult {
    /// Rung the interval was taken from
    pub rung: usize,
    /// Stage to store on the record
    pub stage: u8,
    pub interval: Duration,
    pub next_review_at: DateTime<Utc>,
    pub is_mastered: bool,
}

/// Rung on `level`'s ladder that this assessment lands on
fn entry_rung(table: &IntervalTable, state: &LearningState, level: MemoryLevel) -> usize {
    let stage = state.stage as usize;
    match (level, state.last_memory_level) {
        (MemoryLevel::Forgot, Some(MemoryLevel::Forgot)) => stage,
        (MemoryLevel::Forgot, _) => 0,
        (MemoryLevel::Vague, Some(MemoryLevel::Forgot)) => table.final_rung(MemoryLevel::Vague) / 2,
        (MemoryLevel::Vague, _) => stage.min(table.final_rung(MemoryLevel::Vague)),
        (MemoryLevel::Remembered, Some(MemoryLevel::Remembered) | None) => stage,
        (MemoryLevel::Remembered, _) => 0,
    }
}

/// Compute the next stage and review time for an assessment made at `now`
pub fn calculate_next_review(
    table: &IntervalTable,
    state: &LearningState,
    level: MemoryLevel,
    now: DateTime<Utc>,
) -> ReviewResult {
    let rung = entry_rung(table, state, level);
    let interval = table.interval(level, rung);
    let ladder_len = table.ladder(level).len();
    let stage = (rung + 1).min(ladder_len).min(u8::MAX as usize) as u8;
    let is_mastered = level == MemoryLevel::Remembered && rung >= table.final_rung(level);

    ReviewResult {
        rung,
        stage,
        interval,
        next_review_at: now + interval,
        is_mastered,
    }
}

/// The interval each assessment would produce, for labelling review buttons
pub fn preview_intervals(table: &IntervalTable, state: &LearningState) -> [(MemoryLevel, Duration); 3] {
    MemoryLevel::ALL.map(|level| {
        let rung = entry_rung(table, state, level);
        (level, table.interval(level, rung))
    })
}

/// Format an interval as a compact label
pub fn format_interval(interval: Duration) -> String {
    let minutes = interval.num_minutes();
    let hours = interval.num_hours();
    let days = interval.num_days();

    if minutes <= 0 {
        "now".to_string()
    } else if hours < 1 {
        format!("{}m", minutes)
    } else if days < 1 {
        format!("{}h", hours)
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
