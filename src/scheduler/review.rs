use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ladder::{calculate_next_review, IntervalTable, ReviewResult};
use crate::error::Result;
use crate::words::{LearningState, MemoryHistoryEntry, MemoryLevel, WordRecord, WordRecordManager};

/// Fold one assessment into a learning state
pub fn apply_assessment(
    table: &IntervalTable,
    state: &mut LearningState,
    level: MemoryLevel,
    response_time_ms: u64,
    now: DateTime<Utc>,
) -> ReviewResult {
    let result = calculate_next_review(table, state, level, now);

    state.memory_history.push(MemoryHistoryEntry {
        assessment: level,
        timestamp: now,
        response_time_ms,
    });

    state.total_attempts += 1;
    if level == MemoryLevel::Remembered {
        state.correct_count += 1;
    }
    state.average_response_time_ms +=
        (response_time_ms as f64 - state.average_response_time_ms) / state.total_attempts as f64;
    state.review_count = state.memory_history.len() as u32;

    state.stage = result.stage;
    state.next_review_at = result.next_review_at;
    state.last_memory_level = Some(level);

    state.is_new = false;
    state.needs_review = state.next_review_at <= now;
    state.is_mastered = result.is_mastered;

    let today = now.date_naive();
    let mut todays = state
        .memory_history
        .iter()
        .filter(|entry| entry.timestamp.date_naive() == today)
        .peekable();
    state.is_mastered_today =
        todays.peek().is_some() && todays.all(|entry| entry.assessment == MemoryLevel::Remembered);

    result
}

/// Records learner assessments through the record manager
pub struct ReviewScheduler {
    manager: Arc<WordRecordManager>,
    table: IntervalTable,
}

impl ReviewScheduler {
    pub fn new(manager: Arc<WordRecordManager>) -> Self {
        Self::with_table(manager, IntervalTable::default())
    }

    pub fn with_table(manager: Arc<WordRecordManager>, table: IntervalTable) -> Self {
        Self { manager, table }
    }

    pub fn table(&self) -> &IntervalTable {
        &self.table
    }

    /// Submit a review for a word
    pub fn record_assessment(&self, id: Uuid, level: MemoryLevel, response_time_ms: u64) -> Result<WordRecord> {
        let now = self.manager.now();
        let table = &self.table;

        let record = self.manager.update_record(id, |record| {
            apply_assessment(table, &mut record.learning_state, level, response_time_ms, now);
            Ok(())
        })?;

        let state = &record.learning_state;
        log::debug!(
            "Scheduled '{}' after {}: stage {}, next review {}",
            record.word,
            level,
            state.stage,
            state.next_review_at
        );
        if state.is_mastered {
            log::info!("'{}' is mastered", record.word);
        }

        Ok(record)
    }

    /// Same as [`record_assessment`](Self::record_assessment) for an
    /// unparsed assessment such as `"remembered"`, `"2"` or `"easy"`
    pub fn record_assessment_raw(&self, id: Uuid, assessment: &str, response_time_ms: u64) -> Result<WordRecord> {
        let level: MemoryLevel = assessment.parse()?;
        self.record_assessment(id, level, response_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::error::CoreError;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn setup() -> (ReviewScheduler, Arc<WordRecordManager>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()));
        let manager = Arc::new(
            WordRecordManager::with_clock(Arc::new(MemoryStore::new()), "alice", clock.clone()).unwrap(),
        );
        (ReviewScheduler::new(manager.clone()), manager, clock)
    }

    #[test]
    fn test_ephemeral_walkthrough() {
        let (scheduler, manager, clock) = setup();
        let t0 = clock.now();

        let record = manager.create_record("ephemeral").unwrap();
        assert_eq!(record.learning_state.stage, 0);
        assert_eq!(record.learning_state.next_review_at, t0);

        let record = scheduler
            .record_assessment(record.id, MemoryLevel::Remembered, 1500)
            .unwrap();
        let state = &record.learning_state;
        assert_eq!(state.stage, 1);
        assert_eq!(state.next_review_at, t0 + Duration::days(1));
        assert_eq!(state.correct_count, 1);
        assert_eq!(state.total_attempts, 1);
        assert!(!state.is_new);
        assert!(!state.needs_review);

        clock.advance(Duration::minutes(10));
        let now = clock.now();
        let record = scheduler.record_assessment(record.id, MemoryLevel::Forgot, 3000).unwrap();
        let state = &record.learning_state;
        assert_eq!(state.next_review_at, now + Duration::minutes(5));
        assert_eq!(state.last_memory_level, Some(MemoryLevel::Forgot));
        assert!(!state.is_mastered);
        assert_eq!(state.correct_count, 1);
        assert_eq!(state.total_attempts, 2);
        assert_eq!(state.review_count, 2);
        assert_eq!(state.memory_history.len(), 2);
        assert_eq!(state.average_response_time_ms, 2250.0);
        assert!(!state.is_mastered_today);
        assert_eq!(record.updated_at, now);
    }

    #[test]
    fn test_history_is_append_only() {
        let (scheduler, manager, clock) = setup();
        let id = manager.create_record("ephemeral").unwrap().id;

        let levels = [MemoryLevel::Vague, MemoryLevel::Forgot, MemoryLevel::Remembered];
        let mut previous: Vec<MemoryHistoryEntry> = Vec::new();
        for level in levels {
            clock.advance(Duration::minutes(1));
            let record = scheduler.record_assessment(id, level, 1000).unwrap();
            let history = &record.learning_state.memory_history;
            assert_eq!(&history[..previous.len()], previous.as_slice());
            assert_eq!(history.last().unwrap().assessment, level);
            previous = history.clone();
        }
        assert_eq!(previous.len(), 3);
    }

    #[test]
    fn test_mastered_today() {
        let (scheduler, manager, clock) = setup();
        let id = manager.create_record("ephemeral").unwrap().id;

        let record = scheduler.record_assessment(id, MemoryLevel::Remembered, 800).unwrap();
        assert!(record.learning_state.is_mastered_today);

        let record = scheduler.record_assessment(id, MemoryLevel::Vague, 800).unwrap();
        assert!(!record.learning_state.is_mastered_today);

        clock.advance(Duration::days(1));
        let record = scheduler.record_assessment(id, MemoryLevel::Remembered, 800).unwrap();
        assert!(record.learning_state.is_mastered_today);
    }

    #[test]
    fn test_reaches_mastery_after_full_remembered_run() {
        let (scheduler, manager, clock) = setup();
        let id = manager.create_record("ephemeral").unwrap().id;
        let rungs = scheduler.table().ladder(MemoryLevel::Remembered).len();

        let mut record = manager.get_record(id).unwrap();
        for _ in 0..rungs {
            assert!(!record.learning_state.is_mastered);
            clock.set(record.learning_state.next_review_at);
            record = scheduler.record_assessment(id, MemoryLevel::Remembered, 900).unwrap();
        }
        assert!(record.learning_state.is_mastered);
        assert_eq!(record.learning_state.accuracy(), 1.0);
    }

    #[test]
    fn test_invalid_assessment() {
        let (scheduler, manager, _) = setup();
        let id = manager.create_record("ephemeral").unwrap().id;

        let err = scheduler.record_assessment_raw(id, "maybe", 100).unwrap_err();
        assert!(matches!(err, CoreError::InvalidAssessment(_)));
        assert!(manager.get_record(id).unwrap().learning_state.memory_history.is_empty());

        let record = scheduler.record_assessment_raw(id, "easy", 100).unwrap();
        assert_eq!(record.learning_state.last_memory_level, Some(MemoryLevel::Remembered));
    }

    #[test]
    fn test_unknown_record() {
        let (scheduler, _, _) = setup();
        let err = scheduler
            .record_assessment(Uuid::new_v4(), MemoryLevel::Vague, 100)
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
