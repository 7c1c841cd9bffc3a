use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::models::WordRecord;

/// Statistics for a deck
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub total_words: usize,
    pub new_words: usize,
    pub due_words: usize,
    pub mastered_words: usize,
    pub reviewed_today: usize,
    pub reviewed_last_24_hours: usize,
    pub reviewed_last_30_days: usize,
    /// Share of words reviewed at least once, 0-100
    pub progress_percent: u32,
    /// Words whose eager enhancement set is complete
    pub enhanced_words: usize,
    pub enhancement_coverage_percent: u32,
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as u32
    }
}

impl DeckStats {
    pub fn from_records(records: &[WordRecord], now: DateTime<Utc>, schema_version: u32) -> Self {
        let mut stats = DeckStats {
            total_words: records.len(),
            ..Default::default()
        };

        let today = now.date_naive();
        let day_ago = now - Duration::hours(24);
        let month_ago = now - Duration::days(30);
        let mut reviewed_ever = 0;

        for record in records {
            let state = &record.learning_state;

            if state.is_new {
                stats.new_words += 1;
            }
            if state.is_due(now) {
                stats.due_words += 1;
            }
            if state.is_mastered {
                stats.mastered_words += 1;
            }
            if record.enhancement_status.is_complete(schema_version) {
                stats.enhanced_words += 1;
            }

            if let Some(last) = state.last_reviewed_at() {
                reviewed_ever += 1;
                if last.date_naive() == today {
                    stats.reviewed_today += 1;
                }
                if last >= day_ago {
                    stats.reviewed_last_24_hours += 1;
                }
                if last >= month_ago {
                    stats.reviewed_last_30_days += 1;
                }
            }
        }

        stats.progress_percent = percent(reviewed_ever, stats.total_words);
        stats.enhancement_coverage_percent = percent(stats.enhanced_words, stats.total_words);
        stats
    }
}
