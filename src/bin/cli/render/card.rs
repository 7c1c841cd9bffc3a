use chrono::{DateTime, Utc};

use goldword_lib::enhancement::{EnhancementField, FieldValue, CURRENT_SCHEMA_VERSION};
use goldword_lib::scheduler::{format_interval, preview_intervals, IntervalTable};
use goldword_lib::words::{MemoryLevel, WordRecord};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn level_color(level: MemoryLevel) -> &'static str {
    match level {
        MemoryLevel::Forgot => Color::RED,
        MemoryLevel::Vague => Color::YELLOW,
        MemoryLevel::Remembered => Color::GREEN,
    }
}

/// "in 2h", "overdue 3d" or "now"
pub fn relative_due(next_review_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if next_review_at > now {
        format!("in {}", format_interval(next_review_at - now))
    } else {
        let overdue = now - next_review_at;
        match format_interval(overdue).as_str() {
            "now" => "now".to_string(),
            label => format!("overdue {}", label),
        }
    }
}

fn field_label(field: EnhancementField) -> &'static str {
    match field {
        EnhancementField::Phonetic => "Phonetic",
        EnhancementField::PartOfSpeech => "Part of speech",
        EnhancementField::Definition => "Definition",
        EnhancementField::Collocations => "Collocations",
        EnhancementField::Example => "Example",
        EnhancementField::ChineseMeaning => "Meaning",
        EnhancementField::MemoryTip => "Memory tip",
        EnhancementField::Association => "Association",
        EnhancementField::Synonyms => "Synonyms",
        EnhancementField::Antonyms => "Antonyms",
    }
}

fn render_value(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::Text(text) => vec![text.clone()],
        FieldValue::Collocations(items) => items
            .iter()
            .map(|c| {
                if c.meaning.is_empty() {
                    format!("• {}", c.phrase)
                } else {
                    format!("• {}：{}", c.phrase, c.meaning)
                }
            })
            .collect(),
        FieldValue::Example(example) => {
            let mut lines = vec![example.sentence.clone()];
            if !example.translation.is_empty() {
                lines.push(example.translation.clone());
            }
            lines
        }
        FieldValue::Synonyms(items) => items
            .iter()
            .map(|s| {
                let mut line = format!("• {}", s.word);
                if !s.difference.is_empty() {
                    line.push_str(&format!(" ({})", s.difference));
                }
                if !s.example.is_empty() {
                    line.push_str(&format!(": {}", s.example));
                }
                line
            })
            .collect(),
        FieldValue::Antonyms(items) => items
            .iter()
            .map(|a| {
                if a.example.is_empty() {
                    format!("• {}", a.word)
                } else {
                    format!("• {}: {}", a.word, a.example)
                }
            })
            .collect(),
    }
}

/// Render a word card: header, enhancement fields, learning state
pub fn render_card(record: &WordRecord, table: &IntervalTable, now: DateTime<Utc>, use_color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = paint(&record.word, Color::BOLD, use_color);
    if let Some(phonetic) = &record.base_fields.phonetic {
        header.push_str(&format!("  {}", phonetic));
    }
    if let Some(pos) = &record.base_fields.part_of_speech {
        header.push_str(&format!("  {}", paint(pos, Color::DIM, use_color)));
    }
    lines.push(header);

    for field in EnhancementField::ALL {
        if matches!(field, EnhancementField::Phonetic | EnhancementField::PartOfSpeech) {
            continue;
        }
        let Some(value) = record.field_value(field) else {
            continue;
        };
        lines.push(String::new());
        lines.push(paint(field_label(field), Color::CYAN, use_color));
        lines.extend(render_value(&value).into_iter().map(|l| format!("  {}", l)));
    }

    let state = &record.learning_state;
    lines.push(String::new());
    let status = if state.is_mastered {
        paint("mastered", Color::GREEN, use_color)
    } else if state.is_new {
        "new".to_string()
    } else {
        format!("stage {}", state.stage)
    };
    lines.push(format!(
        "{}  next review {}",
        status,
        relative_due(state.next_review_at, now)
    ));
    if state.total_attempts > 0 {
        let last = state
            .last_memory_level
            .map(|level| paint(level.as_str(), level_color(level), use_color))
            .unwrap_or_default();
        lines.push(format!(
            "{} reviews, {:.0}% remembered, avg {:.1}s, last {}",
            state.total_attempts,
            state.accuracy() * 100.0,
            state.average_response_time_ms / 1000.0,
            last
        ));
    }

    let enhanced = record.enhancement_status.completed_fields(CURRENT_SCHEMA_VERSION);
    if enhanced.len() < EnhancementField::ALL.len() {
        lines.push(paint(
            &format!("{}/{} AI fields generated", enhanced.len(), EnhancementField::ALL.len()),
            Color::DIM,
            use_color,
        ));
    }

    let buttons = preview_intervals(table, state)
        .iter()
        .map(|(level, interval)| {
            format!(
                "{} {}",
                paint(level.as_str(), level_color(*level), use_color),
                format_interval(*interval)
            )
        })
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(paint("If reviewed now: ", Color::DIM, use_color) + &buttons);

    lines
}
