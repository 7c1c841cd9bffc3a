use anyhow::Result;

use goldword_lib::scheduler::format_interval;

use crate::app::App;
use crate::render::card::{level_color, paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    word: &str,
    assessment: &str,
    response_ms: u64,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let record = app.find_word(word)?;
    let now = app.manager.now();
    let record = app.scheduler.record_assessment_raw(record.id, assessment, response_ms)?;
    let state = &record.learning_state;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": record.id.to_string(),
                "word": record.word,
                "learningState": state,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let level = state
                .last_memory_level
                .map(|level| paint(level.as_str(), level_color(level), use_color))
                .unwrap_or_default();
            println!(
                "{}: {} → next review in {} (stage {})",
                paint(&record.word, Color::BOLD, use_color),
                level,
                format_interval(state.next_review_at - now),
                state.stage
            );
            if state.is_mastered {
                println!("  {}", paint("Mastered!", Color::GREEN, use_color));
            }
            println!(
                "  {}/{} remembered",
                state.correct_count, state.total_attempts
            );
        }
    }

    Ok(())
}
