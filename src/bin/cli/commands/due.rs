use anyhow::{Context, Result};

use crate::app::App;
use crate::render::card::{level_color, paint, relative_due, Color};
use crate::OutputFormat;

pub fn run(app: &App, limit: usize, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = app.manager.now();
    let queue = app.manager.list_due(now).context("Failed to read review queue")?;

    let mut records = Vec::new();
    for record in queue.iter().take(limit) {
        records.push(record?);
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = records
                .iter()
                .map(|record| {
                    let state = &record.learning_state;
                    serde_json::json!({
                        "id": record.id.to_string(),
                        "word": record.word,
                        "stage": state.stage,
                        "nextReviewAt": state.next_review_at.to_rfc3339(),
                        "lastMemoryLevel": state.last_memory_level,
                        "isNew": state.is_new,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if records.is_empty() {
                println!("Nothing due in deck '{}'", app.manager.deck());
                return Ok(());
            }

            for record in &records {
                let state = &record.learning_state;
                let last = match state.last_memory_level {
                    Some(level) => paint(level.as_str(), level_color(level), use_color),
                    None => paint("new", Color::CYAN, use_color),
                };
                println!(
                    "  {:<24} stage {}  {:<12} {}",
                    record.word,
                    state.stage,
                    last,
                    paint(&relative_due(state.next_review_at, now), Color::DIM, use_color)
                );
            }

            if queue.len() > records.len() {
                println!("\n{} of {} due words shown", records.len(), queue.len());
            } else {
                println!("\n{} due", queue.len());
            }
        }
    }

    Ok(())
}
