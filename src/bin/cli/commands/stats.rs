use anyhow::{Context, Result};

use crate::app::App;
use crate::render::card::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app
        .manager
        .stats(app.manager.now())
        .context("Failed to compute deck statistics")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&format!("Deck '{}'", app.manager.deck()), Color::BOLD, use_color));
            println!("  Words:        {}", stats.total_words);
            println!("  New:          {}", stats.new_words);
            println!("  Due:          {}", stats.due_words);
            println!("  Mastered:     {}", stats.mastered_words);
            println!("  Progress:     {}%", stats.progress_percent);
            println!(
                "  Reviewed:     {} today, {} in 24h, {} in 30 days",
                stats.reviewed_today, stats.reviewed_last_24_hours, stats.reviewed_last_30_days
            );
            println!(
                "  Enhanced:     {} ({}%)",
                stats.enhanced_words, stats.enhancement_coverage_percent
            );
        }
    }

    Ok(())
}
