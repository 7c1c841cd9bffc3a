use anyhow::Result;

use crate::app::App;
use crate::render::card::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let record = app.manager.create_record(word)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Plain => {
            println!(
                "Added \"{}\" to deck '{}'",
                paint(&record.word, Color::BOLD, use_color),
                app.manager.deck()
            );
            println!("  ID: {}", record.id);
            if app.config.provider.is_configured() {
                println!("  Run `goldword-cli enhance {}` to generate its card", record.word);
            }
        }
    }

    Ok(())
}
