use anyhow::Result;

use crate::app::App;
use crate::render::card;
use crate::OutputFormat;

pub fn run(app: &App, word: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let record = app.find_word(word)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        OutputFormat::Plain => {
            let lines = card::render_card(&record, app.scheduler.table(), app.manager.now(), use_color);
            println!("{}", lines.join("\n"));
        }
    }

    Ok(())
}
