use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use goldword_lib::enhancement::{EnhancementField, EnhancementReport};

use crate::app::App;
use crate::render::card::{paint, Color};
use crate::OutputFormat;

fn parse_fields(fields: Option<&str>, with_lazy: bool) -> Result<Vec<EnhancementField>> {
    let mut parsed = match fields {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| f.parse::<EnhancementField>())
            .collect::<Result<Vec<_>, _>>()?,
        None => EnhancementField::EAGER.to_vec(),
    };
    if with_lazy {
        for field in [EnhancementField::Synonyms, EnhancementField::Antonyms] {
            if !parsed.contains(&field) {
                parsed.push(field);
            }
        }
    }
    Ok(parsed)
}

pub fn run(
    app: &App,
    word: &str,
    fields: Option<&str>,
    with_lazy: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let fields = parse_fields(fields, with_lazy)?;
    let record = app.find_word(word)?;
    let tracker = app.tracker()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let report: EnhancementReport = runtime.block_on(async {
        let token = CancellationToken::new();
        let on_interrupt = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });
        tracker.ensure_all_with_cancel(record.id, &fields, &token).await
    })?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": record.id.to_string(),
                "word": record.word,
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint(&record.word, Color::BOLD, use_color));
            for field in &report.completed {
                println!("  {} {}", paint("generated", Color::GREEN, use_color), field);
            }
            for field in &report.cached {
                println!("  {} {}", paint("cached   ", Color::DIM, use_color), field);
            }
            for failed in &report.failed {
                println!(
                    "  {} {}: {}",
                    paint("failed   ", Color::RED, use_color),
                    failed.field,
                    failed.reason
                );
            }
            if !report.is_complete() {
                println!("\nFailed fields can be retried with the same command");
            }
        }
    }

    Ok(())
}
