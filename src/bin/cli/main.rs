mod app;
mod commands;
mod render;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "goldword-cli", about = "GoldWord vocabulary cards from the command line", version)]
struct Cli {
    /// Use a specific deck (default: from config, then "default")
    #[arg(long, global = true)]
    deck: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a word to the deck
    Add {
        /// The word or phrase
        word: String,
    },

    /// Show a word card
    Show {
        /// Word (case-insensitive)
        word: String,
    },

    /// List words due for review
    Due {
        /// Maximum results
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Record a review assessment
    Review {
        /// Word (case-insensitive)
        word: String,
        /// forgot|vague|remembered, 0|1|2 or hard|medium|easy
        assessment: String,
        /// Time taken to answer, in milliseconds
        #[arg(long, default_value = "0")]
        response_ms: u64,
    },

    /// Generate missing AI fields for a word
    Enhance {
        /// Word (case-insensitive)
        word: String,
        /// Comma-separated fields (default: the eager set)
        #[arg(long)]
        fields: Option<String>,
        /// Also generate synonyms and antonyms
        #[arg(long)]
        with_lazy: bool,
    },

    /// Deck statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.deck.as_deref())?;

    match cli.command {
        Command::Add { word } => {
            commands::add::run(&app, &word, &cli.format, use_color)?;
        }
        Command::Show { word } => {
            commands::show::run(&app, &word, &cli.format, use_color)?;
        }
        Command::Due { limit } => {
            commands::due::run(&app, limit, &cli.format, use_color)?;
        }
        Command::Review { word, assessment, response_ms } => {
            commands::review::run(&app, &word, &assessment, response_ms, &cli.format, use_color)?;
        }
        Command::Enhance { word, fields, with_lazy } => {
            commands::enhance::run(&app, &word, fields.as_deref(), with_lazy, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
