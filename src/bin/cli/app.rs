use std::sync::Arc;

use anyhow::{Context, Result};

use goldword_lib::config::AppConfig;
use goldword_lib::enhancement::{EnhancementTracker, OpenAiCompatibleProvider};
use goldword_lib::scheduler::ReviewScheduler;
use goldword_lib::store::FileStore;
use goldword_lib::words::{WordRecord, WordRecordManager};

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub manager: Arc<WordRecordManager>,
    pub scheduler: ReviewScheduler,
}

impl App {
    /// Load config and open the deck under the data directory
    pub fn new(deck: Option<&str>) -> Result<Self> {
        let mut config = AppConfig::load().context("Failed to load configuration")?;
        if let Some(deck) = deck {
            config.deck = deck.to_string();
        }

        let data_dir = config.data_dir().context("Failed to get data directory")?;
        let store = FileStore::new(data_dir.clone())
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
        let manager = Arc::new(
            WordRecordManager::new(Arc::new(store), &config.deck)
                .with_context(|| format!("Invalid deck name '{}'", config.deck))?,
        );
        let scheduler = ReviewScheduler::new(manager.clone());

        Ok(Self {
            config,
            manager,
            scheduler,
        })
    }

    /// Find a word in the current deck (case-insensitive)
    pub fn find_word(&self, word: &str) -> Result<WordRecord> {
        self.manager
            .find_by_word(word)
            .context("Failed to read deck")?
            .with_context(|| format!("No word '{}' in deck '{}'", word.trim(), self.manager.deck()))
    }

    /// Tracker backed by the configured provider
    pub fn tracker(&self) -> Result<EnhancementTracker> {
        let provider = OpenAiCompatibleProvider::new(&self.config.provider).context(
            "AI provider is not configured (set [provider] in config.toml or GOLDWORD_LLM_URL and GOLDWORD_LLM_MODEL)",
        )?;
        Ok(EnhancementTracker::new(self.manager.clone(), Arc::new(provider))
            .with_timeout(self.config.enhancement_timeout()))
    }
}
