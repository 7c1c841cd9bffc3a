//! Application configuration
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`GOLDWORD_*`)
//! 2. User config (`<config_dir>/goldword/config.toml`)
//! 3. Compiled defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config {path}: {message}")]
    Parse { path: String, message: String },
    #[error("Could not determine a data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where decks are stored; defaults to the platform data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// The learner's deck
    pub deck: String,
    pub provider: ProviderConfig,
    pub enhancement: EnhancementConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            deck: "default".to_string(),
            provider: ProviderConfig::default(),
            enhancement: EnhancementConfig::default(),
        }
    }
}

/// OpenAI-compatible endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            model: String::new(),
            temperature: 0.3,
            max_tokens: 400,
        }
    }
}

/// A partial provider update; `None` leaves the current value alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderUpdate {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ProviderConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.model.trim().is_empty()
    }

    /// Shallow merge: supplied strings are trimmed, temperature is clamped to [0, 2]
    pub fn merge(&mut self, update: ProviderUpdate) {
        if let Some(base_url) = update.base_url {
            self.base_url = base_url.trim().to_string();
        }
        if let Some(api_key) = update.api_key {
            self.api_key = api_key.trim().to_string();
        }
        if let Some(model) = update.model {
            self.model = model.trim().to_string();
        }
        if let Some(temperature) = update.temperature.filter(|t| !t.is_nan()) {
            self.temperature = temperature.clamp(0.0, 2.0);
        }
        if let Some(max_tokens) = update.max_tokens {
            self.max_tokens = max_tokens;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementConfig {
    /// Bound on a single provider call
    pub timeout_secs: u64,
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl AppConfig {
    /// Load the user config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Read a TOML file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(config.sanitized())
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.enhancement.timeout_secs == 0 {
            log::warn!("enhancement.timeout_secs = 0 would fail every call, using 1");
            self.enhancement.timeout_secs = 1;
        }
        self
    }

    /// `<config_dir>/goldword/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("goldword").join("config.toml"))
    }

    /// Apply `GOLDWORD_*` variables resolved through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(dir) = lookup("GOLDWORD_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir.trim()));
        }
        if let Some(deck) = lookup("GOLDWORD_DECK") {
            self.deck = deck.trim().to_string();
        }
        self.provider.merge(ProviderUpdate {
            base_url: lookup("GOLDWORD_LLM_URL"),
            api_key: lookup("GOLDWORD_LLM_KEY"),
            model: lookup("GOLDWORD_LLM_MODEL"),
            ..Default::default()
        });
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    pub fn enhancement_timeout(&self) -> Duration {
        Duration::from_secs(self.enhancement.timeout_secs.max(1))
    }
}

/// Get the default data directory
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|p| p.join("goldword"))
        .ok_or(ConfigError::DataDirNotFound)
}

/// Clean up a user-entered API base URL: strip wrapping quotes and a
/// trailing slash, upgrade non-local `http` to `https`, end with `/v1`.
pub fn normalize_base_url(raw: &str) -> String {
    let mut s = raw.trim();
    for quote in ['`', '"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
            break;
        }
    }
    let s = s.trim().trim_end_matches('/');
    if s.is_empty() {
        return String::new();
    }

    let mut url = match s.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http://") && !is_local_host(&s[7..]) => {
            log::warn!("Upgrading non-local base URL to https");
            format!("https://{}", &s[7..])
        }
        _ => s.to_string(),
    };

    if !url.ends_with("/v1") {
        url.push_str("/v1");
    }
    url
}

fn is_local_host(authority_and_path: &str) -> bool {
    let authority = authority_and_path.split('/').next().unwrap_or_default();
    let host = authority.split(':').next().unwrap_or_default().to_ascii_lowercase();
    host == "localhost"
        || host.starts_with("127.")
        || host.starts_with("10.")
        || host.starts_with("192.168.")
}
