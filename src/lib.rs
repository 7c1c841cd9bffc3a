//! Word-learning records, AI enhancement and spaced repetition
//!
//! Callers create records through [`WordRecordManager`], fill their
//! AI-generated fields through [`EnhancementTracker`] and feed review
//! assessments to [`ReviewScheduler`]. All three share one manager, which
//! is the only path that writes records.

pub mod clock;
pub mod config;
pub mod enhancement;
pub mod error;
pub mod scheduler;
pub mod store;
pub mod words;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AppConfig;
pub use enhancement::{
    AiProvider, EnhancementField, EnhancementReport, EnhancementResult, EnhancementTracker, FieldValue,
    OpenAiCompatibleProvider, CURRENT_SCHEMA_VERSION,
};
pub use error::{CoreError, FailureCause, Result};
pub use scheduler::{IntervalTable, ReviewScheduler};
pub use store::{FileStore, MemoryStore, RecordStore, RecordStoreExt, StoreError};
pub use words::{DeckStats, MemoryLevel, WordRecord, WordRecordManager};
