//! Data models for word records

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enhancement::{
    AntonymEntry, Collocation, EnhancementField, ExampleSentence, FieldValue, SynonymEntry,
};
use crate::error::CoreError;

/// A vocabulary item: identity, linguistic content and learning state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub id: Uuid,
    pub word: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub base_fields: BaseFields,
    #[serde(default)]
    pub enhancement: Enhancement,
    #[serde(default)]
    pub enhancement_status: EnhancementStatus,
    pub learning_state: LearningState,
}

impl WordRecord {
    pub fn new(word: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            word,
            created_at: now,
            updated_at: now,
            base_fields: BaseFields::default(),
            enhancement: Enhancement::default(),
            enhancement_status: EnhancementStatus::default(),
            learning_state: LearningState::new(now),
        }
    }

    /// Key used for case-insensitive uniqueness within a deck
    pub fn word_key(word: &str) -> String {
        word.trim().to_lowercase()
    }

    /// The stored content of `field`, or `None` when it is empty
    pub fn field_value(&self, field: EnhancementField) -> Option<FieldValue> {
        use EnhancementField as F;
        let value = match field {
            F::Phonetic => FieldValue::Text(self.base_fields.phonetic.clone()?),
            F::PartOfSpeech => FieldValue::Text(self.base_fields.part_of_speech.clone()?),
            F::Definition => FieldValue::Text(self.enhancement.definition.clone()?),
            F::ChineseMeaning => FieldValue::Text(self.enhancement.chinese_meaning.clone()?),
            F::MemoryTip => FieldValue::Text(self.enhancement.memory_tip.clone()?),
            F::Association => FieldValue::Text(self.enhancement.association.clone()?),
            F::Collocations => FieldValue::Collocations(self.enhancement.collocations.clone()),
            F::Example => FieldValue::Example(self.enhancement.example.clone()?),
            F::Synonyms => FieldValue::Synonyms(self.enhancement.synonyms.clone()),
            F::Antonyms => FieldValue::Antonyms(self.enhancement.antonyms.clone()),
        };
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Write `value` into the slot for `field`. Returns false if the shape does not fit.
    pub fn set_field_value(&mut self, field: EnhancementField, value: FieldValue) -> bool {
        use EnhancementField as F;
        match (field, value) {
            (F::Phonetic, FieldValue::Text(text)) => self.base_fields.phonetic = Some(text),
            (F::PartOfSpeech, FieldValue::Text(text)) => self.base_fields.part_of_speech = Some(text),
            (F::Definition, FieldValue::Text(text)) => self.enhancement.definition = Some(text),
            (F::ChineseMeaning, FieldValue::Text(text)) => self.enhancement.chinese_meaning = Some(text),
            (F::MemoryTip, FieldValue::Text(text)) => self.enhancement.memory_tip = Some(text),
            (F::Association, FieldValue::Text(text)) => self.enhancement.association = Some(text),
            (F::Collocations, FieldValue::Collocations(items)) => self.enhancement.collocations = items,
            (F::Example, FieldValue::Example(example)) => self.enhancement.example = Some(example),
            (F::Synonyms, FieldValue::Synonyms(items)) => self.enhancement.synonyms = items,
            (F::Antonyms, FieldValue::Antonyms(items)) => self.enhancement.antonyms = items,
            _ => return false,
        }
        true
    }
}

/// Base linguistic fields shown on the card front
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

/// AI-derived content shown on the card back
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enhancement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default)]
    pub collocations: Vec<Collocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ExampleSentence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chinese_meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_tip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<SynonymEntry>,
    #[serde(default)]
    pub antonyms: Vec<AntonymEntry>,
}

/// Which fields have been generated, and under which schema version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementStatus {
    #[serde(default)]
    pub fields: BTreeMap<EnhancementField, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_enhanced_at: Option<DateTime<Utc>>,
    /// Schema version the `true` flags were produced under; 0 means unknown
    #[serde(default)]
    pub enhancement_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhancement_source: Option<String>,
}

impl EnhancementStatus {
    /// The stored flag, ignoring version
    pub fn is_marked(&self, field: EnhancementField) -> bool {
        self.fields.get(&field).copied().unwrap_or(false)
    }

    /// A flag only counts when it was written under `schema_version` or a newer one
    pub fn is_complete_at(&self, field: EnhancementField, schema_version: u32) -> bool {
        self.enhancement_version >= schema_version && self.is_marked(field)
    }

    /// Every eager field is complete under `schema_version`
    pub fn is_complete(&self, schema_version: u32) -> bool {
        EnhancementField::EAGER
            .iter()
            .all(|f| self.is_complete_at(*f, schema_version))
    }

    pub fn completed_fields(&self, schema_version: u32) -> Vec<EnhancementField> {
        EnhancementField::ALL
            .iter()
            .copied()
            .filter(|f| self.is_complete_at(*f, schema_version))
            .collect()
    }
}

/// Learner's self-reported recall strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemoryLevel {
    Forgot,
    Vague,
    Remembered,
}

impl MemoryLevel {
    pub const ALL: [MemoryLevel; 3] = [Self::Forgot, Self::Vague, Self::Remembered];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forgot => "forgot",
            Self::Vague => "vague",
            Self::Remembered => "remembered",
        }
    }
}

impl fmt::Display for MemoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryLevel {
    type Err = CoreError;

    /// Accepts names, the numeric scale (0/1/2) and the card button ids (hard/medium/easy)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forgot" | "0" | "hard" => Ok(Self::Forgot),
            "vague" | "1" | "medium" => Ok(Self::Vague),
            "remembered" | "2" | "easy" => Ok(Self::Remembered),
            _ => Err(CoreError::InvalidAssessment(s.to_string())),
        }
    }
}

/// One past assessment. History entries are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryHistoryEntry {
    pub assessment: MemoryLevel,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub response_time_ms: u64,
}

/// Spaced repetition state for a word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningState {
    /// Rungs climbed on the ladder of `last_memory_level`
    #[serde(default)]
    pub stage: u8,
    pub next_review_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_memory_level: Option<MemoryLevel>,
    #[serde(default)]
    pub memory_history: Vec<MemoryHistoryEntry>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub total_attempts: u32,
    #[serde(default)]
    pub average_response_time_ms: f64,
    #[serde(default = "default_true")]
    pub is_new: bool,
    #[serde(default)]
    pub needs_review: bool,
    #[serde(default)]
    pub is_mastered_today: bool,
    #[serde(default)]
    pub is_mastered: bool,
}

fn default_true() -> bool {
    true
}

impl LearningState {
    /// State of a freshly added word: stage 0, due immediately
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            stage: 0,
            next_review_at: now,
            last_memory_level: None,
            memory_history: Vec::new(),
            review_count: 0,
            correct_count: 0,
            total_attempts: 0,
            average_response_time_ms: 0.0,
            is_new: true,
            needs_review: false,
            is_mastered_today: false,
            is_mastered: false,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_review_at
    }

    /// Share of attempts answered "remembered", 0.0 before any attempt
    pub fn accuracy(&self) -> f64 {
        if self.total_attempts == 0 {
            0.0
        } else {
            self.correct_count as f64 / self.total_attempts as f64
        }
    }

    pub fn last_reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.memory_history.last().map(|entry| entry.timestamp)
    }
}
