//! Catalogue of AI-generated fields and the values they carry

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One AI-generated attribute of a word record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnhancementField {
    /// IPA transcription (stored in the base fields)
    Phonetic,
    /// Part-of-speech abbreviation (stored in the base fields)
    PartOfSpeech,
    Definition,
    Collocations,
    Example,
    ChineseMeaning,
    MemoryTip,
    Association,
    /// Generated on demand only
    Synonyms,
    /// Generated on demand only
    Antonyms,
}

impl EnhancementField {
    pub const ALL: [EnhancementField; 10] = [
        Self::Phonetic,
        Self::PartOfSpeech,
        Self::Definition,
        Self::Collocations,
        Self::Example,
        Self::ChineseMeaning,
        Self::MemoryTip,
        Self::Association,
        Self::Synonyms,
        Self::Antonyms,
    ];

    /// Fields generated as soon as a word is added, in generation order
    pub const EAGER: [EnhancementField; 8] = [
        Self::Phonetic,
        Self::PartOfSpeech,
        Self::Definition,
        Self::ChineseMeaning,
        Self::Collocations,
        Self::Example,
        Self::MemoryTip,
        Self::Association,
    ];

    /// The camelCase name used in persisted JSON and provider responses
    pub fn key(self) -> &'static str {
        match self {
            Self::Phonetic => "phonetic",
            Self::PartOfSpeech => "partOfSpeech",
            Self::Definition => "definition",
            Self::Collocations => "collocations",
            Self::Example => "example",
            Self::ChineseMeaning => "chineseMeaning",
            Self::MemoryTip => "memoryTip",
            Self::Association => "association",
            Self::Synonyms => "synonyms",
            Self::Antonyms => "antonyms",
        }
    }

    pub fn is_lazy(self) -> bool {
        matches!(self, Self::Synonyms | Self::Antonyms)
    }

    /// Soft length limit in characters; exceeding it is logged, not rejected
    pub fn soft_limit(self) -> Option<usize> {
        match self {
            Self::Definition => Some(15),
            Self::ChineseMeaning => Some(4),
            Self::MemoryTip => Some(20),
            Self::Association => Some(10),
            _ => None,
        }
    }
}

impl fmt::Display for EnhancementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EnhancementField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_lowercase();

        let field = match normalized.as_str() {
            "phonetic" | "ipa" => Self::Phonetic,
            "partofspeech" | "pos" => Self::PartOfSpeech,
            "definition" => Self::Definition,
            "collocations" | "collocation" => Self::Collocations,
            "example" | "examples" => Self::Example,
            "chinesemeaning" | "chinese" => Self::ChineseMeaning,
            "memorytip" | "memory" | "mnemonic" => Self::MemoryTip,
            "association" => Self::Association,
            "synonyms" => Self::Synonyms,
            "antonyms" => Self::Antonyms,
            _ => return Err(CoreError::InvalidField(s.to_string())),
        };
        Ok(field)
    }
}

/// A fixed phrase and its gloss
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collocation {
    pub phrase: String,
    #[serde(default)]
    pub meaning: String,
}

/// An example sentence with its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSentence {
    pub sentence: String,
    #[serde(default)]
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynonymEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub difference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntonymEntry {
    pub word: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,
}

/// The generated content for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Text(String),
    Collocations(Vec<Collocation>),
    Example(ExampleSentence),
    Synonyms(Vec<SynonymEntry>),
    Antonyms(Vec<AntonymEntry>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Collocations(items) => items.iter().all(|c| c.phrase.trim().is_empty()),
            Self::Example(example) => example.sentence.trim().is_empty(),
            Self::Synonyms(items) => items.iter().all(|s| s.word.trim().is_empty()),
            Self::Antonyms(items) => items.iter().all(|a| a.word.trim().is_empty()),
        }
    }

    /// Whether this value has the shape `field` stores
    pub fn fits(&self, field: EnhancementField) -> bool {
        use EnhancementField as F;
        match self {
            Self::Text(_) => matches!(
                field,
                F::Phonetic
                    | F::PartOfSpeech
                    | F::Definition
                    | F::ChineseMeaning
                    | F::MemoryTip
                    | F::Association
            ),
            Self::Collocations(_) => field == F::Collocations,
            Self::Example(_) => field == F::Example,
            Self::Synonyms(_) => field == F::Synonyms,
            Self::Antonyms(_) => field == F::Antonyms,
        }
    }
}
