//! Word record lifecycle on top of a [`RecordStore`]
//!
//! Key layout per deck:
//! ```text
//! decks/{deck}/index         # [{id, wordKey}] membership list
//! decks/{deck}/words/{id}    # one WordRecord per key
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::WordRecord;
use super::stats::DeckStats;
use crate::clock::{Clock, SystemClock};
use crate::enhancement::CURRENT_SCHEMA_VERSION;
use crate::error::{CoreError, Result};
use crate::store::{key_segments, RecordStore, RecordStoreExt, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexEntry {
    id: Uuid,
    word_key: String,
}

/// Owns every `WordRecord` of one learner's deck
pub struct WordRecordManager {
    store: Arc<dyn RecordStore>,
    deck: String,
    clock: Arc<dyn Clock>,
    /// One lock per record id currently being mutated
    record_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
    /// Guards the membership index (create only)
    index_lock: Mutex<()>,
}

impl WordRecordManager {
    pub fn new(store: Arc<dyn RecordStore>, deck: &str) -> Result<Self> {
        Self::with_clock(store, deck, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn RecordStore>, deck: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        let deck = deck.trim();
        if key_segments(deck)?.len() != 1 {
            return Err(StoreError::InvalidKey(deck.to_string()).into());
        }

        Ok(Self {
            store,
            deck: deck.to_string(),
            clock,
            record_locks: Mutex::new(HashMap::new()),
            index_lock: Mutex::new(()),
        })
    }

    pub fn deck(&self) -> &str {
        &self.deck
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn index_key(&self) -> String {
        format!("decks/{}/index", self.deck)
    }

    fn record_key(&self, id: Uuid) -> String {
        format!("decks/{}/words/{}", self.deck, id)
    }

    fn load_index(&self) -> Result<Vec<IndexEntry>> {
        Ok(self.store.get_json(&self.index_key())?.unwrap_or_default())
    }

    fn load_record(&self, id: Uuid) -> Result<Option<WordRecord>> {
        Ok(self.store.get_json(&self.record_key(id))?)
    }

    // ==================== Record Operations ====================

    /// Add a new word with default learning state. Fails if the deck already
    /// holds the same word in any letter case.
    pub fn create_record(&self, word: &str) -> Result<WordRecord> {
        let word = word.trim();
        if word.is_empty() {
            return Err(CoreError::InvalidWord("word is empty".to_string()));
        }
        let word_key = WordRecord::word_key(word);

        let _guard = self.index_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut index = self.load_index()?;

        if let Some(pos) = index.iter().position(|e| e.word_key == word_key) {
            let existing = index[pos].id;
            if self.load_record(existing)?.is_some() {
                return Err(CoreError::DuplicateWord(word.to_string()));
            }
            // Record was removed from the store externally; forget it
            log::debug!("Dropping stale index entry for '{}' ({})", word_key, existing);
            index.remove(pos);
        }

        let record = WordRecord::new(word.to_string(), self.now());
        self.store.set_json(&self.record_key(record.id), &record)?;

        index.push(IndexEntry {
            id: record.id,
            word_key,
        });
        self.store.set_json(&self.index_key(), &index)?;

        log::info!("Created word record '{}' ({}) in deck '{}'", record.word, record.id, self.deck);
        Ok(record)
    }

    pub fn get_record(&self, id: Uuid) -> Result<WordRecord> {
        self.load_record(id)?.ok_or(CoreError::NotFound(id))
    }

    /// Case-insensitive lookup by surface form
    pub fn find_by_word(&self, word: &str) -> Result<Option<WordRecord>> {
        let word_key = WordRecord::word_key(word);
        let index = self.load_index()?;
        match index.iter().find(|e| e.word_key == word_key) {
            Some(entry) => self.load_record(entry.id),
            None => Ok(None),
        }
    }

    /// All records in the deck, in insertion order
    pub fn list_records(&self) -> Result<Vec<WordRecord>> {
        let mut records = Vec::new();
        for entry in self.load_index()? {
            if let Some(record) = self.load_record(entry.id)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Apply `mutator` to a copy of the stored record, stamp `updatedAt`,
    /// persist and return the new value.
    ///
    /// The read-modify-write runs under a lock private to `id`; records with
    /// other ids are never blocked. If the mutator fails nothing is written.
    pub fn update_record<F>(&self, id: Uuid, mutator: F) -> Result<WordRecord>
    where
        F: FnOnce(&mut WordRecord) -> Result<()>,
    {
        let lock = self.record_lock(id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
            self.apply_update(id, mutator)
        };
        self.release_record_lock(id, lock);
        result
    }

    fn apply_update<F>(&self, id: Uuid, mutator: F) -> Result<WordRecord>
    where
        F: FnOnce(&mut WordRecord) -> Result<()>,
    {
        let current = self.get_record(id)?;
        let mut next = current.clone();
        mutator(&mut next)?;

        if next.id != current.id || next.word != current.word || next.created_at != current.created_at {
            return Err(CoreError::InvalidWord(format!(
                "identity of '{}' cannot change",
                current.word
            )));
        }

        next.updated_at = self.now();
        self.store.set_json(&self.record_key(id), &next)?;
        Ok(next)
    }

    fn record_lock(&self, id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.record_locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(id).or_insert_with(|| Arc::new(Mutex::new(()))))
    }

    fn release_record_lock(&self, id: Uuid, lock: Arc<Mutex<()>>) {
        let mut locks = self.record_locks.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map and this caller hold it: nobody is waiting
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&id);
        }
    }

    // ==================== Review Queue ====================

    /// Records with `nextReviewAt <= now`, earliest first, less-mastered
    /// first on ties. Records are read lazily as the queue is iterated.
    pub fn list_due(&self, now: DateTime<Utc>) -> Result<DueQueue<'_>> {
        let mut entries = Vec::new();
        for entry in self.load_index()? {
            let Some(record) = self.load_record(entry.id)? else {
                continue;
            };
            let state = &record.learning_state;
            if state.next_review_at <= now {
                entries.push(DueEntry {
                    id: record.id,
                    next_review_at: state.next_review_at,
                    stage: state.stage,
                });
            }
        }

        entries.sort_by(|a, b| {
            a.next_review_at
                .cmp(&b.next_review_at)
                .then(a.stage.cmp(&b.stage))
        });

        Ok(DueQueue {
            manager: self,
            entries,
        })
    }

    /// Summary counts for the deck
    pub fn stats(&self, now: DateTime<Utc>) -> Result<DeckStats> {
        let records = self.list_records()?;
        Ok(DeckStats::from_records(&records, now, CURRENT_SCHEMA_VERSION))
    }
}

#[derive(Debug, Clone, Copy)]
struct DueEntry {
    id: Uuid,
    next_review_at: DateTime<Utc>,
    stage: u8,
}

/// Ordered snapshot of due record ids. Each call to [`DueQueue::iter`]
/// starts again from the front.
pub struct DueQueue<'a> {
    manager: &'a WordRecordManager,
    entries: Vec<DueEntry>,
}

impl<'a> DueQueue<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn iter(&self) -> DueIter<'_> {
        DueIter {
            manager: self.manager,
            entries: self.entries.iter(),
        }
    }
}

impl<'q> IntoIterator for &'q DueQueue<'_> {
    type Item = Result<WordRecord>;
    type IntoIter = DueIter<'q>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct DueIter<'q> {
    manager: &'q WordRecordManager,
    entries: std::slice::Iter<'q, DueEntry>,
}

impl Iterator for DueIter<'_> {
    type Item = Result<WordRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            match self.manager.load_record(entry.id) {
                Ok(Some(record)) => return Some(Ok(record)),
                // Removed from the store since the queue was built
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entries.len()))
    }
}
