//! Field-by-field enhancement with persisted progress
//!
//! Each field moves `Empty -> Pending -> Complete`, or back to `Empty` when
//! generation fails, times out or is cancelled. Only `Complete` is written,
//! together with the value, in one record update.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex as AsyncMutex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::fields::{EnhancementField, FieldValue};
use super::parse::{parse_response, soft_limit_excess};
use super::prompts;
use super::provider::AiProvider;
use super::CURRENT_SCHEMA_VERSION;
use crate::error::{CoreError, FailureCause, Result};
use crate::words::{WordRecord, WordRecordManager};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

type FieldKey = (Uuid, EnhancementField);

/// Outcome of a successful `ensure_field`
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancementResult {
    pub field: EnhancementField,
    pub value: FieldValue,
    /// True when the value was already complete and no provider call was made
    pub cached: bool,
}

/// Per-field outcome of `ensure_all`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementReport {
    pub completed: Vec<EnhancementField>,
    pub cached: Vec<EnhancementField>,
    pub failed: Vec<FailedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedField {
    pub field: EnhancementField,
    pub reason: String,
}

impl EnhancementReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fields that are complete after the run, fresh or cached
    pub fn available(&self) -> impl Iterator<Item = EnhancementField> + '_ {
        self.completed.iter().chain(self.cached.iter()).copied()
    }
}

/// Drives an [`AiProvider`] to fill in enhancement fields
pub struct EnhancementTracker {
    manager: Arc<WordRecordManager>,
    provider: Arc<dyn AiProvider>,
    timeout: Duration,
    schema_version: u32,
    /// One async lock per (record, field) with a generation in flight
    in_flight: Mutex<HashMap<FieldKey, Arc<AsyncMutex<()>>>>,
}

/// Holds a slot in `in_flight` and prunes it on drop once nobody else waits.
/// Dropping also covers futures cancelled mid-generation.
struct InFlightSlot<'a> {
    tracker: &'a EnhancementTracker,
    key: FieldKey,
    lock: Arc<AsyncMutex<()>>,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        let mut slots = self.tracker.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if Arc::strong_count(&self.lock) == 2 {
            slots.remove(&self.key);
        }
    }
}

impl EnhancementTracker {
    pub fn new(manager: Arc<WordRecordManager>, provider: Arc<dyn AiProvider>) -> Self {
        Self {
            manager,
            provider,
            timeout: DEFAULT_TIMEOUT,
            schema_version: CURRENT_SCHEMA_VERSION,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Bound on a single provider call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_schema_version(mut self, version: u32) -> Self {
        self.schema_version = version;
        self
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn manager(&self) -> &Arc<WordRecordManager> {
        &self.manager
    }

    /// Make sure `field` of record `id` is generated, calling the provider
    /// only if it is not already complete under the current schema version.
    pub async fn ensure_field(&self, id: Uuid, field: EnhancementField) -> Result<EnhancementResult> {
        if let Some(result) = self.cached(&self.manager.get_record(id)?, field) {
            log::debug!("{} of {} already complete", field, id);
            return Ok(result);
        }

        let slot = self.slot(id, field);
        let _guard = slot.lock.lock().await;
        self.generate(id, field).await
    }

    /// [`ensure_field`](Self::ensure_field), abandoned when `token` fires.
    /// A cancelled field stays empty.
    pub async fn ensure_field_with_cancel(
        &self,
        id: Uuid,
        field: EnhancementField,
        token: &CancellationToken,
    ) -> Result<EnhancementResult> {
        if token.is_cancelled() {
            // Completed fields are still served
            let record = self.manager.get_record(id)?;
            return self
                .cached(&record, field)
                .ok_or_else(|| failed(field, FailureCause::Cancelled));
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::debug!("Generation of {} for {} cancelled", field, id);
                Err(failed(field, FailureCause::Cancelled))
            }
            result = self.ensure_field(id, field) => result,
        }
    }

    /// Ensure each field independently. A failed field is reported and the
    /// remaining fields are still attempted.
    pub async fn ensure_all(&self, id: Uuid, fields: &[EnhancementField]) -> Result<EnhancementReport> {
        self.ensure_all_with_cancel(id, fields, &CancellationToken::new()).await
    }

    /// [`ensure_all`](Self::ensure_all) where firing `token` reports every
    /// field not yet complete as cancelled
    pub async fn ensure_all_with_cancel(
        &self,
        id: Uuid,
        fields: &[EnhancementField],
        token: &CancellationToken,
    ) -> Result<EnhancementReport> {
        let mut report = EnhancementReport::default();
        let mut seen = Vec::with_capacity(fields.len());

        for &field in fields {
            if seen.contains(&field) {
                continue;
            }
            seen.push(field);

            match self.ensure_field_with_cancel(id, field, token).await {
                Ok(result) if result.cached => report.cached.push(field),
                Ok(_) => report.completed.push(field),
                Err(CoreError::EnhancementFailed { field, cause }) => report.failed.push(FailedField {
                    field,
                    reason: cause.to_string(),
                }),
                Err(e) => return Err(e),
            }
        }

        if !report.failed.is_empty() {
            log::warn!(
                "Enhancement of {} finished with {} failed field(s)",
                id,
                report.failed.len()
            );
        }
        Ok(report)
    }

    /// The eager field set, plus synonyms and antonyms when `with_lazy`
    pub async fn ensure_eager(&self, id: Uuid, with_lazy: bool) -> Result<EnhancementReport> {
        let mut fields = EnhancementField::EAGER.to_vec();
        if with_lazy {
            fields.extend([EnhancementField::Synonyms, EnhancementField::Antonyms]);
        }
        self.ensure_all(id, &fields).await
    }

    fn cached(&self, record: &WordRecord, field: EnhancementField) -> Option<EnhancementResult> {
        if !record.enhancement_status.is_complete_at(field, self.schema_version) {
            return None;
        }
        record.field_value(field).map(|value| EnhancementResult {
            field,
            value,
            cached: true,
        })
    }

    fn slot(&self, id: Uuid, field: EnhancementField) -> InFlightSlot<'_> {
        let mut slots = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let lock = Arc::clone(
            slots
                .entry((id, field))
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        );
        InFlightSlot {
            tracker: self,
            key: (id, field),
            lock,
        }
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Runs with the field's in-flight lock held
    async fn generate(&self, id: Uuid, field: EnhancementField) -> Result<EnhancementResult> {
        // Whoever held the lock before may have finished the job
        let record = self.manager.get_record(id)?;
        if let Some(result) = self.cached(&record, field) {
            log::debug!("{} of '{}' completed by a concurrent call", field, record.word);
            return Ok(result);
        }

        let prompt = prompts::render(field, &record.word);
        let call = self.provider.generate(&record.word, field, &prompt);
        let raw = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                log::warn!("Provider failed on {} of '{}': {}", field, record.word, e);
                return Err(failed(field, FailureCause::Provider(e.to_string())));
            }
            Err(_) => {
                log::warn!("Provider timed out on {} of '{}'", field, record.word);
                return Err(failed(field, FailureCause::Timeout(self.timeout)));
            }
        };

        let value = parse_response(field, &raw).map_err(|reason| {
            log::warn!("Unusable {} for '{}': {}", field, record.word, reason);
            failed(field, FailureCause::Malformed(reason))
        })?;

        if let Some((count, limit)) = soft_limit_excess(field, &value) {
            log::warn!(
                "{} of '{}' is {} characters, over the soft limit of {}",
                field,
                record.word,
                count,
                limit
            );
        }

        let version = self.schema_version;
        let source = self.provider.name().to_string();
        let now = self.manager.now();

        let updated = self.manager.update_record(id, |record| {
            if !record.set_field_value(field, value) {
                return Err(failed(
                    field,
                    FailureCause::Malformed("value does not fit the field".to_string()),
                ));
            }

            let status = &mut record.enhancement_status;
            // Older flags are void; a newer stored version is never lowered
            if status.enhancement_version < version {
                if status.fields.values().any(|done| *done) {
                    log::info!(
                        "Enhancement schema {} -> {} for '{}': earlier fields will be regenerated",
                        status.enhancement_version,
                        version,
                        record.word
                    );
                }
                status.fields.clear();
                status.enhancement_version = version;
            }
            status.fields.insert(field, true);
            status.last_enhanced_at = Some(now);
            status.enhancement_source = Some(source);
            Ok(())
        })?;

        log::info!("Generated {} for '{}'", field, updated.word);
        let value = updated
            .field_value(field)
            .ok_or_else(|| failed(field, FailureCause::Malformed("empty after write".to_string())))?;
        Ok(EnhancementResult {
            field,
            value,
            cached: false,
        })
    }
}

fn failed(field: EnhancementField, cause: FailureCause) -> CoreError {
    CoreError::EnhancementFailed { field, cause }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhancement::ProviderError;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::collections::HashSet;

    #[derive(Default)]
    struct ScriptedProvider {
        calls: Mutex<Vec<EnhancementField>>,
        failing: HashSet<EnhancementField>,
        blank: HashSet<EnhancementField>,
        error_body: HashSet<EnhancementField>,
        delay: Option<Duration>,
        hang: bool,
    }

    impl ScriptedProvider {
        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn calls_for(&self, field: EnhancementField) -> usize {
            self.calls.lock().unwrap().iter().filter(|f| **f == field).count()
        }
    }

    fn canned(word: &str, field: EnhancementField) -> String {
        match field {
            EnhancementField::Collocations => format!("{word} beauty：短暂的美\n{word} fame：昙花一现的名声"),
            EnhancementField::Example => format!("Fame is {word}. —— 名声是短暂的。"),
            EnhancementField::Synonyms => {
                r#"{"synonyms": [{"word": "transient", "example": "a transient visitor", "difference": "强调经过"}]}"#
                    .to_string()
            }
            EnhancementField::Antonyms => {
                r#"{"antonyms": [{"word": "permanent", "example": "not ephemeral but permanent"}]}"#.to_string()
            }
            other => format!("```json\n{{\"{}\": \"{}-{}\"}}\n```", other.key(), other.key(), word),
        }
    }

    #[async_trait]
    impl AiProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, word: &str, field: EnhancementField, _prompt: &str) -> std::result::Result<String, ProviderError> {
            self.calls.lock().unwrap().push(field);
            if self.hang {
                std::future::pending::<()>().await;
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.failing.contains(&field) {
                return Err(ProviderError::Status {
                    status: 503,
                    message: "busy".to_string(),
                });
            }
            if self.blank.contains(&field) {
                return Ok("```\n```".to_string());
            }
            if self.error_body.contains(&field) {
                return Ok(r#"{"error": "rate limited, try later"}"#.to_string());
            }
            Ok(canned(word, field))
        }
    }

    fn setup(provider: ScriptedProvider) -> (EnhancementTracker, Arc<ScriptedProvider>, Uuid) {
        let manager = Arc::new(WordRecordManager::new(Arc::new(MemoryStore::new()), "alice").unwrap());
        let id = manager.create_record("ephemeral").unwrap().id;
        let provider = Arc::new(provider);
        let tracker = EnhancementTracker::new(manager, provider.clone()).with_timeout(Duration::from_millis(200));
        (tracker, provider, id)
    }

    #[tokio::test]
    async fn test_ensure_field_is_idempotent() {
        let (tracker, provider, id) = setup(ScriptedProvider::default());

        let first = tracker.ensure_field(id, EnhancementField::Definition).await.unwrap();
        let second = tracker.ensure_field(id, EnhancementField::Definition).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.value, second.value);
        assert_eq!(first.value, FieldValue::Text("definition-ephemeral".into()));

        let record = tracker.manager().get_record(id).unwrap();
        let status = &record.enhancement_status;
        assert!(status.is_complete_at(EnhancementField::Definition, CURRENT_SCHEMA_VERSION));
        assert_eq!(status.enhancement_source.as_deref(), Some("scripted"));
        assert!(status.last_enhanced_at.is_some());
    }

    #[tokio::test]
    async fn test_partial_failure_does_not_block_siblings() {
        let provider = ScriptedProvider {
            failing: HashSet::from([EnhancementField::Collocations]),
            ..Default::default()
        };
        let (tracker, provider, id) = setup(provider);
        let fields = [
            EnhancementField::Definition,
            EnhancementField::ChineseMeaning,
            EnhancementField::Collocations,
            EnhancementField::Example,
            EnhancementField::MemoryTip,
        ];

        let report = tracker.ensure_all(id, &fields).await.unwrap();

        assert_eq!(provider.call_count(), 5);
        assert_eq!(report.completed.len(), 4);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].field, EnhancementField::Collocations);
        assert!(!report.is_complete());

        let record = tracker.manager().get_record(id).unwrap();
        for field in fields {
            let done = record.enhancement_status.is_complete_at(field, CURRENT_SCHEMA_VERSION);
            assert_eq!(done, field != EnhancementField::Collocations, "{}", field);
        }
        assert!(record.enhancement.collocations.is_empty());

        // A retry only asks for the missing field
        let retry = tracker.ensure_all(id, &fields).await.unwrap();
        assert_eq!(retry.cached.len(), 4);
        assert_eq!(provider.calls_for(EnhancementField::Definition), 1);
        assert_eq!(provider.calls_for(EnhancementField::Collocations), 2);
    }

    #[tokio::test]
    async fn test_timeout_leaves_field_empty() {
        let (tracker, _, id) = setup(ScriptedProvider {
            hang: true,
            ..Default::default()
        });
        let tracker = tracker.with_timeout(Duration::from_millis(30));

        let err = tracker.ensure_field(id, EnhancementField::Definition).await.unwrap_err();
        match err {
            CoreError::EnhancementFailed { field, cause } => {
                assert_eq!(field, EnhancementField::Definition);
                assert_eq!(cause, FailureCause::Timeout(Duration::from_millis(30)));
            }
            other => panic!("unexpected error: {other}"),
        }

        let record = tracker.manager().get_record(id).unwrap();
        assert!(!record.enhancement_status.is_marked(EnhancementField::Definition));
        assert!(record.enhancement.definition.is_none());
        assert_eq!(tracker.in_flight_len(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_and_blank_response() {
        let provider = ScriptedProvider {
            failing: HashSet::from([EnhancementField::Phonetic]),
            blank: HashSet::from([EnhancementField::Association]),
            ..Default::default()
        };
        let (tracker, _, id) = setup(provider);

        let err = tracker.ensure_field(id, EnhancementField::Phonetic).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::EnhancementFailed {
                cause: FailureCause::Provider(_),
                ..
            }
        ));
        assert!(err.is_retryable());

        let err = tracker.ensure_field(id, EnhancementField::Association).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::EnhancementFailed {
                cause: FailureCause::Malformed(_),
                ..
            }
        ));

        let record = tracker.manager().get_record(id).unwrap();
        assert!(record.enhancement_status.fields.is_empty());
        assert!(record.base_fields.phonetic.is_none());
        assert!(record.enhancement.association.is_none());
    }

    #[tokio::test]
    async fn test_cancellation_leaves_field_empty() {
        let (tracker, _, id) = setup(ScriptedProvider {
            hang: true,
            ..Default::default()
        });
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = tracker
            .ensure_field_with_cancel(id, EnhancementField::MemoryTip, &token)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::EnhancementFailed {
                cause: FailureCause::Cancelled,
                ..
            }
        ));

        let record = tracker.manager().get_record(id).unwrap();
        assert!(!record.enhancement_status.is_marked(EnhancementField::MemoryTip));
        assert!(record.enhancement.memory_tip.is_none());
        assert_eq!(tracker.in_flight_len(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_batch_keeps_completed_fields() {
        let (tracker, provider, id) = setup(ScriptedProvider::default());
        tracker.ensure_field(id, EnhancementField::Definition).await.unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let report = tracker
            .ensure_all_with_cancel(id, &[EnhancementField::Definition, EnhancementField::Example], &token)
            .await
            .unwrap();

        assert_eq!(report.cached, vec![EnhancementField::Definition]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].field, EnhancementField::Example);
        assert_eq!(report.failed[0].reason, "cancelled");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_generation() {
        let (tracker, provider, id) = setup(ScriptedProvider {
            delay: Some(Duration::from_millis(40)),
            ..Default::default()
        });

        let (a, b) = tokio::join!(
            tracker.ensure_field(id, EnhancementField::Example),
            tracker.ensure_field(id, EnhancementField::Example)
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(provider.calls_for(EnhancementField::Example), 1);
        assert_eq!(a.value, b.value);
        assert!(a.cached != b.cached);
        assert_eq!(tracker.in_flight_len(), 0);
    }

    #[tokio::test]
    async fn test_schema_bump_regenerates_once() {
        let (tracker, provider, id) = setup(ScriptedProvider::default());
        tracker.ensure_field(id, EnhancementField::Definition).await.unwrap();
        tracker.ensure_field(id, EnhancementField::ChineseMeaning).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        let manager = tracker.manager().clone();
        let bumped = EnhancementTracker::new(manager.clone(), provider.clone())
            .with_schema_version(CURRENT_SCHEMA_VERSION + 1);

        let result = bumped.ensure_field(id, EnhancementField::Definition).await.unwrap();
        assert!(!result.cached);
        assert_eq!(provider.calls_for(EnhancementField::Definition), 2);

        let record = manager.get_record(id).unwrap();
        let status = &record.enhancement_status;
        assert_eq!(status.enhancement_version, CURRENT_SCHEMA_VERSION + 1);
        assert!(status.is_complete_at(EnhancementField::Definition, CURRENT_SCHEMA_VERSION + 1));
        assert!(!status.is_marked(EnhancementField::ChineseMeaning));

        bumped.ensure_field(id, EnhancementField::Definition).await.unwrap();
        assert_eq!(provider.calls_for(EnhancementField::Definition), 2);

        bumped.ensure_field(id, EnhancementField::ChineseMeaning).await.unwrap();
        bumped.ensure_field(id, EnhancementField::ChineseMeaning).await.unwrap();
        assert_eq!(provider.calls_for(EnhancementField::ChineseMeaning), 2);
    }

    #[tokio::test]
    async fn test_json_error_body_is_not_stored() {
        let provider = ScriptedProvider {
            error_body: HashSet::from([EnhancementField::Definition]),
            ..Default::default()
        };
        let (tracker, provider, id) = setup(provider);

        let err = tracker.ensure_field(id, EnhancementField::Definition).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::EnhancementFailed {
                field: EnhancementField::Definition,
                cause: FailureCause::Malformed(_),
            }
        ));

        let record = tracker.manager().get_record(id).unwrap();
        assert!(!record.enhancement_status.is_marked(EnhancementField::Definition));
        assert!(record.enhancement.definition.is_none());

        // Still empty, so the next call goes back to the provider
        let _ = tracker.ensure_field(id, EnhancementField::Definition).await;
        assert_eq!(provider.calls_for(EnhancementField::Definition), 2);
    }

    #[tokio::test]
    async fn test_newer_schema_is_kept_by_older_tracker() {
        let (tracker, provider, id) = setup(ScriptedProvider::default());
        let manager = tracker.manager().clone();
        let newer = EnhancementTracker::new(manager.clone(), provider.clone())
            .with_schema_version(CURRENT_SCHEMA_VERSION + 1);
        newer.ensure_field(id, EnhancementField::Definition).await.unwrap();
        assert_eq!(provider.call_count(), 1);

        let result = tracker.ensure_field(id, EnhancementField::Definition).await.unwrap();
        assert!(result.cached);
        assert_eq!(provider.call_count(), 1);

        tracker.ensure_field(id, EnhancementField::ChineseMeaning).await.unwrap();
        let record = manager.get_record(id).unwrap();
        let status = &record.enhancement_status;
        assert_eq!(status.enhancement_version, CURRENT_SCHEMA_VERSION + 1);
        assert!(status.is_marked(EnhancementField::Definition));
        assert!(status.is_marked(EnhancementField::ChineseMeaning));
        assert_eq!(record.enhancement.definition.as_deref(), Some("definition-ephemeral"));
    }

    #[tokio::test]
    async fn test_eager_set_and_lazy_fields() {
        let (tracker, provider, id) = setup(ScriptedProvider::default());

        let report = tracker.ensure_eager(id, false).await.unwrap();
        assert_eq!(report.completed.len(), EnhancementField::EAGER.len());
        assert_eq!(provider.calls_for(EnhancementField::Synonyms), 0);

        let record = tracker.manager().get_record(id).unwrap();
        assert!(record.enhancement_status.is_complete(CURRENT_SCHEMA_VERSION));
        assert_eq!(record.enhancement.collocations.len(), 2);
        assert_eq!(record.enhancement.collocations[0].meaning, "短暂的美");
        assert_eq!(
            record.enhancement.example.as_ref().map(|e| e.translation.as_str()),
            Some("名声是短暂的。")
        );
        assert_eq!(record.base_fields.phonetic.as_deref(), Some("phonetic-ephemeral"));

        let report = tracker.ensure_eager(id, true).await.unwrap();
        assert_eq!(report.cached.len(), EnhancementField::EAGER.len());
        assert_eq!(report.completed, vec![EnhancementField::Synonyms, EnhancementField::Antonyms]);

        let record = tracker.manager().get_record(id).unwrap();
        assert_eq!(record.enhancement.synonyms[0].word, "transient");
        assert_eq!(record.enhancement.antonyms[0].word, "permanent");
    }

    #[tokio::test]
    async fn test_unknown_record() {
        let (tracker, provider, _) = setup(ScriptedProvider::default());
        let err = tracker
            .ensure_field(Uuid::new_v4(), EnhancementField::Definition)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert_eq!(provider.call_count(), 0);
    }
}
