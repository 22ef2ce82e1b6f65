//! Submission store.
//!
//! Keeps form submissions as a JSON array under one storage key, newest
//! first, capped at [`MAX_SUBMISSIONS`]. Storage problems never reach the
//! caller: unreadable content counts as an empty list and failed writes are
//! reported as [`StoreOutcome::NotPersisted`].

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{MAX_SUBMISSIONS, SUBMISSIONS_KEY};
use crate::types::{AppError, AppResult};

/// Field values of one submission, keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// One stored form submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub data: FormValues,
    /// ISO-8601 creation time. Older entries used `at`.
    #[serde(alias = "at")]
    pub created_at: String,
}

/// String key/value storage, the shape of `window.localStorage`.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;
}

/// In-memory storage, used when the browser offers no `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// What happened to an appended submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Written; `retained` records are now stored.
    Saved { retained: usize },
    /// The write failed and the submission was dropped.
    NotPersisted,
}

/// Append-only, bounded list of submissions.
pub struct SubmissionStore<S> {
    storage: S,
    key: String,
    capacity: usize,
}

impl<S: KeyValueStorage> SubmissionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_capacity(storage, MAX_SUBMISSIONS)
    }

    pub fn with_capacity(storage: S, capacity: usize) -> Self {
        Self {
            storage,
            key: SUBMISSIONS_KEY.to_string(),
            capacity,
        }
    }

    /// Stored records, newest first.
    pub fn records(&self) -> Vec<SubmissionRecord> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Could not read submissions: {}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Discarding unreadable submissions ({}): {}", self.key, e);
            Vec::new()
        })
    }

    /// Append a submission stamped with the current time.
    pub fn append(&self, data: FormValues) -> StoreOutcome {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.append_at(data, now)
    }

    /// Append a submission with an explicit timestamp.
    pub fn append_at(&self, data: FormValues, created_at: String) -> StoreOutcome {
        let mut records = self.records();
        records.insert(0, SubmissionRecord { data, created_at });
        records.truncate(self.capacity);

        match self.write(&records) {
            Ok(()) => StoreOutcome::Saved { retained: records.len() },
            Err(e) => {
                log::warn!("Submission not persisted: {}", e);
                StoreOutcome::NotPersisted
            }
        }
    }

    fn write(&self, records: &[SubmissionRecord]) -> AppResult<()> {
        let json = serde_json::to_string(records).map_err(|e| AppError::Storage(e.to_string()))?;
        self.storage.set_item(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> AppResult<Option<String>> {
            Err(AppError::Storage("SecurityError".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> AppResult<()> {
            Err(AppError::Storage("QuotaExceededError".to_string()))
        }
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_append_adds_exactly_one() {
        let store = SubmissionStore::new(MemoryStorage::default());
        assert!(store.records().is_empty());

        let outcome = store.append(values(&[("nome", "Ana")]));
        assert_eq!(outcome, StoreOutcome::Saved { retained: 1 });
        assert_eq!(store.records().len(), 1);

        store.append(values(&[("nome", "Bia")]));
        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data["nome"], "Bia");
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let store = SubmissionStore::new(MemoryStorage::default());
        for i in 0..MAX_SUBMISSIONS + 3 {
            store.append_at(values(&[("n", &i.to_string())]), format!("t{}", i));
        }

        let records = store.records();
        assert_eq!(records.len(), MAX_SUBMISSIONS);
        assert_eq!(records[0].data["n"], (MAX_SUBMISSIONS + 2).to_string());
        // 0, 1 and 2 were the oldest.
        assert_eq!(records.last().unwrap().data["n"], "3");
    }

    #[test]
    fn test_corrupt_storage_is_treated_as_empty() {
        let storage = MemoryStorage::default();
        storage.set_item(SUBMISSIONS_KEY, "{not json").unwrap();
        let store = SubmissionStore::new(storage);

        assert!(store.records().is_empty());
        assert_eq!(store.append(values(&[("a", "b")])), StoreOutcome::Saved { retained: 1 });
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let store = SubmissionStore::new(ReadOnlyStorage);
        assert!(store.records().is_empty());
        assert_eq!(store.append(values(&[("a", "b")])), StoreOutcome::NotPersisted);
    }

    #[test]
    fn test_wire_format() {
        let storage = MemoryStorage::default();
        let store = SubmissionStore::new(storage);
        store.append_at(values(&[("perfil", "doador")]), "2024-05-01T12:00:00.000Z".to_string());

        let raw = store.storage.get_item(SUBMISSIONS_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"[{"data":{"perfil":"doador"},"createdAt":"2024-05-01T12:00:00.000Z"}]"#);
    }

    #[test]
    fn test_reads_legacy_at_field() {
        let storage = MemoryStorage::default();
        storage
            .set_item(SUBMISSIONS_KEY, r#"[{"data":{"nome":"Ana"},"at":"2023-01-01T00:00:00Z"}]"#)
            .unwrap();
        let store = SubmissionStore::new(storage);

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].created_at, "2023-01-01T00:00:00Z");
    }

    #[test]
    fn test_example_submission_is_stored_verbatim() {
        let submitted = values(&[
            ("nome", "Ana Silva"),
            ("email", "ana@x.com"),
            ("cpf", "123.456.789-09"),
            ("telefone", "(11) 91234-5678"),
            ("nascimento", "1990-01-01"),
            ("endereco", "Rua A, 1"),
            ("cep", "01000-000"),
            ("cidade", "São Paulo"),
            ("estado", "SP"),
            ("perfil", "doador"),
        ]);
        let store = SubmissionStore::new(MemoryStorage::default());
        let before = store.records().len();

        store.append(submitted.clone());

        let records = store.records();
        assert_eq!(records.len(), before + 1);
        assert_eq!(records[0].data, submitted);
        assert!(records[0].created_at.ends_with('Z'));
    }
}
