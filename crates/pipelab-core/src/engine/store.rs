use crate::core::mastery::record::MasteryRecord;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("Store backend failure: {0}")]
    Backend(String),
}

/// Persistence for mastery records, keyed by (user, module).
///
/// `get` distinguishes an absent record (`Ok(None)`) from a stored one with
/// zero counters. `upsert` creates or replaces. Implementations are not required
/// to serialise concurrent read-modify-write cycles on the same key.
pub trait MasteryStore: Send + Sync {
    fn get(&self, user_id: &str, module_id: &str) -> Result<Option<MasteryRecord>, StoreError>;

    fn upsert(&self, record: &MasteryRecord) -> Result<(), StoreError>;

    /// All records of one user, ordered by module identifier.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<MasteryRecord>, StoreError>;
}

type RecordKey = (String, String);

fn key_of(record: &MasteryRecord) -> RecordKey {
    (record.user_id().to_string(), record.module_id().to_string())
}

fn sorted_for_user<'a>(
    records: impl Iterator<Item = &'a MasteryRecord>,
    user_id: &str,
) -> Vec<MasteryRecord> {
    let mut found: Vec<MasteryRecord> = records
        .filter(|r| r.user_id() == user_id)
        .cloned()
        .collect();
    found.sort_by(|a, b| a.module_id().cmp(b.module_id()));
    found
}

#[derive(Debug, Default)]
pub struct MemoryMasteryStore {
    records: RwLock<HashMap<RecordKey, MasteryRecord>>,
}

impl MemoryMasteryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MasteryStore for MemoryMasteryStore {
    fn get(&self, user_id: &str, module_id: &str) -> Result<Option<MasteryRecord>, StoreError> {
        let key = (user_id.to_string(), module_id.to_string());
        Ok(self.records.read().get(&key).cloned())
    }

    fn upsert(&self, record: &MasteryRecord) -> Result<(), StoreError> {
        self.records.write().insert(key_of(record), record.clone());
        Ok(())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<MasteryRecord>, StoreError> {
        Ok(sorted_for_user(self.records.read().values(), user_id))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    records: Vec<MasteryRecord>,
}

/// A single JSON document on disk, rewritten in full on every upsert.
#[derive(Debug)]
pub struct JsonFileMasteryStore {
    path: PathBuf,
    records: RwLock<HashMap<RecordKey, MasteryRecord>>,
}

impl JsonFileMasteryStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let records = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
            let document: StoreDocument =
                serde_json::from_str(&content).map_err(|e| StoreError::Json {
                    path: path.to_string_lossy().to_string(),
                    source: e,
                })?;
            document
                .records
                .into_iter()
                .map(|r| (key_of(&r), r))
                .collect()
        } else {
            HashMap::new()
        };
        debug!("Opened mastery store at {:?} with {} record(s).", path, records.len());
        Ok(Self {
            path: path.to_path_buf(),
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &HashMap<RecordKey, MasteryRecord>) -> Result<(), StoreError> {
        let mut ordered: Vec<MasteryRecord> = records.values().cloned().collect();
        ordered.sort_by(|a, b| {
            (a.user_id(), a.module_id()).cmp(&(b.user_id(), b.module_id()))
        });
        let document = StoreDocument { records: ordered };
        let json = serde_json::to_string_pretty(&document).map_err(|e| StoreError::Json {
            path: self.path.to_string_lossy().to_string(),
            source: e,
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_string_lossy().to_string(),
                source: e,
            })?;
        }
        std::fs::write(&self.path, json).map_err(|e| StoreError::Io {
            path: self.path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

impl MasteryStore for JsonFileMasteryStore {
    fn get(&self, user_id: &str, module_id: &str) -> Result<Option<MasteryRecord>, StoreError> {
        let key = (user_id.to_string(), module_id.to_string());
        Ok(self.records.read().get(&key).cloned())
    }

    fn upsert(&self, record: &MasteryRecord) -> Result<(), StoreError> {
        let mut records = self.records.write();
        records.insert(key_of(record), record.clone());
        self.persist(&records)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<MasteryRecord>, StoreError> {
        Ok(sorted_for_user(self.records.read().values(), user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mastery::level::SkillLevel;
    use tempfile::tempdir;

    #[test]
    fn memory_store_returns_none_for_absent_record() {
        let store = MemoryMasteryStore::new();
        assert!(store.get("ada", "esmfold").unwrap().is_none());
    }

    #[test]
    fn memory_store_upsert_creates_then_replaces() {
        let store = MemoryMasteryStore::new();
        let mut record = MasteryRecord::new("ada", "esmfold");
        store.upsert(&record).unwrap();
        assert_eq!(store.get("ada", "esmfold").unwrap(), Some(record.clone()));

        record.explore_concept("plddt");
        store.upsert(&record).unwrap();
        let stored = store.get("ada", "esmfold").unwrap().unwrap();
        assert_eq!(stored.concepts_explored().len(), 1);
    }

    #[test]
    fn list_for_user_is_sorted_and_scoped() {
        let store = MemoryMasteryStore::new();
        for (user, module) in [("ada", "foldx"), ("bob", "esmfold"), ("ada", "diffdock")] {
            store.upsert(&MasteryRecord::new(user, module)).unwrap();
        }
        let modules: Vec<_> = store
            .list_for_user("ada")
            .unwrap()
            .into_iter()
            .map(|r| r.module_id().to_string())
            .collect();
        assert_eq!(modules, vec!["diffdock", "foldx"]);
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("mastery.json");

        let store = JsonFileMasteryStore::open(&path).unwrap();
        let mut record = MasteryRecord::new("ada", "esmfold");
        record.explore_concept("plddt");
        record.ask_question();
        record.promote_to(SkillLevel::Beginner);
        store.upsert(&record).unwrap();
        drop(store);

        let reopened = JsonFileMasteryStore::open(&path).unwrap();
        let restored = reopened.get("ada", "esmfold").unwrap().unwrap();
        assert_eq!(restored, record);
        assert_eq!(restored.skill_level(), SkillLevel::Beginner);
    }

    #[test]
    fn json_store_on_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileMasteryStore::open(&dir.path().join("absent.json")).unwrap();
        assert!(store.list_for_user("ada").unwrap().is_empty());
    }

    #[test]
    fn json_store_reports_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mastery.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileMasteryStore::open(&path),
            Err(StoreError::Json { .. })
        ));
    }
}
