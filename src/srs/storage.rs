//! Persistence for review schedules
//!
//! Directory structure:
//! ```text
//! <user-data>/srs/
//! └── {language}/
//!     └── {resource-type}/
//!         └── {sidecar-name}.json
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use super::models::{ScheduleDocument, ScheduleKey};
use crate::resources::store::write_atomic;
use crate::resources::ResourceError;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt schedule state: {0}")]
    CorruptState(String),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Backing store for schedule documents
pub trait ScheduleRepository: Send + Sync {
    /// Load the stored document. A schedule that was never saved loads as
    /// an empty document; unreadable content is `CorruptState`.
    fn load_schedule(&self, key: &ScheduleKey) -> Result<ScheduleDocument>;

    fn save_schedule(&self, key: &ScheduleKey, document: &ScheduleDocument) -> Result<()>;
}

/// One JSON sidecar file per resource
#[derive(Debug, Clone)]
pub struct JsonScheduleRepository {
    /// Scheduler root (e.g., ~/.mllt-cli/user-data/srs)
    srs_dir: PathBuf,
}

impl JsonScheduleRepository {
    pub fn new(srs_dir: PathBuf) -> Self {
        Self { srs_dir }
    }

    /// Sidecar path for a schedule
    pub fn schedule_path(&self, key: &ScheduleKey) -> PathBuf {
        self.srs_dir
            .join(&key.language)
            .join(key.resource_type.as_str())
            .join(format!("{}.json", key.sidecar_name()))
    }
}

impl ScheduleRepository for JsonScheduleRepository {
    fn load_schedule(&self, key: &ScheduleKey) -> Result<ScheduleDocument> {
        let path = self.schedule_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ScheduleDocument::default()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(ScheduleDocument::default());
        }

        serde_json::from_str(&content)
            .map_err(|e| ScheduleError::CorruptState(format!("{}: {}", path.display(), e)))
    }

    fn save_schedule(&self, key: &ScheduleKey, document: &ScheduleDocument) -> Result<()> {
        let path = self.schedule_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(document)?;
        write_atomic(&path, &json)?;
        Ok(())
    }
}

/// In-process repository, used where nothing should reach the disk
#[derive(Debug, Default)]
pub struct MemoryScheduleRepository {
    documents: Mutex<HashMap<ScheduleKey, ScheduleDocument>>,
}

impl MemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleRepository for MemoryScheduleRepository {
    fn load_schedule(&self, key: &ScheduleKey) -> Result<ScheduleDocument> {
        let documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        Ok(documents.get(key).cloned().unwrap_or_default())
    }

    fn save_schedule(&self, key: &ScheduleKey, document: &ScheduleDocument) -> Result<()> {
        let mut documents = self.documents.lock().unwrap_or_else(|e| e.into_inner());
        documents.insert(key.clone(), document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceType;
    use crate::srs::models::ItemState;
    use tempfile::TempDir;

    fn create_test_repository() -> (JsonScheduleRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonScheduleRepository::new(temp_dir.path().join("srs"));
        (repo, temp_dir)
    }

    fn key() -> ScheduleKey {
        ScheduleKey::new("english", ResourceType::Words, "travel/verbs")
    }

    #[test]
    fn test_schedule_path() {
        let (repo, temp) = create_test_repository();
        assert_eq!(
            repo.schedule_path(&key()),
            temp.path().join("srs/english/words/travel_verbs.json")
        );
    }

    #[test]
    fn test_missing_or_empty_file_is_empty_document() {
        let (repo, _temp) = create_test_repository();
        assert!(repo.load_schedule(&key()).unwrap().items.is_empty());

        let path = repo.schedule_path(&key());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "  \n").unwrap();
        assert!(repo.load_schedule(&key()).unwrap().items.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (repo, _temp) = create_test_repository();
        let mut doc = ScheduleDocument::default();
        doc.items.insert("go".to_string(), ItemState { stage: 2, due_at: None });

        repo.save_schedule(&key(), &doc).unwrap();
        assert_eq!(repo.load_schedule(&key()).unwrap(), doc);
    }

    #[test]
    fn test_corrupt_file() {
        let (repo, _temp) = create_test_repository();
        let path = repo.schedule_path(&key());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let err = repo.load_schedule(&key()).unwrap_err();
        assert!(matches!(err, ScheduleError::CorruptState(_)));
    }

    #[test]
    fn test_memory_repository() {
        let repo = MemoryScheduleRepository::new();
        assert!(repo.load_schedule(&key()).unwrap().items.is_empty());

        let mut doc = ScheduleDocument::default();
        doc.items.insert("go".to_string(), ItemState::default());
        repo.save_schedule(&key(), &doc).unwrap();
        assert_eq!(repo.load_schedule(&key()).unwrap(), doc);
    }
}
