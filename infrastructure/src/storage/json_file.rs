//! JSON-file proposal repository
//!
//! Keeps every record in one pretty-printed JSON document so state survives
//! between CLI invocations. Each operation holds an exclusive advisory lock
//! on a `.lock` sidecar for the whole read-modify-write, so separate
//! processes sharing the file never lose each other's writes. Mutations are
//! written to a unique temp file in the same directory and persisted over
//! the document.

use async_trait::async_trait;
use fs2::FileExt;
use govmind_application::{ProposalRepository, RepositoryError};
use govmind_domain::{ProposalId, ProposalRecord};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    proposals: Vec<ProposalRecord>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            proposals: Vec::new(),
        }
    }
}

pub struct JsonFileProposalRepository {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileProposalRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `op` against the current document under the cross-process lock.
    ///
    /// `op` returns its result and whether the document changed; changed
    /// documents are saved before the lock is released.
    async fn with_document<T, F>(&self, op: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&mut StoreDocument) -> (T, bool) + Send + 'static,
    {
        let _guard = self.lock.lock().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let lock_file = acquire_file_lock(&path)?;
            let result: Result<T, RepositoryError> = (|| {
                let mut document = load(&path)?;
                let (value, dirty) = op(&mut document);
                if dirty {
                    document.version = FORMAT_VERSION;
                    save(&path, &document)?;
                }
                Ok(value)
            })();
            let _ = FileExt::unlock(&lock_file);
            result
        })
        .await
        .map_err(|e| RepositoryError::Io(format!("storage task failed: {}", e)))?
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("proposals.json"));
    name.push(".lock");
    path.with_file_name(name)
}

fn acquire_file_lock(path: &Path) -> Result<File, RepositoryError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let lock_path = lock_path(path);
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| io_error(&lock_path, e))?;
    file.lock_exclusive().map_err(|e| io_error(&lock_path, e))?;
    Ok(file)
}

fn load(path: &Path) -> Result<StoreDocument, RepositoryError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StoreDocument::default());
        }
        Err(e) => return Err(io_error(path, e)),
    };

    if text.trim().is_empty() {
        return Ok(StoreDocument::default());
    }

    serde_json::from_str(&text)
        .map_err(|e| RepositoryError::Corrupt(format!("{}: {}", path.display(), e)))
}

fn save(path: &Path, document: &StoreDocument) -> Result<(), RepositoryError> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_error(dir, e))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| io_error(dir, e))?;
    tmp.as_file().sync_all().map_err(|e| io_error(dir, e))?;
    tmp.persist(path).map_err(|e| io_error(path, e.error))?;

    debug!(path = %path.display(), records = document.proposals.len(), "Proposal store saved");
    Ok(())
}

fn io_error(path: &Path, e: std::io::Error) -> RepositoryError {
    RepositoryError::Io(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl ProposalRepository for JsonFileProposalRepository {
    async fn get(&self, id: &ProposalId) -> Result<Option<ProposalRecord>, RepositoryError> {
        let id = id.clone();
        self.with_document(move |document| {
            let found = document.proposals.iter().find(|r| r.id == id).cloned();
            (found, false)
        })
        .await
    }

    async fn insert_if_absent(&self, record: ProposalRecord) -> Result<bool, RepositoryError> {
        self.with_document(move |document| {
            if document.proposals.iter().any(|r| r.id == record.id) {
                return (false, false);
            }
            document.proposals.push(record);
            (true, true)
        })
        .await
    }

    async fn replace(&self, record: ProposalRecord) -> Result<(), RepositoryError> {
        self.with_document(move |document| {
            match document.proposals.iter_mut().find(|r| r.id == record.id) {
                Some(slot) => *slot = record,
                None => document.proposals.push(record),
            }
            ((), true)
        })
        .await
    }

    async fn list(&self) -> Result<Vec<ProposalRecord>, RepositoryError> {
        self.with_document(|document| (std::mem::take(&mut document.proposals), false))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use govmind_domain::{ProposalStatus, ProposalSubmission};
    use tempfile::TempDir;

    fn record(id: &str, title: &str) -> ProposalRecord {
        ProposalRecord::new(
            ProposalId::new(id).unwrap(),
            ProposalSubmission::try_new(title, "Description").unwrap(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileProposalRepository::new(dir.path().join("proposals.json"));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_state_survives_new_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("proposals.json");

        let repo = JsonFileProposalRepository::new(&path);
        assert!(repo.insert_if_absent(record("dao-1", "First")).await.unwrap());
        let analyzing = record("dao-1", "First").start_analysis(Utc::now()).unwrap();
        repo.replace(analyzing).await.unwrap();

        let reopened = JsonFileProposalRepository::new(&path);
        let stored = reopened
            .get(&ProposalId::new("dao-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, ProposalStatus::Analyzing);
        assert_eq!(stored.attempts, 1);
        assert!(!reopened.insert_if_absent(record("dao-1", "Second")).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proposals.json");
        std::fs::write(&path, "{ not json").unwrap();

        let repo = JsonFileProposalRepository::new(&path);
        assert!(matches!(
            repo.list().await,
            Err(RepositoryError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_file_uses_wire_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proposals.json");
        let repo = JsonFileProposalRepository::new(&path);
        repo.insert_if_absent(record("dao-1", "T")).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["proposals"][0]["id"], "dao-1");
        assert_eq!(value["proposals"][0]["status"], "Pending");
        assert!(value["proposals"][0]["submitted_at"].is_string());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_two_instances_do_not_lose_inserts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proposals.json");
        let first = std::sync::Arc::new(JsonFileProposalRepository::new(&path));
        let second = std::sync::Arc::new(JsonFileProposalRepository::new(&path));

        let mut handles = Vec::new();
        for i in 0..20 {
            let repo = if i % 2 == 0 {
                first.clone()
            } else {
                second.clone()
            };
            handles.push(tokio::spawn(async move {
                repo.insert_if_absent(record(&format!("dao-{}", i), "Concurrent"))
                    .await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        let stored = JsonFileProposalRepository::new(&path).list().await.unwrap();
        assert_eq!(stored.len(), 20);
        for i in 0..20 {
            let id = format!("dao-{}", i);
            assert!(stored.iter().any(|r| r.id.as_str() == id), "missing {}", id);
        }
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("proposals.json");
        let repo = JsonFileProposalRepository::new(&path);
        repo.insert_if_absent(record("dao-1", "T")).await.unwrap();
        repo.insert_if_absent(record("dao-2", "T")).await.unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["proposals.json", "proposals.json.lock"]);
    }
}
