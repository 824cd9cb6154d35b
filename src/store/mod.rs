//! Document Store
//!
//! A small document-collection abstraction shared by the item catalog and the
//! cart. Each collection keeps its documents in a `DashMap` keyed by SKU and,
//! when opened against a data directory, mirrors its contents to a JSON
//! snapshot file after every mutation.

use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::sync::Mutex;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a snapshot file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// =============================================================================
// Collections
// =============================================================================

/// A record that can live in a [`Collection`].
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Unique key of the document within its collection.
    fn key(&self) -> &str;
}

/// A named set of documents, optionally backed by a JSON snapshot file.
pub struct Collection<T> {
    name: &'static str,
    documents: DashMap<String, T>,
    snapshot_path: Option<PathBuf>,
    /// Serializes snapshot writes so the last flush always wins.
    flush_lock: Mutex<()>,
}

impl<T: Document> Collection<T> {
    /// Creates an empty collection that is never written to disk.
    pub fn in_memory(name: &'static str) -> Self {
        Self {
            name,
            documents: DashMap::new(),
            snapshot_path: None,
            flush_lock: Mutex::new(()),
        }
    }

    /// Opens `<data_dir>/<name>.json`, loading any documents already stored there.
    ///
    /// The directory is created if it does not exist yet. A missing snapshot
    /// file yields an empty collection.
    pub async fn open(name: &'static str, data_dir: &Path) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| StoreError::io(data_dir, e))?;

        let path = data_dir.join(format!("{name}.json"));
        let documents = DashMap::new();

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let stored: Vec<T> = serde_json::from_slice(&bytes)?;
                for doc in stored {
                    documents.insert(doc.key().to_string(), doc);
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(&path, e)),
        }

        tracing::info!(
            collection = name,
            path = %path.display(),
            count = documents.len(),
            "Collection loaded"
        );

        Ok(Self {
            name,
            documents,
            snapshot_path: Some(path),
            flush_lock: Mutex::new(()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Direct access to the underlying map, for entry-level read-modify-write.
    ///
    /// Guards obtained from the map must be dropped before awaiting.
    pub fn documents(&self) -> &DashMap<String, T> {
        &self.documents
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.documents.get(key).map(|doc| doc.value().clone())
    }

    /// Returns a copy of every document, in no particular order.
    pub fn all(&self) -> Vec<T> {
        self.documents.iter().map(|doc| doc.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Writes the current contents to the snapshot file, if there is one.
    ///
    /// The snapshot is written to a temporary sibling and renamed into place.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let _guard = self.flush_lock.lock().await;
        let bytes = serde_json::to_vec_pretty(&self.all())?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes)
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| StoreError::io(path, e))?;

        tracing::debug!(collection = self.name, "Collection flushed");
        Ok(())
    }

    /// Flushes after a single-document change, undoing it if the write fails.
    ///
    /// `previous` is the document stored under `key` before the change, or
    /// `None` if there was none.
    pub async fn flush_or_revert(&self, key: &str, previous: Option<T>) -> Result<(), StoreError> {
        let result = self.flush().await;
        if result.is_err() {
            tracing::warn!(collection = self.name, key, "Flush failed, reverting change");
            match previous {
                Some(doc) => {
                    self.documents.insert(key.to_string(), doc);
                }
                None => {
                    self.documents.remove(key);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        key: String,
        body: String,
    }

    impl Document for Note {
        fn key(&self) -> &str {
            &self.key
        }
    }

    fn note(key: &str, body: &str) -> Note {
        Note {
            key: key.into(),
            body: body.into(),
        }
    }

    #[tokio::test]
    async fn in_memory_flush_is_a_no_op() {
        let notes: Collection<Note> = Collection::in_memory("notes");
        notes.documents().insert("a".into(), note("a", "first"));

        notes.flush().await.expect("flush should succeed");

        assert_eq!(notes.len(), 1);
        assert_eq!(notes.get("a"), Some(note("a", "first")));
        assert_eq!(notes.name(), "notes");
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let notes: Collection<Note> = Collection::open("notes", dir.path()).await.unwrap();
        assert!(notes.is_empty());
        notes.documents().insert("a".into(), note("a", "first"));
        notes.documents().insert("b".into(), note("b", "second"));
        notes.documents().remove("a");
        notes.flush().await.unwrap();

        let reopened: Collection<Note> = Collection::open("notes", dir.path()).await.unwrap();
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get("b"), Some(note("b", "second")));
        assert!(reopened.get("a").is_none());
        assert!(dir.path().join("notes.json").exists());
        assert!(!dir.path().join("notes.json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_flush_reverts_the_change() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let notes: Collection<Note> = Collection::open("notes", &data).await.unwrap();
        notes.documents().insert("a".into(), note("a", "first"));
        notes.flush().await.unwrap();
        std::fs::remove_dir_all(&data).unwrap();

        notes.documents().insert("b".into(), note("b", "new"));
        let result = notes.flush_or_revert("b", None).await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(notes.get("b").is_none());

        let previous = notes.documents().remove("a").map(|(_, doc)| doc);
        assert!(notes.flush_or_revert("a", previous).await.is_err());
        assert_eq!(notes.get("a"), Some(note("a", "first")));
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.json"), b"not json").unwrap();

        let result: Result<Collection<Note>, _> = Collection::open("notes", dir.path()).await;

        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
