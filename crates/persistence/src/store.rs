// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::document;
use crate::error::{PersistenceError, Result};
use crate::wal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// An entry read back from a collection log.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<T> {
    pub recorded_at_ms: i64,
    pub value: T,
}

/// Integrity summary of one collection log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogReport {
    pub collection: String,
    pub entries: usize,
    pub bytes: u64,
    pub torn_tail: bool,
}

/// Directory-backed document store.
///
/// Layout under `root`:
/// - `<collection>.log`: append-only framed entries (see [`wal`])
/// - `<collection>/<key>.doc`: singleton documents (see [`document`])
pub struct FileStore {
    root: PathBuf,
    // Serializes read-modify-write of documents within this process.
    doc_lock: Mutex<()>,
    // Serializes appends; holds the collections whose tail was already checked.
    log_lock: Mutex<HashSet<String>>,
}

impl FileStore {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            doc_lock: Mutex::new(()),
            log_lock: Mutex::new(HashSet::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn log_path(&self, collection: &str) -> Result<PathBuf> {
        validate_name(collection)?;
        Ok(self.root.join(format!("{}.log", collection)))
    }

    pub fn document_path(&self, collection: &str, key: &str) -> Result<PathBuf> {
        validate_name(collection)?;
        validate_name(key)?;
        Ok(self.root.join(collection).join(format!("{}.doc", key)))
    }

    /// Appends one entry to a collection log.
    ///
    /// The first append to each collection through this handle cuts any torn
    /// tail a crash left behind, so the new frame starts on a frame boundary.
    pub fn append<T: Serialize>(&self, collection: &str, recorded_at_ms: i64, value: &T) -> Result<()> {
        let path = self.log_path(collection)?;
        let payload = serde_json::to_vec(value)?;

        let mut checked = self.log_lock.lock().unwrap_or_else(|p| p.into_inner());
        if !checked.contains(collection) {
            let removed = wal::truncate_torn_tail(&path)?;
            if removed > 0 {
                tracing::warn!("Cut {} torn bytes from the tail of {}", removed, path.display());
            }
            checked.insert(collection.to_string());
        }
        wal::append_entry(&path, recorded_at_ms, &payload)
    }

    /// Reads every entry of a collection in append order. A missing log is empty.
    pub fn scan<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<Stored<T>>> {
        let path = self.log_path(collection)?;
        let reader = match wal::read_stream(&path) {
            Ok(r) => r,
            Err(PersistenceError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        reader
            .map(|entry| {
                let entry = entry?;
                Ok(Stored {
                    recorded_at_ms: entry.header.recorded_at_ms,
                    value: serde_json::from_slice(&entry.payload)?,
                })
            })
            .collect()
    }

    /// Walks a collection log verifying every frame checksum.
    pub fn verify_collection(&self, collection: &str) -> Result<LogReport> {
        let path = self.log_path(collection)?;
        let mut report = LogReport {
            collection: collection.to_string(),
            entries: 0,
            bytes: 0,
            torn_tail: false,
        };
        if !path.exists() {
            return Ok(report);
        }

        let mut reader = wal::read_stream(&path)?;
        for entry in reader.by_ref() {
            entry?;
            report.entries += 1;
        }
        report.bytes = reader.offset();
        report.torn_tail = reader.torn_tail();
        Ok(report)
    }

    /// Names of all collections that have a log on disk, sorted.
    pub fn collections(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("log") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// All `(collection, key)` pairs with a document on disk, sorted.
    pub fn documents(&self) -> Result<Vec<(String, String)>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let dir = entry?.path();
            if !dir.is_dir() {
                continue;
            }
            let Some(collection) = dir.file_name().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            for doc in fs::read_dir(&dir)? {
                let path = doc?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("doc") {
                    continue;
                }
                if let Some(key) = path.file_stem().and_then(|s| s.to_str()) {
                    found.push((collection.clone(), key.to_string()));
                }
            }
        }
        found.sort();
        Ok(found)
    }

    /// Re-reads a document and checks its header and body checksum.
    pub fn verify_document(&self, collection: &str, key: &str) -> Result<document::DocumentHeader> {
        let path = self.document_path(collection, key)?;
        document::read_document(&path).map(|(header, _)| header)
    }

    pub fn read_document(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let path = self.document_path(collection, key)?;
        match document::read_document(&path) {
            Ok((_, body)) => Ok(Some(serde_json::from_slice(&body)?)),
            Err(PersistenceError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Creates or replaces a document.
    pub fn put_document(&self, collection: &str, key: &str, value: &Value, updated_at_ms: i64) -> Result<()> {
        let path = self.document_path(collection, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let _guard = self.doc_lock.lock().unwrap_or_else(|p| p.into_inner());
        document::write_to(&path, updated_at_ms, &serde_json::to_vec(value)?)
    }

    /// Merges top-level fields into an existing document.
    ///
    /// Fails with [`PersistenceError::NotFound`] when the document does not exist;
    /// it is never created here.
    pub fn merge_document(
        &self,
        collection: &str,
        key: &str,
        patch: &Map<String, Value>,
        updated_at_ms: i64,
    ) -> Result<()> {
        let path = self.document_path(collection, key)?;
        let _guard = self.doc_lock.lock().unwrap_or_else(|p| p.into_inner());

        let body = match document::read_document(&path) {
            Ok((_, body)) => body,
            Err(PersistenceError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound {
                    collection: collection.to_string(),
                    key: key.to_string(),
                })
            }
            Err(e) => return Err(e),
        };

        let mut current: Value = serde_json::from_slice(&body)?;
        let fields = current.as_object_mut().ok_or_else(|| {
            PersistenceError::InvalidFormat(format!("{}/{} is not a JSON object", collection, key))
        })?;
        for (k, v) in patch {
            fields.insert(k.clone(), v.clone());
        }

        document::write_to(&path, updated_at_ms, &serde_json::to_vec(&current)?)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(PersistenceError::InvalidFormat(format!("invalid collection or key name: {:?}", name)))
    }
}
