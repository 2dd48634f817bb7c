//! Durable string key-value stores.
//!
//! The binder only needs synchronous `get`/`set` of whole string values,
//! the same capability a browser's local storage offers.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory store with an optional quota over all keys and values, the way
/// browser storage caps an origin.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(limit),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write();

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// File store
// ============================================================================

/// One file per key under a data directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            quota: None,
        }
    }

    /// Rejects any single value larger than `limit` bytes.
    pub fn with_quota(mut self, limit: usize) -> Self {
        self.quota = Some(limit);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    needed: value.len(),
                    limit,
                });
            }
        }

        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_data()?;
        }
        fs::rename(&tmp, &path)?;

        tracing::debug!(key, bytes = value.len(), path = %path.display(), "stored value");
        Ok(())
    }
}
