use crate::store::FileStore;
use crate::{DOCUMENT_KEY, THEME_KEY};
use std::num::ParseIntError;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "BINDER_DATA_DIR";
pub const MAX_BYTES_ENV: &str = "BINDER_MAX_BYTES";

/// Configuration for binder persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory of the file-backed store
    pub data_dir: PathBuf,
    /// Key of the serialized document
    pub document_key: String,
    /// Key of the theme preference
    pub theme_key: String,
    /// Largest value the store accepts, in bytes. `None` means unlimited.
    pub max_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./binder-data"),
            document_key: DOCUMENT_KEY.to_string(),
            theme_key: THEME_KEY.to_string(),
            max_bytes: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a byte count, got `{value}`")]
    InvalidByteCount {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl StorageConfig {
    /// Defaults overridden by `BINDER_DATA_DIR` and `BINDER_MAX_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup(MAX_BYTES_ENV) {
            let bytes = value
                .trim()
                .parse::<usize>()
                .map_err(|source| ConfigError::InvalidByteCount {
                    var: MAX_BYTES_ENV,
                    value: value.clone(),
                    source,
                })?;
            config.max_bytes = Some(bytes);
        }

        Ok(config)
    }

    pub fn open_store(&self) -> FileStore {
        let store = FileStore::new(&self.data_dir);
        match self.max_bytes {
            Some(limit) => store.with_quota(limit),
            None => store,
        }
    }
}
