use crate::config::StorageConfig;
use crate::store::{KeyValueStore, StorageError};
use crate::theme::Theme;
use crate::{DOCUMENT_KEY, THEME_KEY};
use binder_migrate::{MigrationReport, ShapeError};
use binder_schema::BinderDocument;
use chrono::NaiveDate;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("not a binder document: {0}")]
    Shape(#[from] ShapeError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Reads and writes the binder document through a [`KeyValueStore`].
///
/// Every inbound path decodes, validates and migrates; every outbound path
/// serializes the canonical document as-is.
pub struct PersistenceGateway<S> {
    store: S,
    document_key: String,
    theme_key: String,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            document_key: DOCUMENT_KEY.to_string(),
            theme_key: THEME_KEY.to_string(),
        }
    }

    pub fn from_config(store: S, config: &StorageConfig) -> Self {
        Self {
            store,
            document_key: config.document_key.clone(),
            theme_key: config.theme_key.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ========================================================================
    // Load / save
    // ========================================================================

    /// Stored document, or `None` if there is none or it cannot be read.
    pub fn load(&self) -> Option<BinderDocument> {
        match self.try_load() {
            Ok(Some((doc, _))) => Some(doc),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(
                    key = %self.document_key,
                    error = %err,
                    "failed to load stored binder data; starting without it"
                );
                None
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<(BinderDocument, MigrationReport)>, GatewayError> {
        let Some(text) = self.store.get(&self.document_key)? else {
            return Ok(None);
        };
        decode(&text).map(Some)
    }

    /// Writes the document. A rejected write is logged and otherwise ignored.
    pub fn save(&self, doc: &BinderDocument) {
        if let Err(err) = self.try_save(doc) {
            tracing::warn!(
                key = %self.document_key,
                error = %err,
                "failed to save binder data; keeping in-memory copy"
            );
        }
    }

    pub fn try_save(&self, doc: &BinderDocument) -> Result<(), GatewayError> {
        let text = encode(doc, false);
        self.store.set(&self.document_key, &text)?;
        Ok(())
    }

    // ========================================================================
    // Export / import
    // ========================================================================

    /// Pretty-printed JSON suitable for a backup file.
    pub fn export_text(&self, doc: &BinderDocument) -> String {
        encode(doc, true)
    }

    /// Parses a backup file. `None` if it is not a binder document.
    pub fn import_text(&self, text: &str) -> Option<BinderDocument> {
        match self.try_import(text) {
            Ok((doc, _)) => Some(doc),
            Err(err) => {
                tracing::warn!(error = %err, "rejected binder import");
                None
            }
        }
    }

    pub fn try_import(&self, text: &str) -> Result<(BinderDocument, MigrationReport), GatewayError> {
        decode(text)
    }

    // ========================================================================
    // Theme preference
    // ========================================================================

    /// Stored theme, if any. Unrecognized values read as unset.
    pub fn load_theme(&self) -> Option<Theme> {
        match self.store.get(&self.theme_key) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(err) => {
                tracing::warn!(key = %self.theme_key, error = %err, "failed to read theme preference");
                None
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) {
        if let Err(err) = self.store.set(&self.theme_key, theme.as_str()) {
            tracing::warn!(key = %self.theme_key, error = %err, "failed to save theme preference");
        }
    }
}

fn decode(text: &str) -> Result<(BinderDocument, MigrationReport), GatewayError> {
    let raw: Value = serde_json::from_str(text)?;
    Ok(binder_migrate::normalize(raw)?)
}

fn encode(doc: &BinderDocument, pretty: bool) -> String {
    // Only strings, lists and an optional string: serialization cannot fail.
    let encoded = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    encoded.expect("binder documents always serialize")
}

/// `emergency-binder-YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("emergency-binder-{}.json", date.format("%Y-%m-%d"))
}
