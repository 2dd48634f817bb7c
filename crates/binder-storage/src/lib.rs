//! Emergency Binder Persistence
//!
//! The only place binder data crosses a durability boundary:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    PERSISTENCE GATEWAY                              │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  ┌──────────┐  load   ┌──────────┐  validate  ┌──────────┐          │
//! │  │ KV store │────────►│  decode  │───────────►│ migrate  │──► doc   │
//! │  │ (file /  │         └──────────┘            └──────────┘          │
//! │  │  memory) │◄──────── save (compact JSON) ◄─────────────── doc     │
//! │  └──────────┘                                                       │
//! │                                                                     │
//! │  backup file ──► import_text ──► (same pipeline) ──► doc | None     │
//! │  doc ──► export_text (pretty JSON) ──► backup file                  │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure policy
//!
//! - **Load**: unreadable or malformed stored data degrades to "no prior data".
//! - **Save**: a rejected write is logged; the in-memory document stays the
//!   source of truth.
//! - **Import**: malformed files yield `None`; the caller shows the
//!   "invalid file" notice.
//!
//! Each of these has a `try_*` twin returning [`GatewayError`] so callers and
//! tests can tell decode, shape and storage failures apart.

pub mod binder;
pub mod config;
pub mod gateway;
pub mod store;
pub mod theme;

#[cfg(test)]
mod tests;

pub use binder::{Binder, Export, InvalidBackup};
pub use config::{ConfigError, StorageConfig};
pub use gateway::{export_file_name, GatewayError, PersistenceGateway};
pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use theme::Theme;

/// Key holding the serialized binder document.
pub const DOCUMENT_KEY: &str = "emergencyBinder";

/// Key holding the theme preference.
pub const THEME_KEY: &str = "emergencyBinderTheme";

/// Opens a binder over a file store at `data_dir` with default keys.
pub fn open_binder(data_dir: impl Into<std::path::PathBuf>) -> Binder<FileStore> {
    let config = StorageConfig {
        data_dir: data_dir.into(),
        ..Default::default()
    };
    Binder::open(PersistenceGateway::from_config(config.open_store(), &config))
}
