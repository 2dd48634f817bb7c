//! The owning application layer over a [`PersistenceGateway`].
//!
//! Holds the in-memory document and saves it explicitly after every accepted
//! mutation. Rejected mutations never reach the store. Debouncing, if wanted,
//! belongs to whoever calls this.

use crate::gateway::{export_file_name, GatewayError, PersistenceGateway};
use crate::store::KeyValueStore;
use binder_migrate::MigrationReport;
use binder_schema::{BinderDocument, Draft, EntityId, EntityKind, EntryError, SearchHits};
use chrono::NaiveDate;

/// Shown to the user when an import is rejected.
#[derive(Debug, thiserror::Error)]
#[error("Invalid file format. Please select a valid Emergency Binder backup file.")]
pub struct InvalidBackup {
    #[source]
    pub cause: GatewayError,
}

/// A backup ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub contents: String,
}

pub struct Binder<S: KeyValueStore> {
    gateway: PersistenceGateway<S>,
    document: BinderDocument,
}

impl<S: KeyValueStore> Binder<S> {
    /// Loads the stored document, or starts empty if there is none usable.
    pub fn open(gateway: PersistenceGateway<S>) -> Self {
        let document = gateway.load().unwrap_or_default();
        tracing::debug!(
            contacts = document.contacts.len(),
            medications = document.medications.len(),
            pets = document.pets.len(),
            insurance_policies = document.insurance_policies.len(),
            notes = document.notes.len(),
            "opened binder"
        );
        Self { gateway, document }
    }

    pub fn document(&self) -> &BinderDocument {
        &self.document
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn add<D: Draft>(&mut self, draft: D) -> Result<EntityId, EntryError> {
        let id = self.document.add(draft)?;
        self.persist();
        Ok(id)
    }

    pub fn update<D: Draft>(&mut self, id: &EntityId, draft: D) -> Result<(), EntryError> {
        self.document.update(id, draft)?;
        self.persist();
        Ok(())
    }

    pub fn remove(&mut self, kind: EntityKind, id: &EntityId) -> Result<(), EntryError> {
        self.document.remove(kind, id)?;
        self.persist();
        Ok(())
    }

    pub fn set_background_image(&mut self, image: Option<String>) {
        self.document.set_background_image(image);
        self.persist();
    }

    pub fn search(&self, query: &str) -> SearchHits<'_> {
        self.document.search(query)
    }

    /// Replaces the whole binder with a backup file's contents.
    ///
    /// On failure the current document is left untouched.
    pub fn import_text(&mut self, text: &str) -> Result<MigrationReport, InvalidBackup> {
        let (document, report) = self
            .gateway
            .try_import(text)
            .map_err(|cause| InvalidBackup { cause })?;
        self.document = document;
        self.persist();
        Ok(report)
    }

    pub fn export(&self, date: NaiveDate) -> Export {
        Export {
            file_name: export_file_name(date),
            contents: self.gateway.export_text(&self.document),
        }
    }

    pub fn export_today(&self) -> Export {
        self.export(chrono::Local::now().date_naive())
    }

    fn persist(&self) {
        self.gateway.save(&self.document);
    }
}
