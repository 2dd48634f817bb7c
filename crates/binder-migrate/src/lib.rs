//! Validation and migration of binder data
//!
//! Every inbound path (local storage, imported backup files) runs the same
//! two stages:
//!
//! ```text
//!   serde_json::Value ──► validate ──► ValidatedInput ──► migrate ──► BinderDocument
//!        (untrusted)         │          (structurally        (total)      (canonical)
//!                            ▼           plausible)
//!                       ShapeError
//! ```
//!
//! All rejection happens in [`validate`]. [`migrate`] cannot fail: gaps are
//! filled with defaults and the two known legacy shapes are upgraded:
//!
//! - `notes` stored as one free-text string becomes a list of notes;
//! - a pet's single `vetContact` string is split into `vetName` + `vetPhone`.
//!
//! There is no version header in stored data, so the schema generation is
//! inferred from structure; [`MigrationReport::shape`] reports what was found.

pub mod fields;
pub mod migrate;
pub mod validate;
pub mod vet_contact;

pub use migrate::{migrate, migrate_with_report, upgrade_legacy_notes, MigrationReport, SchemaShape};
pub use validate::{validate, NotesInput, ShapeError, ValidatedInput};
pub use vet_contact::{split_vet_contact, VetContact};

use binder_schema::BinderDocument;
use serde_json::Value;

/// Validates and migrates a decoded JSON value in one step.
pub fn normalize(raw: Value) -> Result<(BinderDocument, MigrationReport), ShapeError> {
    let validated = validate(raw)?;
    Ok(migrate_with_report(validated))
}
