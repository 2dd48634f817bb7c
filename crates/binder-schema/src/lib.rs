//! Emergency binder record schema
//!
//! Canonical shapes for everything the binder stores:
//!
//! ```text
//! BinderDocument
//! ├── contacts:          [Contact]          (name required)
//! ├── medications:       [Medication]       (person + medication required)
//! ├── pets:              [Pet]              (name required)
//! ├── insurancePolicies: [InsurancePolicy]  (type + provider required)
//! ├── notes:             [Note]
//! └── backgroundImage:   string | absent
//! ```
//!
//! The field tables in [`schema`] are the ground truth for "canonical shape";
//! the validator and migrator in `binder-migrate` read collection keys and
//! field names from here rather than spelling them out again.
//!
//! Records only derive `Serialize`. Anything coming *in* (storage, imported
//! files) has to go through validation and migration first, which is the only
//! way to build a document from untrusted JSON.

pub mod document;
pub mod error;
pub mod id;
pub mod phone;
pub mod record;
pub mod schema;

pub use document::{BinderDocument, Query, SearchHits};
pub use error::EntryError;
pub use id::EntityId;
pub use phone::format_phone_number;
pub use record::{
    Contact, ContactDraft, Draft, FieldSource, InsurancePolicy, InsurancePolicyDraft, Medication,
    MedicationDraft, Note, NoteDraft, Pet, PetDraft, Record,
};
pub use schema::{EntityKind, FieldSpec};
