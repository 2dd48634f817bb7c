//! Canonical record types, their drafts, and the traits tying them to the
//! document.
//!
//! A *draft* is the user-editable part of a record (every field but `id`).
//! Creating a record pairs a draft with a fresh id; editing replaces the
//! draft part wholesale and keeps the id.

use crate::document::{BinderDocument, Query};
use crate::schema::key;
use crate::{EntityId, EntityKind, EntryError};
use serde::Serialize;
use std::fmt;

/// Read access to named text fields.
///
/// Implemented by drafts (typed fields) and by the migrator's JSON field
/// reader, so both build records through the same [`Record::from_fields`].
/// Unknown names read as the empty string.
pub trait FieldSource {
    fn text(&self, name: &str) -> String;
}

pub trait Record: Clone + fmt::Debug + PartialEq + Serialize {
    const KIND: EntityKind;

    type Draft: Draft<Record = Self>;

    fn id(&self) -> &EntityId;

    /// Builds a record from the schema fields of [`Self::KIND`].
    fn from_fields(id: EntityId, source: &impl FieldSource) -> Self;

    fn to_draft(&self) -> Self::Draft;

    fn collection(doc: &BinderDocument) -> &[Self];

    fn collection_mut(doc: &mut BinderDocument) -> &mut Vec<Self>;

    fn matches(&self, query: &Query) -> bool;
}

pub trait Draft: FieldSource + Sized {
    type Record: Record<Draft = Self>;

    /// Rejects the draft if any required field of its kind is blank.
    fn check_required(&self) -> Result<(), EntryError> {
        let kind = <Self::Record as Record>::KIND;
        for field in kind.required_fields() {
            if self.text(field).trim().is_empty() {
                return Err(EntryError::MissingRequiredField { kind, field });
            }
        }
        Ok(())
    }

    fn into_record(self, id: EntityId) -> Self::Record {
        <Self::Record as Record>::from_fields(id, &self)
    }
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: EntityId,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub notes: String,
}

impl FieldSource for ContactDraft {
    fn text(&self, name: &str) -> String {
        match name {
            key::NAME => self.name.clone(),
            key::RELATIONSHIP => self.relationship.clone(),
            key::PHONE => self.phone.clone(),
            key::RECORD_NOTES => self.notes.clone(),
            _ => String::new(),
        }
    }
}

impl Draft for ContactDraft {
    type Record = Contact;
}

impl Record for Contact {
    const KIND: EntityKind = EntityKind::Contact;
    type Draft = ContactDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_fields(id: EntityId, source: &impl FieldSource) -> Self {
        Self {
            id,
            name: source.text(key::NAME),
            relationship: source.text(key::RELATIONSHIP),
            phone: source.text(key::PHONE),
            notes: source.text(key::RECORD_NOTES),
        }
    }

    fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            relationship: self.relationship.clone(),
            phone: self.phone.clone(),
            notes: self.notes.clone(),
        }
    }

    fn collection(doc: &BinderDocument) -> &[Self] {
        &doc.contacts
    }

    fn collection_mut(doc: &mut BinderDocument) -> &mut Vec<Self> {
        &mut doc.contacts
    }

    fn matches(&self, query: &Query) -> bool {
        query.matches_text(&self.name)
            || query.matches_text(&self.relationship)
            || query.matches_phone(&self.phone)
            || query.matches_text(&self.notes)
    }
}

// ============================================================================
// Medication
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: EntityId,
    /// Who takes it.
    pub person: String,
    pub medication: String,
    pub dosage: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicationDraft {
    pub person: String,
    pub medication: String,
    pub dosage: String,
    pub notes: String,
}

impl FieldSource for MedicationDraft {
    fn text(&self, name: &str) -> String {
        match name {
            key::PERSON => self.person.clone(),
            key::MEDICATION => self.medication.clone(),
            key::DOSAGE => self.dosage.clone(),
            key::RECORD_NOTES => self.notes.clone(),
            _ => String::new(),
        }
    }
}

impl Draft for MedicationDraft {
    type Record = Medication;
}

impl Record for Medication {
    const KIND: EntityKind = EntityKind::Medication;
    type Draft = MedicationDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_fields(id: EntityId, source: &impl FieldSource) -> Self {
        Self {
            id,
            person: source.text(key::PERSON),
            medication: source.text(key::MEDICATION),
            dosage: source.text(key::DOSAGE),
            notes: source.text(key::RECORD_NOTES),
        }
    }

    fn to_draft(&self) -> MedicationDraft {
        MedicationDraft {
            person: self.person.clone(),
            medication: self.medication.clone(),
            dosage: self.dosage.clone(),
            notes: self.notes.clone(),
        }
    }

    fn collection(doc: &BinderDocument) -> &[Self] {
        &doc.medications
    }

    fn collection_mut(doc: &mut BinderDocument) -> &mut Vec<Self> {
        &mut doc.medications
    }

    fn matches(&self, query: &Query) -> bool {
        query.matches_text(&self.person)
            || query.matches_text(&self.medication)
            || query.matches_text(&self.dosage)
            || query.matches_text(&self.notes)
    }
}

// ============================================================================
// Pet
// ============================================================================

/// A household pet and its veterinarian.
///
/// Older data stored the vet as one free-text `vetContact` string; the
/// migrator splits that into `vet_name` and `vet_phone`. There is no
/// `vetContact` field here on purpose: canonical pets cannot carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub vet_name: String,
    pub vet_phone: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetDraft {
    pub name: String,
    pub kind: String,
    pub vet_name: String,
    pub vet_phone: String,
    pub notes: String,
}

impl FieldSource for PetDraft {
    fn text(&self, name: &str) -> String {
        match name {
            key::NAME => self.name.clone(),
            key::TYPE => self.kind.clone(),
            key::VET_NAME => self.vet_name.clone(),
            key::VET_PHONE => self.vet_phone.clone(),
            key::RECORD_NOTES => self.notes.clone(),
            _ => String::new(),
        }
    }
}

impl Draft for PetDraft {
    type Record = Pet;
}

impl Record for Pet {
    const KIND: EntityKind = EntityKind::Pet;
    type Draft = PetDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_fields(id: EntityId, source: &impl FieldSource) -> Self {
        Self {
            id,
            name: source.text(key::NAME),
            kind: source.text(key::TYPE),
            vet_name: source.text(key::VET_NAME),
            vet_phone: source.text(key::VET_PHONE),
            notes: source.text(key::RECORD_NOTES),
        }
    }

    fn to_draft(&self) -> PetDraft {
        PetDraft {
            name: self.name.clone(),
            kind: self.kind.clone(),
            vet_name: self.vet_name.clone(),
            vet_phone: self.vet_phone.clone(),
            notes: self.notes.clone(),
        }
    }

    fn collection(doc: &BinderDocument) -> &[Self] {
        &doc.pets
    }

    fn collection_mut(doc: &mut BinderDocument) -> &mut Vec<Self> {
        &mut doc.pets
    }

    fn matches(&self, query: &Query) -> bool {
        query.matches_text(&self.name)
            || query.matches_text(&self.kind)
            || query.matches_text(&self.vet_name)
            || query.matches_phone(&self.vet_phone)
            || query.matches_text(&self.notes)
    }
}

// ============================================================================
// Insurance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicy {
    pub id: EntityId,
    /// Coverage type ("Health", "Auto", ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub provider: String,
    pub policy_number: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsurancePolicyDraft {
    pub kind: String,
    pub provider: String,
    pub policy_number: String,
    pub phone: String,
}

impl FieldSource for InsurancePolicyDraft {
    fn text(&self, name: &str) -> String {
        match name {
            key::TYPE => self.kind.clone(),
            key::PROVIDER => self.provider.clone(),
            key::POLICY_NUMBER => self.policy_number.clone(),
            key::PHONE => self.phone.clone(),
            _ => String::new(),
        }
    }
}

impl Draft for InsurancePolicyDraft {
    type Record = InsurancePolicy;
}

impl Record for InsurancePolicy {
    const KIND: EntityKind = EntityKind::InsurancePolicy;
    type Draft = InsurancePolicyDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_fields(id: EntityId, source: &impl FieldSource) -> Self {
        Self {
            id,
            kind: source.text(key::TYPE),
            provider: source.text(key::PROVIDER),
            policy_number: source.text(key::POLICY_NUMBER),
            phone: source.text(key::PHONE),
        }
    }

    fn to_draft(&self) -> InsurancePolicyDraft {
        InsurancePolicyDraft {
            kind: self.kind.clone(),
            provider: self.provider.clone(),
            policy_number: self.policy_number.clone(),
            phone: self.phone.clone(),
        }
    }

    fn collection(doc: &BinderDocument) -> &[Self] {
        &doc.insurance_policies
    }

    fn collection_mut(doc: &mut BinderDocument) -> &mut Vec<Self> {
        &mut doc.insurance_policies
    }

    fn matches(&self, query: &Query) -> bool {
        query.matches_text(&self.kind)
            || query.matches_text(&self.provider)
            || query.matches_text(&self.policy_number)
            || query.matches_phone(&self.phone)
    }
}

// ============================================================================
// Note
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub content: String,
}

impl FieldSource for NoteDraft {
    fn text(&self, name: &str) -> String {
        match name {
            key::CONTENT => self.content.clone(),
            _ => String::new(),
        }
    }
}

impl Draft for NoteDraft {
    type Record = Note;
}

impl Record for Note {
    const KIND: EntityKind = EntityKind::Note;
    type Draft = NoteDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_fields(id: EntityId, source: &impl FieldSource) -> Self {
        Self {
            id,
            content: source.text(key::CONTENT),
        }
    }

    fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            content: self.content.clone(),
        }
    }

    fn collection(doc: &BinderDocument) -> &[Self] {
        &doc.notes
    }

    fn collection_mut(doc: &mut BinderDocument) -> &mut Vec<Self> {
        &mut doc.notes
    }

    fn matches(&self, query: &Query) -> bool {
        query.matches_text(&self.content)
    }
}
