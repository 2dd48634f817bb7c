//! Field tables for every entity kind and the document root.
//!
//! Keys are the camelCase names used in stored and exported JSON.

use std::fmt;

/// JSON keys used by the document and its records.
pub mod key {
    // Document root
    pub const CONTACTS: &str = "contacts";
    pub const MEDICATIONS: &str = "medications";
    pub const PETS: &str = "pets";
    pub const INSURANCE_POLICIES: &str = "insurancePolicies";
    pub const NOTES: &str = "notes";
    pub const BACKGROUND_IMAGE: &str = "backgroundImage";

    // Records
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const RELATIONSHIP: &str = "relationship";
    pub const PHONE: &str = "phone";
    pub const PERSON: &str = "person";
    pub const MEDICATION: &str = "medication";
    pub const DOSAGE: &str = "dosage";
    pub const TYPE: &str = "type";
    pub const VET_NAME: &str = "vetName";
    pub const VET_PHONE: &str = "vetPhone";
    pub const PROVIDER: &str = "provider";
    pub const POLICY_NUMBER: &str = "policyNumber";
    pub const CONTENT: &str = "content";

    /// Legacy single-string vet contact, replaced by `vetName` + `vetPhone`.
    pub const VET_CONTACT: &str = "vetContact";

    /// The per-record free-text field. Shares its spelling with the root
    /// `notes` collection.
    pub const RECORD_NOTES: &str = "notes";
}

/// A recognized (non-id) field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

const CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(key::NAME),
    FieldSpec::optional(key::RELATIONSHIP),
    FieldSpec::optional(key::PHONE),
    FieldSpec::optional(key::RECORD_NOTES),
];

const MEDICATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(key::PERSON),
    FieldSpec::required(key::MEDICATION),
    FieldSpec::optional(key::DOSAGE),
    FieldSpec::optional(key::RECORD_NOTES),
];

const PET_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(key::NAME),
    FieldSpec::optional(key::TYPE),
    FieldSpec::optional(key::VET_NAME),
    FieldSpec::optional(key::VET_PHONE),
    FieldSpec::optional(key::RECORD_NOTES),
];

const INSURANCE_POLICY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(key::TYPE),
    FieldSpec::required(key::PROVIDER),
    FieldSpec::optional(key::POLICY_NUMBER),
    FieldSpec::optional(key::PHONE),
];

const NOTE_FIELDS: &[FieldSpec] = &[FieldSpec::optional(key::CONTENT)];

/// The five kinds of record a binder holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Contact,
    Medication,
    Pet,
    InsurancePolicy,
    Note,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Contact,
        EntityKind::Medication,
        EntityKind::Pet,
        EntityKind::InsurancePolicy,
        EntityKind::Note,
    ];

    /// Collections that must be present as arrays in every stored shape.
    /// `notes` is absent here because its legacy form is a string.
    pub const LIST_COLLECTIONS: [EntityKind; 4] = [
        EntityKind::Contact,
        EntityKind::Medication,
        EntityKind::Pet,
        EntityKind::InsurancePolicy,
    ];

    /// Key of the document collection holding this kind.
    pub fn collection_key(self) -> &'static str {
        match self {
            EntityKind::Contact => key::CONTACTS,
            EntityKind::Medication => key::MEDICATIONS,
            EntityKind::Pet => key::PETS,
            EntityKind::InsurancePolicy => key::INSURANCE_POLICIES,
            EntityKind::Note => key::NOTES,
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Contact => CONTACT_FIELDS,
            EntityKind::Medication => MEDICATION_FIELDS,
            EntityKind::Pet => PET_FIELDS,
            EntityKind::InsurancePolicy => INSURANCE_POLICY_FIELDS,
            EntityKind::Note => NOTE_FIELDS,
        }
    }

    pub fn required_fields(self) -> impl Iterator<Item = &'static str> {
        self.fields()
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name)
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Contact => "contact",
            EntityKind::Medication => "medication",
            EntityKind::Pet => "pet",
            EntityKind::InsurancePolicy => "insurance policy",
            EntityKind::Note => "note",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
