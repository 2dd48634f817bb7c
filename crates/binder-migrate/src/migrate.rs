//! Total migration from validated (possibly legacy) input to a canonical
//! [`BinderDocument`].

use crate::fields::FieldReader;
use crate::validate::{json_type_name, NotesInput, ValidatedInput};
use crate::vet_contact::{split_vet_contact, VetContact};
use binder_schema::schema::key;
use binder_schema::{
    BinderDocument, Contact, EntityId, InsurancePolicy, Medication, Note, Pet, Record,
};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Which schema generation the input looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaShape {
    Canonical,
    Legacy {
        /// `notes` was a single string.
        string_notes: bool,
        /// Pets that still carried a `vetContact` field.
        vet_contact_pets: usize,
    },
}

/// What a migration run had to change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// `notes` arrived as a legacy string.
    pub legacy_notes: bool,
    /// Pets whose `vetContact` was split into `vetName` / `vetPhone`.
    pub pets_split: usize,
    /// Pets whose stray `vetContact` was dropped without splitting because
    /// they already had structured vet fields.
    pub stray_vet_contacts: usize,
    /// Elements given a fresh id (missing, empty, or duplicate id).
    pub ids_assigned: usize,
    /// Elements skipped because they were not JSON objects.
    pub elements_skipped: usize,
    /// `backgroundImage` was present with a non-string value.
    pub background_image_dropped: bool,
}

impl MigrationReport {
    pub fn shape(&self) -> SchemaShape {
        let vet_contact_pets = self.pets_split + self.stray_vet_contacts;
        if self.legacy_notes || vet_contact_pets > 0 {
            SchemaShape::Legacy {
                string_notes: self.legacy_notes,
                vet_contact_pets,
            }
        } else {
            SchemaShape::Canonical
        }
    }

    /// True if anything beyond a legacy-shape upgrade had to be repaired.
    pub fn repaired(&self) -> bool {
        self.ids_assigned > 0 || self.elements_skipped > 0 || self.background_image_dropped
    }

    /// True if the input was already canonical and nothing was changed.
    pub fn is_noop(&self) -> bool {
        self.shape() == SchemaShape::Canonical && !self.repaired()
    }
}

pub fn migrate(validated: ValidatedInput) -> BinderDocument {
    migrate_with_report(validated).0
}

pub fn migrate_with_report(validated: ValidatedInput) -> (BinderDocument, MigrationReport) {
    let ValidatedInput {
        contacts,
        medications,
        pets,
        insurance_policies,
        notes,
        background_image,
        background_image_dropped,
    } = validated;

    let mut report = MigrationReport {
        background_image_dropped,
        ..Default::default()
    };

    let pets: Vec<Value> = pets
        .into_iter()
        .map(|item| match item {
            Value::Object(mut fields) => {
                match upgrade_pet(&mut fields) {
                    PetUpgrade::Unchanged => {}
                    PetUpgrade::Split => report.pets_split += 1,
                    PetUpgrade::StrayDropped => report.stray_vet_contacts += 1,
                }
                Value::Object(fields)
            }
            other => other,
        })
        .collect();

    let notes = match notes {
        NotesInput::List(items) => migrate_records::<Note>(items, &mut report),
        NotesInput::Legacy(text) => {
            report.legacy_notes = true;
            upgrade_legacy_notes(text)
        }
    };

    let doc = BinderDocument {
        contacts: migrate_records::<Contact>(contacts, &mut report),
        medications: migrate_records::<Medication>(medications, &mut report),
        pets: migrate_records::<Pet>(pets, &mut report),
        insurance_policies: migrate_records::<InsurancePolicy>(insurance_policies, &mut report),
        notes,
        background_image,
    };

    if let SchemaShape::Legacy {
        string_notes,
        vet_contact_pets,
    } = report.shape()
    {
        tracing::info!(
            string_notes,
            vet_contact_pets,
            "upgraded legacy binder data to the current shape"
        );
    }
    if report.repaired() {
        tracing::warn!(
            ids_assigned = report.ids_assigned,
            elements_skipped = report.elements_skipped,
            background_image_dropped = report.background_image_dropped,
            "repaired malformed binder entries"
        );
    }

    (doc, report)
}

/// Upgrades notes stored as one free-text string.
///
/// Blank text becomes no notes; anything else becomes a single note holding
/// the original text unchanged.
pub fn upgrade_legacy_notes(text: String) -> Vec<Note> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    vec![Note {
        id: EntityId::generate(),
        content: text,
    }]
}

enum PetUpgrade {
    Unchanged,
    Split,
    StrayDropped,
}

/// Replaces a legacy `vetContact` with `vetName` / `vetPhone`.
///
/// Pets that already have either structured field keep them; their
/// `vetContact` is dropped without being split again.
fn upgrade_pet(fields: &mut Map<String, Value>) -> PetUpgrade {
    let Some(legacy) = fields.remove(key::VET_CONTACT) else {
        return PetUpgrade::Unchanged;
    };

    let reader = FieldReader::new(fields);
    if reader.is_set(key::VET_NAME) || reader.is_set(key::VET_PHONE) {
        return PetUpgrade::StrayDropped;
    }

    match legacy {
        Value::String(contact) if !contact.is_empty() => {
            let VetContact { name, phone } = split_vet_contact(&contact);
            fields.insert(key::VET_NAME.to_string(), Value::String(name));
            fields.insert(key::VET_PHONE.to_string(), Value::String(phone));
            PetUpgrade::Split
        }
        _ => PetUpgrade::StrayDropped,
    }
}

/// Builds canonical records from collection elements.
///
/// Ids are kept when present and unique within the collection; otherwise the
/// element gets a fresh one. Non-object elements have nothing to recover and
/// are skipped.
fn migrate_records<R: Record>(items: Vec<Value>, report: &mut MigrationReport) -> Vec<R> {
    let collection = R::KIND.collection_key();
    let mut seen: HashSet<EntityId> = HashSet::with_capacity(items.len());
    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let fields = match item {
            Value::Object(fields) => fields,
            other => {
                tracing::warn!(
                    collection,
                    index,
                    found = json_type_name(&other),
                    "skipping binder entry that is not an object"
                );
                report.elements_skipped += 1;
                continue;
            }
        };

        let reader = FieldReader::new(&fields);
        let id = match reader.id() {
            Some(id) if !seen.contains(&id) => id,
            original => {
                let fresh = fresh_id(&seen);
                tracing::debug!(
                    collection,
                    index,
                    original = ?original.as_ref().map(EntityId::as_str),
                    assigned = %fresh,
                    "assigned fresh id to binder entry"
                );
                report.ids_assigned += 1;
                fresh
            }
        };
        seen.insert(id.clone());
        records.push(R::from_fields(id, &reader));
    }

    records
}

fn fresh_id(seen: &HashSet<EntityId>) -> EntityId {
    loop {
        let id = EntityId::generate();
        if !seen.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;
    use serde_json::json;

    fn base() -> Value {
        json!({
            "contacts": [],
            "medications": [],
            "pets": [],
            "insurancePolicies": [],
            "notes": []
        })
    }

    fn run(raw: Value) -> (BinderDocument, MigrationReport) {
        migrate_with_report(validate(raw).expect("valid"))
    }

    #[test]
    fn legacy_string_notes_become_one_note() {
        let mut raw = base();
        raw["notes"] = json!("hello");
        let (doc, report) = run(raw);
        assert_eq!(doc.notes.len(), 1);
        assert_eq!(doc.notes[0].content, "hello");
        assert!(!doc.notes[0].id.is_empty());
        assert!(report.legacy_notes);
    }

    #[test]
    fn legacy_notes_keep_original_untrimmed_text() {
        let mut raw = base();
        raw["notes"] = json!("  spare key: blue pot\n");
        let (doc, _) = run(raw);
        assert_eq!(doc.notes[0].content, "  spare key: blue pot\n");
    }

    #[test]
    fn whitespace_legacy_notes_become_empty_list() {
        let mut raw = base();
        raw["notes"] = json!("   ");
        let (doc, report) = run(raw);
        assert!(doc.notes.is_empty());
        assert_eq!(
            report.shape(),
            SchemaShape::Legacy {
                string_notes: true,
                vet_contact_pets: 0
            }
        );
    }

    #[test]
    fn empty_notes_list_passes_through() {
        let (doc, report) = run(base());
        assert!(doc.notes.is_empty());
        assert!(report.is_noop());
    }

    #[test]
    fn vet_contact_is_split_and_dropped() {
        let mut raw = base();
        raw["pets"] = json!([
            {"id": "1", "name": "Rex", "type": "Dog", "vetContact": "Dr. Smith - (555) 123-4567", "notes": ""},
            {"id": "2", "name": "Tom", "type": "Cat", "vetContact": "Dr. Jones"}
        ]);
        let (doc, report) = run(raw);

        assert_eq!(doc.pets[0].vet_name, "Dr. Smith");
        assert_eq!(doc.pets[0].vet_phone, "(555) 123-4567");
        assert_eq!(doc.pets[1].vet_name, "Dr. Jones");
        assert_eq!(doc.pets[1].vet_phone, "");
        assert_eq!(report.pets_split, 2);

        let serialized = serde_json::to_value(&doc).unwrap();
        assert!(serialized["pets"][0].get("vetContact").is_none());
    }

    #[test]
    fn structured_vet_fields_win_over_stray_vet_contact() {
        let mut raw = base();
        raw["pets"] = json!([
            {"id": "1", "name": "Rex", "vetName": "Dr. Who", "vetContact": "Dr. Smith 555-123-4567"},
            {"id": "2", "name": "Tom", "vetPhone": "555-000-1111", "vetContact": "Dr. Jones"}
        ]);
        let (doc, report) = run(raw);

        assert_eq!(doc.pets[0].vet_name, "Dr. Who");
        assert_eq!(doc.pets[0].vet_phone, "");
        assert_eq!(doc.pets[1].vet_name, "");
        assert_eq!(doc.pets[1].vet_phone, "555-000-1111");
        assert_eq!(report.pets_split, 0);
        assert_eq!(report.stray_vet_contacts, 2);
    }

    #[test]
    fn empty_or_non_string_vet_contact_is_dropped_without_split() {
        let mut raw = base();
        raw["pets"] = json!([
            {"id": "1", "name": "Rex", "vetContact": ""},
            {"id": "2", "name": "Tom", "vetContact": 42}
        ]);
        let (doc, report) = run(raw);
        assert!(doc.pets.iter().all(|p| p.vet_name.is_empty() && p.vet_phone.is_empty()));
        assert_eq!(report.pets_split, 0);
    }

    #[test]
    fn missing_fields_default_to_empty_strings() {
        let mut raw = base();
        raw["contacts"] = json!([{"id": "c1", "name": "Ann"}]);
        raw["insurancePolicies"] = json!([{"id": "i1"}]);
        let (doc, _) = run(raw);
        let contact = &doc.contacts[0];
        assert_eq!(contact.name, "Ann");
        assert_eq!(contact.relationship, "");
        assert_eq!(contact.phone, "");
        assert_eq!(contact.notes, "");
        assert_eq!(doc.insurance_policies[0].provider, "");
    }

    #[test]
    fn unknown_element_keys_are_dropped() {
        let mut raw = base();
        raw["medications"] = json!([{"id": "m1", "person": "Dad", "medication": "X", "color": "red"}]);
        let (doc, _) = run(raw);
        let value = serde_json::to_value(&doc.medications[0]).unwrap();
        assert!(value.get("color").is_none());
        assert_eq!(value["dosage"], "");
    }

    #[test]
    fn missing_and_duplicate_ids_get_fresh_ones() {
        let mut raw = base();
        raw["contacts"] = json!([
            {"id": "same", "name": "A"},
            {"id": "same", "name": "B"},
            {"name": "C"},
            {"id": "", "name": "D"}
        ]);
        let (doc, report) = run(raw);
        assert_eq!(doc.contacts[0].id, EntityId::new("same"));
        let ids: HashSet<_> = doc.contacts.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(report.ids_assigned, 3);
        assert!(report.repaired());
    }

    #[test]
    fn non_object_elements_are_skipped() {
        let mut raw = base();
        raw["pets"] = json!([null, "Rex", {"id": "p1", "name": "Tom"}]);
        let (doc, report) = run(raw);
        assert_eq!(doc.pets.len(), 1);
        assert_eq!(doc.pets[0].name, "Tom");
        assert_eq!(report.elements_skipped, 2);
    }

    #[test]
    fn background_image_passes_through() {
        let mut raw = base();
        raw["backgroundImage"] = json!("https://example.com/bg.jpg");
        let (doc, report) = run(raw);
        assert_eq!(
            doc.background_image.as_deref(),
            Some("https://example.com/bg.jpg")
        );
        assert!(report.is_noop());

        let mut raw = base();
        raw["backgroundImage"] = json!(12);
        let (doc, report) = run(raw);
        assert_eq!(doc.background_image, None);
        assert!(report.background_image_dropped);
    }

    #[test]
    fn fully_legacy_document_upgrades_in_one_pass() {
        let raw = json!({
            "contacts": [{"id": "1700000000000", "name": "Mom", "relationship": "Mother", "phone": "555-222-3333", "notes": ""}],
            "medications": [],
            "pets": [{"id": "1700000000001", "name": "Rex", "type": "Dog", "vetContact": "(555) 123-4567 - Dr. Smith", "notes": "Allergic to chicken"}],
            "insurancePolicies": [],
            "notes": "Gas shutoff is behind the water heater."
        });
        let (doc, report) = run(raw);

        assert_eq!(doc.contacts[0].id, EntityId::new("1700000000000"));
        assert_eq!(doc.pets[0].vet_name, "Dr. Smith");
        assert_eq!(doc.pets[0].vet_phone, "(555) 123-4567");
        assert_eq!(doc.notes[0].content, "Gas shutoff is behind the water heater.");
        assert_eq!(
            report.shape(),
            SchemaShape::Legacy {
                string_notes: true,
                vet_contact_pets: 1
            }
        );
        assert!(!report.repaired());
    }
}
