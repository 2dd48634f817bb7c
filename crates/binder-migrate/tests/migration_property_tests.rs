use binder_migrate::{migrate_with_report, split_vet_contact, validate, VetContact};
use binder_schema::{
    BinderDocument, Contact, EntityId, InsurancePolicy, Medication, Note, Pet,
};
use proptest::prelude::*;
use serde_json::json;

fn text() -> impl Strategy<Value = String> {
    "\\PC{0,16}"
}

fn id(prefix: &str, index: usize) -> EntityId {
    EntityId::new(format!("{prefix}-{index}"))
}

fn contacts() -> impl Strategy<Value = Vec<Contact>> {
    proptest::collection::vec((text(), text(), text(), text()), 0..4).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, relationship, phone, notes))| Contact {
                id: id("contact", i),
                name,
                relationship,
                phone,
                notes,
            })
            .collect()
    })
}

fn medications() -> impl Strategy<Value = Vec<Medication>> {
    proptest::collection::vec((text(), text(), text(), text()), 0..4).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (person, medication, dosage, notes))| Medication {
                id: id("med", i),
                person,
                medication,
                dosage,
                notes,
            })
            .collect()
    })
}

fn pets() -> impl Strategy<Value = Vec<Pet>> {
    proptest::collection::vec((text(), text(), text(), text(), text()), 0..4).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, kind, vet_name, vet_phone, notes))| Pet {
                id: id("pet", i),
                name,
                kind,
                vet_name,
                vet_phone,
                notes,
            })
            .collect()
    })
}

fn policies() -> impl Strategy<Value = Vec<InsurancePolicy>> {
    proptest::collection::vec((text(), text(), text(), text()), 0..4).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (kind, provider, policy_number, phone))| InsurancePolicy {
                id: id("policy", i),
                kind,
                provider,
                policy_number,
                phone,
            })
            .collect()
    })
}

fn notes() -> impl Strategy<Value = Vec<Note>> {
    proptest::collection::vec(text(), 0..4).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, content)| Note {
                id: id("note", i),
                content,
            })
            .collect()
    })
}

fn canonical_document() -> impl Strategy<Value = BinderDocument> {
    (
        contacts(),
        medications(),
        pets(),
        policies(),
        notes(),
        proptest::option::of(text()),
    )
        .prop_map(
            |(contacts, medications, pets, insurance_policies, notes, background_image)| {
                BinderDocument {
                    contacts,
                    medications,
                    pets,
                    insurance_policies,
                    notes,
                    background_image,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn migrating_canonical_data_is_identity(doc in canonical_document()) {
        let raw = serde_json::to_value(&doc).expect("serialize");
        let validated = validate(raw).expect("canonical data validates");
        let (migrated, report) = migrate_with_report(validated);
        prop_assert!(report.is_noop());
        prop_assert_eq!(migrated, doc);
    }

    #[test]
    fn legacy_note_text_survives_verbatim(text in "\\PC{0,40}") {
        let raw = json!({
            "contacts": [], "medications": [], "pets": [], "insurancePolicies": [],
            "notes": text.clone()
        });
        let (doc, report) = migrate_with_report(validate(raw).expect("valid"));
        prop_assert!(report.legacy_notes);
        if text.trim().is_empty() {
            prop_assert!(doc.notes.is_empty());
        } else {
            prop_assert_eq!(doc.notes.len(), 1);
            prop_assert_eq!(&doc.notes[0].content, &text);
        }
    }

    #[test]
    fn legacy_pets_split_exactly_like_the_splitter(contact in "\\PC{1,40}") {
        let raw = json!({
            "contacts": [], "medications": [], "insurancePolicies": [], "notes": [],
            "pets": [{"id": "p", "name": "Rex", "vetContact": contact.clone()}]
        });
        let (doc, _) = migrate_with_report(validate(raw).expect("valid"));
        let VetContact { name, phone } = split_vet_contact(&contact);
        prop_assert_eq!(&doc.pets[0].vet_name, &name);
        prop_assert_eq!(&doc.pets[0].vet_phone, &phone);
    }

    #[test]
    fn migrating_twice_changes_nothing(contact in "\\PC{1,40}", note in "\\PC{0,20}") {
        let raw = json!({
            "contacts": [], "medications": [], "insurancePolicies": [],
            "notes": note,
            "pets": [{"id": "p", "name": "Rex", "vetContact": contact}]
        });
        let once = binder_migrate::migrate(validate(raw).expect("valid"));
        let again = serde_json::to_value(&once).expect("serialize");
        let (twice, report) = migrate_with_report(validate(again).expect("valid"));
        prop_assert!(report.is_noop());
        prop_assert_eq!(twice, once);
    }
}
