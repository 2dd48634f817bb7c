//! End-to-end tests for binder persistence

use super::*;
use binder_schema::{
    BinderDocument, ContactDraft, EntityKind, InsurancePolicyDraft, MedicationDraft, NoteDraft,
    PetDraft,
};
use proptest::prelude::*;
use tempfile::tempdir;

/// Helper to create a file-backed binder in a fresh directory
fn test_binder() -> (Binder<FileStore>, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let binder = open_binder(dir.path());
    (binder, dir)
}

fn sample_document() -> BinderDocument {
    let mut doc = BinderDocument::new();
    doc.add(ContactDraft {
        name: "Jane Doe".to_string(),
        relationship: "Sister".to_string(),
        phone: "(555) 111-2222".to_string(),
        notes: "Has a spare key".to_string(),
    })
    .unwrap();
    doc.add(MedicationDraft {
        person: "Dad".to_string(),
        medication: "Metformin".to_string(),
        dosage: "500mg twice daily".to_string(),
        notes: String::new(),
    })
    .unwrap();
    doc.add(PetDraft {
        name: "Rex".to_string(),
        kind: "Dog".to_string(),
        vet_name: "Dr. Smith".to_string(),
        vet_phone: "(555) 123-4567".to_string(),
        notes: String::new(),
    })
    .unwrap();
    doc.add(InsurancePolicyDraft {
        kind: "Health".to_string(),
        provider: "Acme Mutual".to_string(),
        policy_number: "HX-42".to_string(),
        phone: String::new(),
    })
    .unwrap();
    doc.add(NoteDraft {
        content: "Water shutoff is in the garage".to_string(),
    })
    .unwrap();
    doc
}

// ============================================================================
// Load
// ============================================================================

#[test]
fn test_load_with_nothing_stored_is_none() {
    let gateway = PersistenceGateway::new(MemoryStore::new());
    assert_eq!(gateway.load(), None);
    assert!(gateway.try_load().unwrap().is_none());
}

#[test]
fn test_load_over_garbage_degrades_to_none() {
    let store = MemoryStore::new();
    store.set(DOCUMENT_KEY, "{not json").unwrap();
    let gateway = PersistenceGateway::new(&store);

    assert_eq!(gateway.load(), None);
    assert!(matches!(gateway.try_load(), Err(GatewayError::Decode(_))));
}

#[test]
fn test_load_distinguishes_wrong_shape_from_bad_json() {
    let store = MemoryStore::new();
    store
        .set(DOCUMENT_KEY, r#"{"contacts":{},"medications":[]}"#)
        .unwrap();
    let gateway = PersistenceGateway::new(&store);

    assert_eq!(gateway.load(), None);
    assert!(matches!(gateway.try_load(), Err(GatewayError::Shape(_))));
}

#[test]
fn test_legacy_stored_blob_is_upgraded_on_load() {
    let store = MemoryStore::new();
    store
        .set(
            DOCUMENT_KEY,
            r#"{
                "contacts": [],
                "medications": [],
                "pets": [{"id": "p1", "name": "Rex", "type": "Dog",
                          "vetContact": "Dr. Smith - (555) 123-4567", "notes": ""}],
                "insurancePolicies": [],
                "notes": "Spare key under the mat"
            }"#,
        )
        .unwrap();

    let (doc, report) = PersistenceGateway::new(&store).try_load().unwrap().unwrap();
    assert_eq!(report.pets_split, 1);
    assert!(report.legacy_notes);

    let pet = &doc.pets[0];
    assert_eq!(pet.id.as_str(), "p1");
    assert_eq!(pet.vet_name, "Dr. Smith");
    assert_eq!(pet.vet_phone, "(555) 123-4567");
    assert_eq!(doc.notes.len(), 1);
    assert_eq!(doc.notes[0].content, "Spare key under the mat");
}

// ============================================================================
// Save
// ============================================================================

#[test]
fn test_save_then_load_round_trip() {
    let store = MemoryStore::new();
    let gateway = PersistenceGateway::new(&store);
    let doc = sample_document();

    gateway.save(&doc);
    assert_eq!(gateway.load(), Some(doc));
}

#[test]
fn test_quota_failure_on_save_is_silent_and_keeps_memory_state() {
    let store = MemoryStore::with_quota(64);
    let mut binder = Binder::open(PersistenceGateway::new(&store));

    binder
        .add(NoteDraft {
            content: "x".repeat(200),
        })
        .unwrap();

    assert_eq!(binder.document().notes.len(), 1);
    assert!(store.get(DOCUMENT_KEY).unwrap().is_none());
    assert!(matches!(
        binder.gateway().try_save(binder.document()),
        Err(GatewayError::Storage(StorageError::QuotaExceeded { .. }))
    ));
}

#[test]
fn test_rejected_contact_never_reaches_the_store() {
    let (mut binder, dir) = test_binder();
    assert!(binder.add(ContactDraft::default()).is_err());
    assert!(!dir.path().join(DOCUMENT_KEY).exists());
}

// ============================================================================
// File-backed binder
// ============================================================================

#[test]
fn test_file_binder_survives_reopen() {
    let (mut binder, dir) = test_binder();
    let id = binder
        .add(ContactDraft {
            name: "Alice".to_string(),
            ..Default::default()
        })
        .unwrap();
    binder.set_background_image(Some("https://example.com/bg.jpg".to_string()));
    drop(binder);

    let reopened = open_binder(dir.path());
    assert_eq!(reopened.document().contacts[0].id, id);
    assert_eq!(
        reopened.document().background_image.as_deref(),
        Some("https://example.com/bg.jpg")
    );

    let stored = std::fs::read_to_string(dir.path().join(DOCUMENT_KEY)).unwrap();
    assert!(stored.contains("\"backgroundImage\""));
}

#[test]
fn test_file_binder_edit_and_remove() {
    let (mut binder, dir) = test_binder();
    let id = binder
        .add(PetDraft {
            name: "Rex".to_string(),
            ..Default::default()
        })
        .unwrap();
    binder
        .update(
            &id,
            PetDraft {
                name: "Rex II".to_string(),
                kind: "Dog".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(open_binder(dir.path()).document().pets[0].name, "Rex II");

    binder.remove(EntityKind::Pet, &id).unwrap();
    assert!(open_binder(dir.path()).document().pets.is_empty());
}

#[test]
fn test_theme_preference_is_stored_beside_document() {
    let dir = tempdir().unwrap();
    let gateway = PersistenceGateway::new(FileStore::new(dir.path()));
    assert_eq!(gateway.load_theme(), None);

    gateway.save_theme(Theme::Dark);
    assert_eq!(gateway.load_theme(), Some(Theme::Dark));
    assert_eq!(
        std::fs::read_to_string(dir.path().join(THEME_KEY)).unwrap(),
        "dark"
    );

    gateway.store().set(THEME_KEY, "sepia").unwrap();
    assert_eq!(gateway.load_theme(), None);
}

// ============================================================================
// Export / import
// ============================================================================

#[test]
fn test_import_rejects_non_binder_files() {
    let gateway = PersistenceGateway::new(MemoryStore::new());
    assert_eq!(gateway.import_text(""), None);
    assert_eq!(gateway.import_text("\"just a string\""), None);
    assert_eq!(gateway.import_text(r#"{"contacts":[]}"#), None);
}

#[test]
fn test_export_is_pretty_and_canonical() {
    let gateway = PersistenceGateway::new(MemoryStore::new());
    let text = gateway.export_text(&sample_document());
    assert!(text.contains('\n'));
    assert!(text.contains("\"vetName\": \"Dr. Smith\""));
    assert!(!text.contains("vetContact"));
    assert!(!text.contains("backgroundImage"));
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .()\\-]{0,16}"
}

fn arb_document() -> impl Strategy<Value = BinderDocument> {
    (
        prop::collection::vec(("[A-Za-z]{1,8}", arb_text()), 0..4),
        prop::collection::vec(arb_text(), 0..4),
        prop::option::of("[a-z]{1,10}"),
    )
        .prop_map(|(contacts, notes, background)| {
            let mut doc = BinderDocument::new();
            for (name, phone) in contacts {
                doc.add(ContactDraft {
                    name,
                    phone,
                    ..Default::default()
                })
                .unwrap();
            }
            for content in notes {
                doc.add(NoteDraft { content }).unwrap();
            }
            doc.set_background_image(background);
            doc
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_export_then_import_is_identity(doc in arb_document()) {
        let gateway = PersistenceGateway::new(MemoryStore::new());
        let text = gateway.export_text(&doc);
        prop_assert_eq!(gateway.import_text(&text), Some(doc));
    }
}
