//! Structural validation of decoded binder JSON.
//!
//! Answers one question: is this value safe to hand to the migrator? Elements
//! inside the collections are not inspected here; the migrator copes with
//! whatever they contain.

use binder_schema::schema::key;
use binder_schema::EntityKind;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("binder data must be a JSON object")]
    NotAnObject,

    #[error("`{0}` must be present and be a list")]
    MissingOrInvalidCollection(&'static str),

    #[error("`notes` must be a list of notes or a legacy text string")]
    InvalidNotesShape,
}

/// The `notes` collection as found in the input.
#[derive(Debug, Clone, PartialEq)]
pub enum NotesInput {
    /// Canonical: a list of `{id, content}` objects.
    List(Vec<Value>),
    /// Legacy: all notes as one free-text string.
    Legacy(String),
}

/// Binder data that passed [`validate`]: structurally a document, possibly in
/// a legacy shape.
///
/// Only `validate` can build one, which is what lets `migrate` be total.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub(crate) contacts: Vec<Value>,
    pub(crate) medications: Vec<Value>,
    pub(crate) pets: Vec<Value>,
    pub(crate) insurance_policies: Vec<Value>,
    pub(crate) notes: NotesInput,
    pub(crate) background_image: Option<String>,
    pub(crate) background_image_dropped: bool,
}

impl ValidatedInput {
    pub fn notes(&self) -> &NotesInput {
        &self.notes
    }

    pub fn background_image(&self) -> Option<&str> {
        self.background_image.as_deref()
    }

    /// Number of elements in the collection holding `kind`.
    pub fn len_of(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Contact => self.contacts.len(),
            EntityKind::Medication => self.medications.len(),
            EntityKind::Pet => self.pets.len(),
            EntityKind::InsurancePolicy => self.insurance_policies.len(),
            EntityKind::Note => match &self.notes {
                NotesInput::List(items) => items.len(),
                NotesInput::Legacy(_) => 1,
            },
        }
    }
}

/// Checks that `raw` is structurally a binder document.
///
/// Checks run in order: the root must be an object; `contacts`,
/// `medications`, `pets` and `insurancePolicies` must be lists; `notes` must
/// be a list or a string. A `backgroundImage` of the wrong type is dropped
/// rather than rejected. Unknown keys are ignored.
pub fn validate(raw: Value) -> Result<ValidatedInput, ShapeError> {
    let Value::Object(mut root) = raw else {
        return Err(ShapeError::NotAnObject);
    };

    let contacts = take_list(&mut root, EntityKind::Contact)?;
    let medications = take_list(&mut root, EntityKind::Medication)?;
    let pets = take_list(&mut root, EntityKind::Pet)?;
    let insurance_policies = take_list(&mut root, EntityKind::InsurancePolicy)?;

    let notes = match root.remove(key::NOTES) {
        Some(Value::Array(items)) => NotesInput::List(items),
        Some(Value::String(text)) => NotesInput::Legacy(text),
        // Older exports may predate the key entirely.
        None => NotesInput::List(Vec::new()),
        Some(_) => return Err(ShapeError::InvalidNotesShape),
    };

    let (background_image, background_image_dropped) = match root.remove(key::BACKGROUND_IMAGE) {
        Some(Value::String(image)) => (Some(image), false),
        Some(other) => {
            tracing::debug!(
                found = json_type_name(&other),
                "ignoring backgroundImage that is not a string"
            );
            (None, true)
        }
        None => (None, false),
    };

    Ok(ValidatedInput {
        contacts,
        medications,
        pets,
        insurance_policies,
        notes,
        background_image,
        background_image_dropped,
    })
}

fn take_list(root: &mut Map<String, Value>, kind: EntityKind) -> Result<Vec<Value>, ShapeError> {
    let key = kind.collection_key();
    match root.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(ShapeError::MissingOrInvalidCollection(key)),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
