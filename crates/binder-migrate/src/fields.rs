//! Lenient field access over untrusted JSON objects.

use binder_schema::schema::key;
use binder_schema::{EntityId, FieldSource};
use serde_json::{Map, Value};

/// Reads record fields out of a JSON object, coercing instead of failing.
///
/// Strings are taken as-is, numbers and booleans as their JSON rendering;
/// anything else (null, arrays, objects) and missing keys read as `""`.
pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The element's `id`, if it has a non-empty one.
    pub fn id(&self) -> Option<EntityId> {
        self.fields
            .get(key::ID)
            .and_then(coerce_text)
            .filter(|id| !id.is_empty())
            .map(EntityId::from)
    }

    pub fn is_set(&self, name: &str) -> bool {
        !self.text(name).is_empty()
    }
}

impl FieldSource for FieldReader<'_> {
    fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .and_then(coerce_text)
            .unwrap_or_default()
    }
}

pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
