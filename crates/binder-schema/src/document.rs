use crate::record::{Contact, Draft, InsurancePolicy, Medication, Note, Pet, Record};
use crate::{EntityId, EntityKind, EntryError};
use serde::Serialize;

/// The whole binder: the single aggregate that gets stored and exported.
///
/// Every value of this type is in canonical shape. The only ways to obtain one
/// are `Default` (empty binder), the lifecycle methods below, or the
/// validate-then-migrate pipeline over untrusted JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinderDocument {
    pub contacts: Vec<Contact>,
    pub medications: Vec<Medication>,
    pub pets: Vec<Pet>,
    pub insurance_policies: Vec<InsurancePolicy>,
    pub notes: Vec<Note>,
    /// URL or `data:` URI. Absent means no background.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl BinderDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
            && self.medications.is_empty()
            && self.pets.is_empty()
            && self.insurance_policies.is_empty()
            && self.notes.is_empty()
            && self.background_image.is_none()
    }

    pub fn len_of(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Contact => self.contacts.len(),
            EntityKind::Medication => self.medications.len(),
            EntityKind::Pet => self.pets.len(),
            EntityKind::InsurancePolicy => self.insurance_policies.len(),
            EntityKind::Note => self.notes.len(),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Creates a record from `draft` with a fresh id and appends it.
    pub fn add<D: Draft>(&mut self, draft: D) -> Result<EntityId, EntryError> {
        draft.check_required()?;

        let existing = D::Record::collection(self);
        let id = loop {
            let candidate = EntityId::generate();
            if !existing.iter().any(|r| r.id() == &candidate) {
                break candidate;
            }
        };

        D::Record::collection_mut(self).push(draft.into_record(id.clone()));
        Ok(id)
    }

    /// Replaces every field but the id of the record with `id`.
    pub fn update<D: Draft>(&mut self, id: &EntityId, draft: D) -> Result<(), EntryError> {
        draft.check_required()?;

        let slot = D::Record::collection_mut(self)
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| EntryError::UnknownId {
                kind: <D::Record as Record>::KIND,
                id: id.clone(),
            })?;
        *slot = draft.into_record(id.clone());
        Ok(())
    }

    pub fn remove(&mut self, kind: EntityKind, id: &EntityId) -> Result<(), EntryError> {
        let removed = match kind {
            EntityKind::Contact => remove_from(&mut self.contacts, id),
            EntityKind::Medication => remove_from(&mut self.medications, id),
            EntityKind::Pet => remove_from(&mut self.pets, id),
            EntityKind::InsurancePolicy => remove_from(&mut self.insurance_policies, id),
            EntityKind::Note => remove_from(&mut self.notes, id),
        };
        if removed {
            Ok(())
        } else {
            Err(EntryError::UnknownId {
                kind,
                id: id.clone(),
            })
        }
    }

    pub fn get<R: Record>(&self, id: &EntityId) -> Option<&R> {
        R::collection(self).iter().find(|r| r.id() == id)
    }

    pub fn records<R: Record>(&self) -> &[R] {
        R::collection(self)
    }

    /// Sets or clears the background image. Blank input clears it.
    pub fn set_background_image(&mut self, image: Option<String>) {
        self.background_image = image
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn search(&self, query: &str) -> SearchHits<'_> {
        let query = Query::new(query);
        SearchHits {
            contacts: filter(&self.contacts, &query),
            medications: filter(&self.medications, &query),
            pets: filter(&self.pets, &query),
            insurance_policies: filter(&self.insurance_policies, &query),
            notes: filter(&self.notes, &query),
        }
    }
}

fn remove_from<R: Record>(records: &mut Vec<R>, id: &EntityId) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

fn filter<'a, R: Record>(records: &'a [R], query: &Query) -> Vec<&'a R> {
    if query.is_blank() {
        return records.iter().collect();
    }
    records.iter().filter(|r| r.matches(query)).collect()
}

/// A search query. Text fields match case-insensitively; phone fields match
/// the raw query verbatim.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    lowered: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            lowered: raw.to_lowercase(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    pub fn matches_text(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.lowered)
    }

    pub fn matches_phone(&self, haystack: &str) -> bool {
        haystack.contains(&self.raw)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits<'a> {
    pub contacts: Vec<&'a Contact>,
    pub medications: Vec<&'a Medication>,
    pub pets: Vec<&'a Pet>,
    pub insurance_policies: Vec<&'a InsurancePolicy>,
    pub notes: Vec<&'a Note>,
}

impl SearchHits<'_> {
    pub fn total(&self) -> usize {
        self.contacts.len()
            + self.medications.len()
            + self.pets.len()
            + self.insurance_policies.len()
            + self.notes.len()
    }
}
