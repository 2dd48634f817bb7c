use crate::{EntityId, EntityKind};

/// Rejection of a create/edit/delete request on a [`crate::BinderDocument`].
///
/// Raised before anything is persisted: a rejected entry never reaches
/// storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("{kind} requires a non-empty `{field}`")]
    MissingRequiredField {
        kind: EntityKind,
        field: &'static str,
    },

    #[error("no {kind} with id `{id}`")]
    UnknownId { kind: EntityKind, id: EntityId },
}
