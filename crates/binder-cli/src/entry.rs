//! Field flags for `add` and `edit`.
//!
//! Every flag is optional. `add` starts from a blank draft, `edit` from the
//! record's current fields, and only the flags given are overwritten. Phone
//! inputs are normalized with [`format_phone_number`].

use anyhow::Result;
use binder_schema::{
    format_phone_number, ContactDraft, Draft, EntityId, EntryError, InsurancePolicyDraft,
    MedicationDraft, NoteDraft, PetDraft, Record,
};
use binder_storage::{Binder, KeyValueStore};
use clap::{Args, Subcommand};

pub trait EntryArgs {
    type Draft: Draft + Default;

    fn apply(self, draft: &mut Self::Draft);
}

#[derive(Subcommand, Debug)]
pub enum NewEntry {
    /// Emergency contact
    Contact(ContactArgs),
    /// Medication someone in the household takes
    Medication(MedicationArgs),
    /// Pet and its vet
    Pet(PetArgs),
    /// Insurance policy
    Insurance(InsuranceArgs),
    /// Free-text note
    Note(NoteArgs),
}

#[derive(Subcommand, Debug)]
pub enum EditedEntry {
    Contact {
        id: String,
        #[command(flatten)]
        fields: ContactArgs,
    },
    Medication {
        id: String,
        #[command(flatten)]
        fields: MedicationArgs,
    },
    Pet {
        id: String,
        #[command(flatten)]
        fields: PetArgs,
    },
    Insurance {
        id: String,
        #[command(flatten)]
        fields: InsuranceArgs,
    },
    Note {
        id: String,
        #[command(flatten)]
        fields: NoteArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub relationship: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct MedicationArgs {
    /// Who takes it
    #[arg(long)]
    pub person: Option<String>,
    #[arg(long)]
    pub medication: Option<String>,
    #[arg(long)]
    pub dosage: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct PetArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Species or breed
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub vet_name: Option<String>,
    #[arg(long)]
    pub vet_phone: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct InsuranceArgs {
    /// Coverage type (Health, Auto, Home, ...)
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub provider: Option<String>,
    #[arg(long)]
    pub policy_number: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct NoteArgs {
    /// Note text
    pub content: Option<String>,
}

fn set(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn set_phone(slot: &mut String, value: Option<String>) {
    set(slot, value.map(|v| format_phone_number(&v)));
}

impl EntryArgs for ContactArgs {
    type Draft = ContactDraft;

    fn apply(self, draft: &mut ContactDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.relationship, self.relationship);
        set_phone(&mut draft.phone, self.phone);
        set(&mut draft.notes, self.notes);
    }
}

impl EntryArgs for MedicationArgs {
    type Draft = MedicationDraft;

    fn apply(self, draft: &mut MedicationDraft) {
        set(&mut draft.person, self.person);
        set(&mut draft.medication, self.medication);
        set(&mut draft.dosage, self.dosage);
        set(&mut draft.notes, self.notes);
    }
}

impl EntryArgs for PetArgs {
    type Draft = PetDraft;

    fn apply(self, draft: &mut PetDraft) {
        set(&mut draft.name, self.name);
        set(&mut draft.kind, self.kind);
        set(&mut draft.vet_name, self.vet_name);
        set_phone(&mut draft.vet_phone, self.vet_phone);
        set(&mut draft.notes, self.notes);
    }
}

impl EntryArgs for InsuranceArgs {
    type Draft = InsurancePolicyDraft;

    fn apply(self, draft: &mut InsurancePolicyDraft) {
        set(&mut draft.kind, self.kind);
        set(&mut draft.provider, self.provider);
        set(&mut draft.policy_number, self.policy_number);
        set_phone(&mut draft.phone, self.phone);
    }
}

impl EntryArgs for NoteArgs {
    type Draft = NoteDraft;

    fn apply(self, draft: &mut NoteDraft) {
        set(&mut draft.content, self.content);
    }
}

pub fn add<A: EntryArgs, S: KeyValueStore>(binder: &mut Binder<S>, args: A) -> Result<EntityId> {
    let mut draft = A::Draft::default();
    args.apply(&mut draft);
    Ok(binder.add(draft)?)
}

pub fn edit<A: EntryArgs, S: KeyValueStore>(
    binder: &mut Binder<S>,
    id: &str,
    args: A,
) -> Result<()> {
    let id = EntityId::new(id);
    let current = binder
        .document()
        .get::<<A::Draft as Draft>::Record>(&id)
        .ok_or_else(|| EntryError::UnknownId {
            kind: <<A::Draft as Draft>::Record as Record>::KIND,
            id: id.clone(),
        })?;

    let mut draft = current.to_draft();
    args.apply(&mut draft);
    binder.update(&id, draft)?;
    Ok(())
}
