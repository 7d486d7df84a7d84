//! Form State Store — collected values for one wizard, plus validation.

use serde::Serialize;
use tracing::debug;

use crate::wizard::models::{FieldUpdate, FlagField, ListField, ProfileForm, TextField};
use crate::wizard::steps::Step;
use crate::wizard::tags::{TagError, TagList};
use crate::wizard::validation::{self, FieldErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormStore {
    fields: ProfileForm,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &ProfileForm {
        &self.fields
    }

    /// Owned copy of every current value, for review or submission.
    pub fn snapshot(&self) -> ProfileForm {
        self.fields.clone()
    }

    /// Overwrites the previous value. No validation runs here.
    pub fn set_field(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Text { field, value } => self.set_text(field, value),
            FieldUpdate::Flag { field, value } => self.set_flag(field, value),
            FieldUpdate::List { field, value } => {
                *self.fields.list_mut(field) = value.into_iter().collect();
            }
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        *self.fields.text_mut(field) = value.into();
    }

    pub fn set_flag(&mut self, field: FlagField, value: bool) {
        *self.fields.flag_mut(field) = value;
    }

    pub fn append_to_list(&mut self, field: ListField, value: impl Into<String>) -> &TagList {
        let next = self.fields.list(field).appended(value);
        let slot = self.fields.list_mut(field);
        *slot = next;
        slot
    }

    /// On a stale index the list is left as it was and the error is returned.
    pub fn remove_from_list(&mut self, field: ListField, index: usize) -> Result<&TagList, TagError> {
        let next = self.fields.list(field).removed(index).map_err(|e| {
            debug!("Ignoring removal from {field:?}: {e}");
            e
        })?;
        let slot = self.fields.list_mut(field);
        *slot = next;
        Ok(&*slot)
    }

    pub fn toggle_option(&mut self, field: ListField, value: &str, checked: bool) -> &TagList {
        let next = self.fields.list(field).toggled(value, checked);
        let slot = self.fields.list_mut(field);
        *slot = next;
        slot
    }

    pub fn validate(&self) -> FieldErrors {
        validation::validate_profile(&self.fields)
    }

    pub fn validate_step(&self, step: Step) -> FieldErrors {
        validation::validate_step(&self.fields, step)
    }
}
