//! Per-field duplicate validation state and the save gate it drives
//!
//! Each field carries a generation counter. Starting a duplicate check or
//! clearing the field bumps it, so a response is only applied when it
//! belongs to the most recently initiated request.

use indexmap::IndexMap;
use serde::Serialize;

use super::form::{FieldKey, FormKind};
use crate::error::{AppError, AppResult};

/// How a valid field got its verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verification {
    /// The endpoint answered that no other record uses the value
    Confirmed,
    /// The check failed and the field was let through
    FailedOpen,
}

/// Lifecycle of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "verification")]
pub enum FieldStatus {
    /// Empty or never checked; counts as valid
    Unvalidated,
    /// A duplicate check is in flight
    Pending,
    Valid(Verification),
    Duplicate,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldEntry {
    /// Gate contribution; a pending field keeps its previous verdict
    pub valid: bool,
    pub status: FieldStatus,
    pub generation: u64,
}

impl Default for FieldEntry {
    fn default() -> Self {
        Self {
            valid: true,
            status: FieldStatus::Unvalidated,
            generation: 0,
        }
    }
}

/// Identifies one initiated duplicate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub field: FieldKey,
    pub generation: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationState {
    entries: IndexMap<FieldKey, FieldEntry>,
}

impl ValidationState {
    pub fn new(fields: impl IntoIterator<Item = FieldKey>) -> Self {
        Self {
            entries: fields
                .into_iter()
                .map(|field| (field, FieldEntry::default()))
                .collect(),
        }
    }

    pub fn for_form(kind: FormKind) -> Self {
        Self::new(kind.fields().iter().copied())
    }

    pub fn get(&self, field: FieldKey) -> Option<&FieldEntry> {
        self.entries.get(&field)
    }

    pub fn is_valid(&self, field: FieldKey) -> Option<bool> {
        self.entries.get(&field).map(|entry| entry.valid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldEntry)> {
        self.entries.iter().map(|(field, entry)| (*field, entry))
    }

    fn entry_mut(&mut self, field: FieldKey) -> AppResult<&mut FieldEntry> {
        self.entries
            .get_mut(&field)
            .ok_or_else(|| AppError::UnknownField(field.to_string()))
    }

    /// Mark a check as started and hand out the ticket its response must present
    pub fn begin(&mut self, field: FieldKey) -> AppResult<RequestTicket> {
        let entry = self.entry_mut(field)?;
        entry.generation += 1;
        entry.status = FieldStatus::Pending;
        Ok(RequestTicket {
            field,
            generation: entry.generation,
        })
    }

    /// Current generation of a field
    pub fn generation(&self, field: FieldKey) -> Option<u64> {
        self.entries.get(&field).map(|entry| entry.generation)
    }

    /// Start a check only if nothing touched the field since `generation`
    /// was read; `None` means the caller was superseded
    pub fn begin_if_unchanged(
        &mut self,
        field: FieldKey,
        generation: u64,
    ) -> AppResult<Option<RequestTicket>> {
        if self.entry_mut(field)?.generation != generation {
            return Ok(None);
        }
        self.begin(field).map(Some)
    }

    /// Whether `ticket` still belongs to the most recently initiated request
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.entries
            .get(&ticket.field)
            .is_some_and(|entry| entry.generation == ticket.generation)
    }

    /// Apply an oracle verdict; returns false and leaves state untouched when stale
    pub fn complete(&mut self, ticket: &RequestTicket, is_valid: bool) -> bool {
        let status = if is_valid {
            FieldStatus::Valid(Verification::Confirmed)
        } else {
            FieldStatus::Duplicate
        };
        self.settle(ticket, is_valid, status)
    }

    /// Oracle failure: the field is let through
    pub fn fail_open(&mut self, ticket: &RequestTicket) -> bool {
        self.settle(ticket, true, FieldStatus::Valid(Verification::FailedOpen))
    }

    fn settle(&mut self, ticket: &RequestTicket, valid: bool, status: FieldStatus) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        if let Some(entry) = self.entries.get_mut(&ticket.field) {
            entry.valid = valid;
            entry.status = status;
        }
        true
    }

    /// Set a verdict directly, superseding anything in flight
    pub fn record(&mut self, field: FieldKey, is_valid: bool) -> AppResult<()> {
        let entry = self.entry_mut(field)?;
        entry.generation += 1;
        entry.valid = is_valid;
        entry.status = if is_valid {
            FieldStatus::Valid(Verification::Confirmed)
        } else {
            FieldStatus::Duplicate
        };
        Ok(())
    }

    /// Reset a field that became empty; any in-flight response turns stale
    pub fn clear(&mut self, field: FieldKey) -> AppResult<()> {
        let entry = self.entry_mut(field)?;
        entry.generation += 1;
        entry.valid = true;
        entry.status = FieldStatus::Unvalidated;
        Ok(())
    }

    /// True iff every field is valid
    pub fn save_gate(&self) -> bool {
        self.entries.values().all(|entry| entry.valid)
    }

    pub fn invalid_fields(&self) -> Vec<FieldKey> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.valid)
            .map(|(field, _)| *field)
            .collect()
    }
}
