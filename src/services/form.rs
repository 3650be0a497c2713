//! Form controller: duplicate validation per field and the save gate
//!
//! One controller per form instance. It owns the validation state, one
//! debouncer per field and the view it renders into; nothing is global.
//! Keystroke handlers (`input`) must run inside a Tokio runtime.

use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinSet;

use super::debounce::Debouncer;
use super::oracle::{DuplicateOracle, DuplicateQuery};
use crate::{
    error::{AppError, AppResult},
    models::{Alert, FieldKey, FormKind, LoadValidation, RequestTicket, ValidationState},
    view::{FieldIndicator, FieldMessage, FormView, SaveButtonAffordance},
};

struct Inner<O, V> {
    kind: FormKind,
    current_id: Option<String>,
    oracle: O,
    view: V,
    state: Mutex<ValidationState>,
    debouncers: IndexMap<FieldKey, Debouncer>,
}

pub struct FormController<O, V> {
    inner: Arc<Inner<O, V>>,
}

impl<O, V> Clone for FormController<O, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O, V> FormController<O, V>
where
    O: DuplicateOracle + 'static,
    V: FormView + 'static,
{
    /// Create a controller; a blank `current_id` means a new record
    pub fn new(
        kind: FormKind,
        current_id: Option<String>,
        oracle: O,
        view: V,
        debounce: Duration,
    ) -> Self {
        let current_id = current_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        let debouncers = kind
            .fields()
            .iter()
            .map(|field| (*field, Debouncer::new(debounce)))
            .collect();

        let controller = Self {
            inner: Arc::new(Inner {
                kind,
                current_id,
                oracle,
                view,
                state: Mutex::new(ValidationState::for_form(kind)),
                debouncers,
            }),
        };
        controller.render_gate(true);
        controller
    }

    pub fn kind(&self) -> FormKind {
        self.inner.kind
    }

    pub fn current_id(&self) -> Option<&str> {
        self.inner.current_id.as_deref()
    }

    pub fn view(&self) -> &V {
        &self.inner.view
    }

    /// View updates happen under this lock so a stale render cannot land
    /// after a fresher one. Views must not call back into the controller.
    fn state(&self) -> MutexGuard<'_, ValidationState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn debouncer(&self, field: FieldKey) -> AppResult<&Debouncer> {
        self.inner
            .debouncers
            .get(&field)
            .ok_or_else(|| AppError::UnknownField(field.to_string()))
    }

    /// Keystroke on a validated field
    ///
    /// An empty value resets the field right away. Anything else is checked
    /// once typing pauses for the debounce delay, unless the field was
    /// validated or cleared some other way in the meantime.
    pub fn input(&self, field: FieldKey, raw: &str) -> AppResult<()> {
        let debouncer = self.debouncer(field)?;
        let value = raw.trim();

        if value.is_empty() {
            return self.clear_validation(field);
        }

        let seen = self
            .state()
            .generation(field)
            .ok_or_else(|| AppError::UnknownField(field.to_string()))?;
        let controller = self.clone();
        let value = value.to_string();
        debouncer.schedule(move || {
            let ticket = {
                let mut state = controller.state();
                match state.begin_if_unchanged(field, seen) {
                    Ok(Some(ticket)) => {
                        controller.inner.view.set_busy(field, true);
                        ticket
                    }
                    Ok(None) => {
                        tracing::debug!("Keystroke on {} superseded before its check", field);
                        return;
                    }
                    Err(e) => {
                        tracing::error!("Duplicate check for {} not started: {}", field, e);
                        return;
                    }
                }
            };
            // Detached so a later keystroke only cancels the timer, not the request
            tokio::spawn(async move {
                controller.run_check(ticket, value).await;
            });
        });
        Ok(())
    }

    /// Check a value immediately; returns whether the outcome was applied
    pub async fn validate_now(&self, field: FieldKey, raw: &str) -> AppResult<bool> {
        self.debouncer(field)?.cancel();
        let value = raw.trim();
        if value.is_empty() {
            self.clear_validation(field)?;
            return Ok(true);
        }
        let ticket = self.begin_check(field)?;
        Ok(self.run_check(ticket, value.to_string()).await)
    }

    fn begin_check(&self, field: FieldKey) -> AppResult<RequestTicket> {
        let mut state = self.state();
        let ticket = state.begin(field)?;
        self.inner.view.set_busy(field, true);
        Ok(ticket)
    }

    async fn run_check(&self, ticket: RequestTicket, value: String) -> bool {
        let query = DuplicateQuery {
            field: ticket.field,
            value,
            current_id: self.inner.current_id.clone(),
        };
        let outcome = self.inner.oracle.check_duplicate(query).await;
        self.apply(ticket, outcome)
    }

    fn apply(&self, ticket: RequestTicket, outcome: AppResult<bool>) -> bool {
        let field = ticket.field;
        let mut state = self.state();

        let applied = match &outcome {
            Ok(is_duplicate) => state.complete(&ticket, !is_duplicate),
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!("Duplicate check for {} failed, allowing value: {}", field, e);
                } else {
                    tracing::error!("Duplicate check for {} errored, allowing value: {}", field, e);
                }
                state.fail_open(&ticket)
            }
        };
        if !applied {
            tracing::debug!(
                "Discarding stale duplicate check for {} (generation {})",
                field,
                ticket.generation
            );
            return false;
        }

        let view = &self.inner.view;
        let messages = self.inner.kind.shows_field_messages();
        view.set_busy(field, false);
        match outcome {
            Ok(true) => {
                view.set_indicator(field, FieldIndicator::Duplicate);
                if messages {
                    view.set_message(field, Some(FieldMessage::duplicate(field)));
                }
            }
            Ok(false) if messages => {
                view.set_indicator(field, FieldIndicator::Available);
                view.set_message(field, Some(FieldMessage::available(field)));
            }
            Ok(false) | Err(_) => {
                view.set_indicator(field, FieldIndicator::Neutral);
                view.set_message(field, None);
            }
        }
        self.render_gate(state.save_gate());
        true
    }

    /// Set a field's verdict directly
    pub fn record_validation(&self, field: FieldKey, is_valid: bool) -> AppResult<()> {
        self.debouncer(field)?.cancel();
        let mut state = self.state();
        state.record(field, is_valid)?;

        let indicator = if is_valid {
            FieldIndicator::Neutral
        } else {
            FieldIndicator::Duplicate
        };
        self.inner.view.set_indicator(field, indicator);
        self.render_gate(state.save_gate());
        Ok(())
    }

    /// Reset a field to valid, e.g. when it became empty
    pub fn clear_validation(&self, field: FieldKey) -> AppResult<()> {
        self.debouncer(field)?.cancel();
        let mut state = self.state();
        state.clear(field)?;

        let view = &self.inner.view;
        view.set_busy(field, false);
        view.set_indicator(field, FieldIndicator::Neutral);
        view.set_message(field, None);
        self.render_gate(state.save_gate());
        Ok(())
    }

    pub fn compute_save_gate(&self) -> bool {
        self.state().save_gate()
    }

    /// Client-side submission check; the server still re-validates
    pub fn guard_submission(&self) -> AppResult<()> {
        let invalid = self.state().invalid_fields();
        if invalid.is_empty() {
            return Ok(());
        }

        let message = self.inner.kind.blocked_submission_message();
        tracing::info!(
            "Blocked {} form submission, duplicates in {:?}",
            self.inner.kind,
            invalid
        );
        self.inner.view.show_alert(Alert::error(message));
        Err(AppError::SubmissionBlocked(message.to_string()))
    }

    /// Validate pre-filled values when the page loads
    ///
    /// Checks run concurrently. The member form only checks when editing.
    pub async fn initialize(&self, values: &[(FieldKey, String)]) -> AppResult<()> {
        if self.inner.kind.load_validation() == LoadValidation::EditModeOnly
            && self.inner.current_id.is_none()
        {
            return Ok(());
        }

        if let Some((field, _)) = values.iter().find(|(f, _)| !self.inner.kind.contains(*f)) {
            return Err(AppError::UnknownField(field.to_string()));
        }

        let mut checks = JoinSet::new();
        for (field, raw) in values {
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }
            self.debouncer(*field)?.cancel();
            let ticket = self.begin_check(*field)?;
            let controller = self.clone();
            let value = value.to_string();
            checks.spawn(async move { controller.run_check(ticket, value).await });
        }

        while let Some(joined) = checks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Initial duplicate check aborted: {}", e);
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> ValidationState {
        self.state().clone()
    }

    fn render_gate(&self, open: bool) {
        tracing::debug!("{} save gate {}", self.inner.kind, if open { "open" } else { "closed" });
        self.inner
            .view
            .set_save_button(&SaveButtonAffordance::for_gate(self.inner.kind, open));
    }
}
