//! Rendering contract between the form controller and the page
//!
//! The controller never touches markup directly; it pushes state through
//! [`FormView`]. Per field the page provides an input, an optional busy
//! indicator and an optional message element, plus one save button.

pub mod memory;

use serde::Serialize;

use crate::models::{Alert, FieldKey, FormKind};

pub use memory::MemoryView;

/// Visual state of a validated input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldIndicator {
    #[default]
    Neutral,
    Duplicate,
    Available,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMessage {
    pub is_error: bool,
    pub text: String,
}

impl FieldMessage {
    pub fn duplicate(field: FieldKey) -> Self {
        Self {
            is_error: true,
            text: format!("❌ This {} is already registered!", field),
        }
    }

    pub fn available(field: FieldKey) -> Self {
        Self {
            is_error: false,
            text: format!("✅ This {} is available!", field),
        }
    }
}

/// Enabled state and affordance of the submission control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveButtonAffordance {
    pub enabled: bool,
    pub cursor: Option<&'static str>,
    pub background: Option<&'static str>,
    pub tooltip: Option<&'static str>,
}

impl SaveButtonAffordance {
    pub fn for_gate(kind: FormKind, open: bool) -> Self {
        if open {
            Self {
                enabled: true,
                cursor: None,
                background: None,
                tooltip: None,
            }
        } else {
            Self {
                enabled: false,
                cursor: Some("not-allowed"),
                background: Some("#6c757d"),
                tooltip: Some(kind.disabled_save_tooltip()),
            }
        }
    }
}

impl Default for SaveButtonAffordance {
    fn default() -> Self {
        Self::for_gate(FormKind::Book, true)
    }
}

/// Output side of the page
pub trait FormView: Send + Sync {
    fn set_busy(&self, field: FieldKey, busy: bool);

    fn set_indicator(&self, field: FieldKey, indicator: FieldIndicator);

    fn set_message(&self, field: FieldKey, message: Option<FieldMessage>);

    fn set_save_button(&self, affordance: &SaveButtonAffordance);

    fn show_alert(&self, alert: Alert);
}

impl<V: FormView + ?Sized> FormView for std::sync::Arc<V> {
    fn set_busy(&self, field: FieldKey, busy: bool) {
        (**self).set_busy(field, busy)
    }

    fn set_indicator(&self, field: FieldKey, indicator: FieldIndicator) {
        (**self).set_indicator(field, indicator)
    }

    fn set_message(&self, field: FieldKey, message: Option<FieldMessage>) {
        (**self).set_message(field, message)
    }

    fn set_save_button(&self, affordance: &SaveButtonAffordance) {
        (**self).set_save_button(affordance)
    }

    fn show_alert(&self, alert: Alert) {
        (**self).show_alert(alert)
    }
}
