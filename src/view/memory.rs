//! In-memory page used by the CLI and by tests

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

use super::{FieldIndicator, FieldMessage, FormView, SaveButtonAffordance};
use crate::models::{Alert, FieldKey};
use crate::services::alerts::{AlertCenter, ShownAlert};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldWidget {
    pub busy: bool,
    pub indicator: FieldIndicator,
    pub message: Option<FieldMessage>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageSnapshot {
    pub fields: IndexMap<FieldKey, FieldWidget>,
    pub save_button: SaveButtonAffordance,
}

/// Records the latest rendered state instead of drawing it
pub struct MemoryView {
    page: Mutex<PageSnapshot>,
    alerts: AlertCenter,
}

impl MemoryView {
    pub fn new(alerts: AlertCenter) -> Self {
        Self {
            page: Mutex::new(PageSnapshot::default()),
            alerts,
        }
    }

    fn page(&self) -> MutexGuard<'_, PageSnapshot> {
        self.page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.page().clone()
    }

    pub fn field(&self, field: FieldKey) -> FieldWidget {
        self.page().fields.get(&field).cloned().unwrap_or_default()
    }

    pub fn save_button(&self) -> SaveButtonAffordance {
        self.page().save_button.clone()
    }

    pub fn alerts(&self) -> Vec<ShownAlert> {
        self.alerts.visible()
    }
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new(AlertCenter::default())
    }
}

impl FormView for MemoryView {
    fn set_busy(&self, field: FieldKey, busy: bool) {
        self.page().fields.entry(field).or_default().busy = busy;
    }

    fn set_indicator(&self, field: FieldKey, indicator: FieldIndicator) {
        self.page().fields.entry(field).or_default().indicator = indicator;
    }

    fn set_message(&self, field: FieldKey, message: Option<FieldMessage>) {
        self.page().fields.entry(field).or_default().message = message;
    }

    fn set_save_button(&self, affordance: &SaveButtonAffordance) {
        self.page().save_button = affordance.clone();
    }

    fn show_alert(&self, alert: Alert) {
        self.alerts.show(alert);
    }
}
