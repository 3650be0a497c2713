//! Form behaviour: debouncing, duplicate checks, save gating and alerts

pub mod alerts;
pub mod debounce;
pub mod form;
pub mod oracle;

use std::time::Duration;

use crate::{config::AppConfig, error::AppResult, models::FormKind, view::FormView};

pub use alerts::AlertCenter;
pub use debounce::{Debounced, Debouncer};
pub use form::FormController;
pub use oracle::{DuplicateOracle, DuplicateQuery, HttpDuplicateOracle};

/// Container for the shared services a page builds its forms from
#[derive(Clone)]
pub struct Services {
    pub oracle: HttpDuplicateOracle,
    pub alerts: AlertCenter,
    debounce: Duration,
}

impl Services {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            oracle: HttpDuplicateOracle::new(&config.oracle)?,
            alerts: AlertCenter::new(config.alerts.clone()),
            debounce: config.forms.debounce(),
        })
    }

    /// Controller for one form instance rendering into `view`
    pub fn form<V: FormView + 'static>(
        &self,
        kind: FormKind,
        current_id: Option<String>,
        view: V,
    ) -> FormController<HttpDuplicateOracle, V> {
        FormController::new(kind, current_id, self.oracle.clone(), view, self.debounce)
    }
}
