//! Alert stack with timed dismissal

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::time::Instant;

use crate::config::AlertsConfig;
use crate::models::Alert;

pub type AlertId = u64;

#[derive(Debug, Clone, Serialize)]
pub struct ShownAlert {
    pub id: AlertId,
    pub alert: Alert,
    /// Dismissed and playing its fade-out before removal
    pub fading: bool,
}

#[derive(Default)]
struct AlertStack {
    next_id: AlertId,
    alerts: Vec<ShownAlert>,
}

#[derive(Clone, Default)]
pub struct AlertCenter {
    stack: Arc<Mutex<AlertStack>>,
    config: AlertsConfig,
}

impl AlertCenter {
    pub fn new(config: AlertsConfig) -> Self {
        Self {
            stack: Arc::default(),
            config,
        }
    }

    fn stack(&self) -> MutexGuard<'_, AlertStack> {
        self.stack.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an alert; success alerts schedule their own dismissal
    pub fn show(&self, alert: Alert) -> AlertId {
        let auto_dismiss = alert.kind.auto_dismisses();
        let id = {
            let mut stack = self.stack();
            stack.next_id += 1;
            let id = stack.next_id;
            stack.alerts.push(ShownAlert {
                id,
                alert,
                fading: false,
            });
            id
        };

        if auto_dismiss {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let center = self.clone();
                    let deadline = Instant::now() + self.config.auto_dismiss();
                    handle.spawn(async move {
                        tokio::time::sleep_until(deadline).await;
                        center.dismiss(id);
                    });
                }
                Err(_) => tracing::debug!("No runtime, alert {} stays until dismissed", id),
            }
        }

        id
    }

    /// Start the fade-out of an alert; returns false if it is unknown or already fading
    pub fn dismiss(&self, id: AlertId) -> bool {
        {
            let mut stack = self.stack();
            match stack.alerts.iter_mut().find(|a| a.id == id) {
                Some(shown) if !shown.fading => shown.fading = true,
                _ => return false,
            }
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let center = self.clone();
                let deadline = Instant::now() + self.config.fade_out();
                handle.spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    center.remove(id);
                });
            }
            Err(_) => self.remove(id),
        }
        true
    }

    fn remove(&self, id: AlertId) {
        self.stack().alerts.retain(|a| a.id != id);
    }

    pub fn visible(&self) -> Vec<ShownAlert> {
        self.stack().alerts.clone()
    }
}
