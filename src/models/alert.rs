//! Transient alert notifications

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
}

impl AlertKind {
    pub fn icon(&self) -> &'static str {
        match self {
            AlertKind::Success => "✓",
            AlertKind::Error => "!",
            AlertKind::Warning => "⚠",
            AlertKind::Info => "ℹ",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::Success => "Success!",
            AlertKind::Error => "Error!",
            AlertKind::Warning => "Warning!",
            AlertKind::Info => "Information",
        }
    }

    /// Only success alerts carry a progress bar and go away on their own
    pub fn auto_dismisses(&self) -> bool {
        matches!(self, AlertKind::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, message)
    }
}
