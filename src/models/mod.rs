//! Data models for the library forms

pub mod alert;
pub mod category;
pub mod copies;
pub mod form;
pub mod validation;

// Re-export commonly used types
pub use alert::{Alert, AlertKind};
pub use category::CategorySelect;
pub use copies::available_copies_for;
pub use form::{FieldKey, FormKind, LoadValidation};
pub use validation::{FieldEntry, FieldStatus, RequestTicket, ValidationState, Verification};
