//! Form kinds and the fields they validate for duplicates

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// FieldKey
// ---------------------------------------------------------------------------

/// Field checked against the duplicate validation endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Title,
    Isbn,
    LibraryCode,
    Name,
    Email,
    Phone,
}

impl FieldKey {
    /// Form field name, as used in the DOM and in endpoint names
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Isbn => "isbn",
            FieldKey::LibraryCode => "libraryCode",
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
        }
    }

    pub fn form(&self) -> FormKind {
        match self {
            FieldKey::Title | FieldKey::Isbn | FieldKey::LibraryCode => FormKind::Book,
            FieldKey::Name | FieldKey::Email | FieldKey::Phone => FormKind::Member,
        }
    }

    /// Relative path of the duplicate check endpoint for this field
    pub fn endpoint_path(&self) -> String {
        format!("{}/api/validate-{}", self.form().resource(), self.as_str())
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(FieldKey::Title),
            "isbn" => Ok(FieldKey::Isbn),
            "libraryCode" | "library_code" => Ok(FieldKey::LibraryCode),
            "name" => Ok(FieldKey::Name),
            "email" => Ok(FieldKey::Email),
            "phone" => Ok(FieldKey::Phone),
            other => Err(AppError::UnknownField(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// FormKind
// ---------------------------------------------------------------------------

/// Which validation policy applies when a form is first loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadValidation {
    /// Every pre-filled field is checked
    Always,
    /// Pre-filled fields are checked only when editing an existing record
    EditModeOnly,
}

/// Form type, fixing the set of validated fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Book,
    Member,
}

impl FormKind {
    pub fn fields(&self) -> &'static [FieldKey] {
        match self {
            FormKind::Book => &[FieldKey::Title, FieldKey::Isbn, FieldKey::LibraryCode],
            FormKind::Member => &[FieldKey::Name, FieldKey::Email, FieldKey::Phone],
        }
    }

    pub fn contains(&self, field: FieldKey) -> bool {
        field.form() == *self
    }

    /// URL segment owning the validation endpoints
    pub fn resource(&self) -> &'static str {
        match self {
            FormKind::Book => "books",
            FormKind::Member => "members",
        }
    }

    pub fn load_validation(&self) -> LoadValidation {
        match self {
            FormKind::Book => LoadValidation::Always,
            FormKind::Member => LoadValidation::EditModeOnly,
        }
    }

    /// Member fields get an explicit "available" / "already registered" message
    pub fn shows_field_messages(&self) -> bool {
        matches!(self, FormKind::Member)
    }

    /// Alert shown when submission is attempted with a flagged field
    pub fn blocked_submission_message(&self) -> &'static str {
        match self {
            FormKind::Book => "Please fix duplicate data errors before saving the book.",
            FormKind::Member => "Please fix validation errors before submitting!",
        }
    }

    /// Tooltip on the disabled save button
    pub fn disabled_save_tooltip(&self) -> &'static str {
        "Please fix duplicate data errors before saving"
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FormKind::Book => "book",
            FormKind::Member => "member",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for FormKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "book" | "books" => Ok(FormKind::Book),
            "member" | "members" => Ok(FormKind::Member),
            other => Err(AppError::BadRequest(format!("Unknown form kind: {}", other))),
        }
    }
}
