//! Book category select with inline creation of a new category

use serde::Serialize;

/// Option value that opens the custom category entry
pub const ADD_NEW: &str = "ADD_NEW";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomEntry {
    pub visible: bool,
    pub required: bool,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySelect {
    options: Vec<String>,
    selected: Option<String>,
    pub custom: CustomEntry,
}

impl CategorySelect {
    /// Existing categories; the `ADD_NEW` option is always appended last
    pub fn new(categories: impl IntoIterator<Item = String>) -> Self {
        let mut options: Vec<String> = categories
            .into_iter()
            .filter(|c| c != ADD_NEW)
            .collect();
        options.push(ADD_NEW.to_string());
        Self {
            options,
            selected: None,
            custom: CustomEntry::default(),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selection changed in the dropdown
    pub fn select(&mut self, value: &str) {
        self.selected = Some(value.to_string());
        if value == ADD_NEW {
            self.custom.visible = true;
            self.custom.required = true;
        } else {
            self.custom = CustomEntry::default();
        }
    }

    /// Commit the typed custom category; blank input changes nothing
    pub fn commit_custom(&mut self) -> Option<&str> {
        let name = self.custom.value.trim().to_string();
        if name.is_empty() {
            return None;
        }

        let at = self
            .options
            .iter()
            .position(|o| o == ADD_NEW)
            .unwrap_or(self.options.len());
        self.options.insert(at, name.clone());
        self.selected = Some(name);
        self.custom.visible = false;
        self.custom.required = false;
        self.selected.as_deref()
    }
}
