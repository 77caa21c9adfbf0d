//! Client-side filter inputs.

use serde::{Deserialize, Serialize};

/// The search box and dropdown values a list view filters by.
///
/// Empty values match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text query matched against title and description.
    #[serde(default)]
    pub text: String,
    /// Branch (or tag) matched case-insensitively.
    #[serde(default)]
    pub branch: String,
    /// Category matched case-insensitively.
    #[serde(default)]
    pub category: String,
}

impl FilterCriteria {
    /// Criteria that match everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the branch filter.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the category filter.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// The same criteria with only the free-text part kept.
    pub fn text_only(&self) -> Self {
        Self {
            text: self.text.clone(),
            ..Self::default()
        }
    }

    /// Whether every input is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.branch.is_empty() && self.category.is_empty()
    }
}
