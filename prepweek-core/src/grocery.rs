//! Grocery-side inputs consumed by the pickup optimizer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The subset of a grocery item the optimizer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItemRef {
    pub name: String,
    /// Free-text category used only for the shelf-life lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl GroceryItemRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Category as given, if present and not blank.
    pub fn known_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// An ingredient category paired with the local date a meal needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerishableMealDate {
    pub category: String,
    pub date: NaiveDate,
}

impl PerishableMealDate {
    pub fn new(category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            category: category.into(),
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_categories_are_unknown() {
        assert_eq!(GroceryItemRef::new("salt").known_category(), None);
        assert_eq!(GroceryItemRef::new("salt").with_category("  ").known_category(), None);
        assert_eq!(
            GroceryItemRef::new("salmon").with_category(" Seafood ").known_category(),
            Some(" Seafood ")
        );
    }
}
