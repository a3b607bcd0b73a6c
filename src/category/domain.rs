//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, fields::deserialize_some};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(&value)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// A category for grouping transactions (e.g., 'Groceries', 'Salary').
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The unique name of the category.
    pub name: CategoryName,
    /// What the category is for.
    pub description: Option<String>,
    /// When the category was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A category with the number of transactions that refer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub transaction_count: i64,
}

/// The data needed to create a category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCategory {
    /// The name, which must not be used by another category.
    pub name: CategoryName,
    /// What the category is for.
    #[serde(default)]
    pub description: Option<String>,
}

/// The fields to change on a category.
///
/// A field that is `None` is left unchanged. `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryUpdate {
    #[serde(default)]
    pub name: Option<CategoryName>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

/// Form data for category creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    pub description: Option<String>,
}
