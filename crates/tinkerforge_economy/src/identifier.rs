//! # Identifiers
//!
//! Opaque identifiers for catalog entries, and the [`Identified`] trait that
//! item and recipe equality is built on.
//!
//! Two entries with the same name or price are still different entries if
//! their identifiers differ. Types that carry an identifier implement
//! `PartialEq` by delegating to [`Identified::same_identity`] rather than
//! deriving field-by-field equality.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};

/// Unique identifier for an item type, e.g. `"milk"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Creates an item identifier.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidItem` if `id` is empty or whitespace.
    pub fn new(id: impl Into<String>) -> EconomyResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EconomyError::InvalidItem("identifier must not be empty".to_string()));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = EconomyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a recipe, e.g. `"hot_chocolate"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecipeId(String);

impl RecipeId {
    /// Creates a recipe identifier.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidRecipe` if `id` is empty or whitespace.
    pub fn new(id: impl Into<String>) -> EconomyResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EconomyError::InvalidRecipe {
                recipe: "<unnamed>".to_string(),
                reason: "identifier must not be empty".to_string(),
            });
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecipeId {
    type Error = EconomyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecipeId> for String {
    fn from(id: RecipeId) -> Self {
        id.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity-based equality.
///
/// Implementors are equal iff their identifiers are equal, whatever their
/// other attributes say.
pub trait Identified {
    /// The identifier type.
    type Id: Eq;

    /// Returns the identifier assigned at construction.
    fn id(&self) -> &Self::Id;

    /// True if both values carry the same identifier.
    #[inline]
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
