//! # Quantities
//!
//! A [`Quantity`] pairs a shared [`Item`] with a strictly positive amount.
//! Recipes use it in two roles: [`Ingredient`] (consumed) and [`Product`]
//! (produced). The roles carry no extra state, so they are aliases rather
//! than separate types.

use std::fmt;
use std::sync::Arc;

use crate::error::{EconomyError, EconomyResult};
use crate::fixed_point::FixedPoint;
use crate::identifier::{Identified, ItemId};
use crate::item::Item;

/// An amount of one item. Immutable after construction.
#[derive(Clone, Debug)]
pub struct Quantity {
    item: Arc<Item>,
    amount: FixedPoint,
}

/// A quantity consumed by a recipe.
pub type Ingredient = Quantity;

/// The quantity a recipe produces.
pub type Product = Quantity;

impl Quantity {
    /// Creates a quantity.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidQuantity` if `amount` is zero.
    pub fn new(item: Arc<Item>, amount: FixedPoint) -> EconomyResult<Self> {
        if amount.is_zero() {
            return Err(EconomyError::InvalidQuantity {
                item_id: item.id().to_string(),
            });
        }
        Ok(Self { item, amount })
    }

    /// Returns the item.
    #[inline]
    #[must_use]
    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    /// Returns the item identifier.
    #[inline]
    #[must_use]
    pub fn item_id(&self) -> &ItemId {
        self.item.id()
    }

    /// Returns the amount (always > 0).
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> FixedPoint {
        self.amount
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.item.same_identity(&other.item) && self.amount == other.amount
    }
}

impl Eq for Quantity {}

/// `"{amount} {unit} {name}"`, e.g. `4 L Milk`. An empty unit is skipped.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.item.unit().is_empty() {
            write!(f, "{} {}", self.amount, self.item.name())
        } else {
            write!(f, "{} {} {}", self.amount, self.item.unit(), self.item.name())
        }
    }
}
