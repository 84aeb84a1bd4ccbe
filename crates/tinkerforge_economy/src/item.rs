//! # Item Definitions
//!
//! An [`Item`] describes a thing that can be stored or crafted. Items are
//! created once by the catalog and shared by reference from every recipe
//! that mentions them.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};
use crate::fixed_point::FixedPoint;
use crate::identifier::{Identified, ItemId};

/// Default maximum stack size for stackable items.
pub const DEFAULT_MAX_STACK: u32 = 64;

/// Decimal places a discounted price is rounded to.
const PRICE_DECIMAL_PLACES: u32 = 2;

/// Broad item category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Raw crafting input.
    Material,
    /// Used up on use (food, potions).
    Consumable,
    /// Equipment for fighting.
    Weapon,
    /// Equipment for gathering and crafting.
    Tool,
    /// Story item.
    Quest,
    /// Anything else.
    #[default]
    Misc,
}

/// Rarity tier for items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Rarity {
    /// Common items (gray).
    #[default]
    Common = 0,
    /// Uncommon items (green).
    Uncommon = 1,
    /// Rare items (blue).
    Rare = 2,
    /// Epic items (purple).
    Epic = 3,
    /// Legendary items (orange).
    Legendary = 4,
}

/// An item definition.
///
/// Equality and hashing use the identifier only: two items named "Water"
/// with different identifiers are different items.
///
/// `Clone` keeps the identifier, so a clone is the same item. Use
/// [`Item::with_identity`] to derive a distinct item from an existing one.
#[derive(Clone, Debug)]
pub struct Item {
    id: ItemId,
    name: String,
    unit: String,
    base_price: FixedPoint,
    stackable: bool,
    max_stack: u32,
    category: ItemCategory,
    rarity: Rarity,
    description: String,
}

impl Item {
    /// Creates a stackable, zero-priced, common `Misc` item.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier, never reassigned
    /// * `name` - Display name
    /// * `unit` - Unit label used when printing amounts ("L", "kg", "")
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidItem` if the name is empty.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        unit: impl Into<String>,
    ) -> EconomyResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EconomyError::InvalidItem(format!("item {id} must have a name")));
        }

        Ok(Self {
            id,
            name,
            unit: unit.into(),
            base_price: FixedPoint::ZERO,
            stackable: true,
            max_stack: DEFAULT_MAX_STACK,
            category: ItemCategory::default(),
            rarity: Rarity::default(),
            description: String::new(),
        })
    }

    /// Sets the base price.
    #[must_use]
    pub const fn with_price(mut self, price: FixedPoint) -> Self {
        self.base_price = price;
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the rarity.
    #[must_use]
    pub const fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Makes the item stackable up to `max_stack`.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidItem` if `max_stack` is zero.
    pub fn with_max_stack(mut self, max_stack: u32) -> EconomyResult<Self> {
        if max_stack == 0 {
            return Err(EconomyError::InvalidItem(format!(
                "item {} must stack to at least 1",
                self.id
            )));
        }
        self.stackable = true;
        self.max_stack = max_stack;
        Ok(self)
    }

    /// Makes the item non-stackable (max stack 1).
    #[must_use]
    pub const fn unstackable(mut self) -> Self {
        self.stackable = false;
        self.max_stack = 1;
        self
    }

    /// Copies every attribute into a new, distinct item.
    #[must_use]
    pub fn with_identity(&self, id: ItemId) -> Self {
        Self { id, ..self.clone() }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit label.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the base price.
    #[inline]
    #[must_use]
    pub const fn base_price(&self) -> FixedPoint {
        self.base_price
    }

    /// Whether several of this item share one stack.
    #[inline]
    #[must_use]
    pub const fn is_stackable(&self) -> bool {
        self.stackable
    }

    /// Maximum stack size (1 for non-stackable items).
    #[inline]
    #[must_use]
    pub const fn max_stack(&self) -> u32 {
        self.max_stack
    }

    /// Returns the category.
    #[inline]
    #[must_use]
    pub const fn category(&self) -> ItemCategory {
        self.category
    }

    /// Returns the rarity.
    #[inline]
    #[must_use]
    pub const fn rarity(&self) -> Rarity {
        self.rarity
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Lowers the base price by `percent` and rounds it to 2 decimal places.
    ///
    /// Returns the new price.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidDiscount` if `percent` exceeds 100; the
    /// price is left unchanged.
    pub fn apply_discount(&mut self, percent: FixedPoint) -> EconomyResult<FixedPoint> {
        if percent > FixedPoint::HUNDRED {
            return Err(EconomyError::InvalidDiscount(percent.to_string()));
        }

        let remaining = FixedPoint::HUNDRED - percent;
        self.base_price = self
            .base_price
            .mul_percent(remaining)
            .checked_round_dp(PRICE_DECIMAL_PLACES)
            .ok_or(EconomyError::ArithmeticOverflow)?;

        tracing::debug!(item = %self.id, %percent, price = %self.base_price, "discount applied");
        Ok(self.base_price)
    }
}

impl Identified for Item {
    type Id = ItemId;

    #[inline]
    fn id(&self) -> &ItemId {
        &self.id
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water(id: &str) -> Item {
        Item::new(ItemId::new(id).unwrap(), "Water", "L")
            .unwrap()
            .with_price(FixedPoint::from_whole(2))
            .with_category(ItemCategory::Material)
    }

    #[test]
    fn test_equality_is_identity() {
        let a = water("water");
        let b = water("spring_water");
        assert_ne!(a, b, "same name and price, different ids");

        let expensive = water("water").with_price(FixedPoint::from_whole(99));
        assert_eq!(a, expensive, "same id, different price");
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Item::new(ItemId::new("x").unwrap(), "  ", "");
        assert!(matches!(result, Err(EconomyError::InvalidItem(_))));
    }

    #[test]
    fn test_stacking_rules() {
        let item = water("water");
        assert!(item.is_stackable());
        assert_eq!(item.max_stack(), DEFAULT_MAX_STACK);

        let sword = water("sword").unstackable();
        assert!(!sword.is_stackable());
        assert_eq!(sword.max_stack(), 1);

        assert!(water("water").with_max_stack(0).is_err());
        assert_eq!(water("water").with_max_stack(16).unwrap().max_stack(), 16);
    }

    #[test]
    fn test_discount_rounds_to_cents() {
        let mut item = water("water").with_price("9.99".parse().unwrap());
        let price = item.apply_discount(FixedPoint::from_whole(15)).unwrap();
        // 9.99 * 0.85 = 8.4915
        assert_eq!(price, "8.49".parse().unwrap());
        assert_eq!(item.base_price(), price);
    }

    #[test]
    fn test_discount_bounds() {
        let mut item = water("water");
        assert_eq!(item.apply_discount(FixedPoint::ZERO).unwrap(), FixedPoint::from_whole(2));
        assert_eq!(item.apply_discount(FixedPoint::HUNDRED).unwrap(), FixedPoint::ZERO);

        let mut item = water("water");
        let result = item.apply_discount(FixedPoint::from_parts(100, 1));
        assert!(matches!(result, Err(EconomyError::InvalidDiscount(_))));
        assert_eq!(item.base_price(), FixedPoint::from_whole(2));
    }

    #[test]
    fn test_with_identity_copies_attributes() {
        let item = water("water").with_description("Clear.");
        let copy = item.with_identity(ItemId::new("sea_water").unwrap());
        assert_ne!(item, copy);
        assert_eq!(copy.name(), "Water");
        assert_eq!(copy.description(), "Clear.");
        assert_eq!(copy.base_price(), item.base_price());

        let clone = item.clone();
        assert_eq!(item, clone);
    }
}
