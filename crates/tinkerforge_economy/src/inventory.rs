//! # Inventory System
//!
//! A mapping from item identifier to held amount.
//!
//! ## Invariants
//!
//! - Every stored amount is strictly positive.
//! - An absent key means zero held. A removal that reaches exactly zero
//!   deletes the entry, so "used it all up" and "never had any" look the same.
//! - Keys compare case-insensitively: `"Milk"` and `"milk"` share a slot.
//!   The spelling first inserted is the one reported by [`Inventory::entries`].
//!
//! Running short is not an error: [`Inventory::remove`] returns `false`.
//! Only malformed requests (empty identifier, zero amount) and overflow are
//! errors.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::crafting::Recipe;
use crate::error::{EconomyError, EconomyResult};
use crate::fixed_point::FixedPoint;

/// One held item.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot {
    /// Identifier as first inserted.
    item_id: String,
    /// Held amount, always > 0.
    amount: FixedPoint,
}

/// Case-folds an identifier into a lookup key.
#[inline]
pub(crate) fn fold(item_id: &str) -> String {
    item_id.to_lowercase()
}

/// An item-amount inventory.
///
/// Ordered by folded identifier so snapshots print deterministically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: BTreeMap<String, Slot>,
}

impl Inventory {
    /// Creates a new empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct items held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if nothing is held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Adds `amount` of `item_id`, creating the entry if absent.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `item_id` is empty or `amount` is zero
    /// - `ArithmeticOverflow` if the new total is not representable; the
    ///   entry is left unchanged
    pub fn add(&mut self, item_id: &str, amount: FixedPoint) -> EconomyResult<()> {
        if item_id.trim().is_empty() {
            return Err(EconomyError::InvalidAmount {
                item_id: item_id.to_string(),
                reason: "item identifier must not be empty",
            });
        }
        if amount.is_zero() {
            return Err(EconomyError::InvalidAmount {
                item_id: item_id.to_string(),
                reason: "amount must be greater than zero",
            });
        }

        match self.slots.get_mut(&fold(item_id)) {
            Some(slot) => {
                slot.amount = slot.amount.safe_add(amount)?;
            }
            None => {
                self.slots.insert(
                    fold(item_id),
                    Slot {
                        item_id: item_id.to_string(),
                        amount,
                    },
                );
            }
        }

        tracing::trace!(item_id, %amount, "inventory add");
        Ok(())
    }

    /// Removes `amount` of `item_id`.
    ///
    /// Returns `false` without touching anything if the item is absent or
    /// fewer than `amount` are held. An entry that reaches exactly zero is
    /// deleted.
    pub fn remove(&mut self, item_id: &str, amount: FixedPoint) -> bool {
        let key = fold(item_id);
        let Some(slot) = self.slots.get_mut(&key) else {
            return false;
        };

        let Some(remaining) = slot.amount.checked_sub(amount) else {
            return false;
        };

        if remaining.is_zero() {
            self.slots.remove(&key);
        } else {
            slot.amount = remaining;
        }

        tracing::trace!(item_id, %amount, "inventory remove");
        true
    }

    /// True iff at least `amount` of `item_id` is held.
    ///
    /// Asking for zero of an absent item is satisfied.
    #[inline]
    #[must_use]
    pub fn has(&self, item_id: &str, amount: FixedPoint) -> bool {
        self.get_amount(item_id) >= amount
    }

    /// Held amount of `item_id`, or zero if absent.
    #[must_use]
    pub fn get_amount(&self, item_id: &str) -> FixedPoint {
        self.slots
            .get(&fold(item_id))
            .map_or(FixedPoint::ZERO, |slot| slot.amount)
    }

    /// Iterates `(item_id, amount)` for every held item.
    pub fn entries(&self) -> impl Iterator<Item = (&str, FixedPoint)> {
        self.slots
            .values()
            .map(|slot| (slot.item_id.as_str(), slot.amount))
    }

    /// Creates a snapshot of the inventory for rollback.
    #[must_use]
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            slots: self.slots.clone(),
        }
    }

    /// Restores inventory from a snapshot (rollback).
    pub fn restore(&mut self, snapshot: &InventorySnapshot) {
        self.slots.clone_from(&snapshot.slots);
    }
}

/// Snapshot of inventory state for transactional rollback.
#[derive(Clone, Debug)]
pub struct InventorySnapshot {
    slots: BTreeMap<String, Slot>,
}

/// An inventory shared between threads.
///
/// Crafting is check-then-act, so the lock is held for the whole craft:
/// two crafts of the same recipe can never both pass the check and then
/// over-draw the inventory.
#[derive(Debug, Default)]
pub struct SharedInventory {
    inner: Mutex<Inventory>,
}

impl SharedInventory {
    /// Wraps an inventory.
    #[must_use]
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Mutex::new(inventory),
        }
    }

    /// Crafts `recipe` under the lock. See [`Recipe::craft`].
    pub fn craft(&self, recipe: &Recipe) -> bool {
        recipe.craft(&mut self.inner.lock())
    }

    /// Adds under the lock. See [`Inventory::add`].
    ///
    /// # Errors
    ///
    /// Same as [`Inventory::add`].
    pub fn add(&self, item_id: &str, amount: FixedPoint) -> EconomyResult<()> {
        self.inner.lock().add(item_id, amount)
    }

    /// Held amount of `item_id`.
    #[must_use]
    pub fn get_amount(&self, item_id: &str) -> FixedPoint {
        self.inner.lock().get_amount(item_id)
    }
}
