//! # TINKERFORGE Economy
//!
//! Items, recipes and inventories for the TINKERFORGE crafting game.
//!
//! ## Design Principles
//!
//! 1. **Zero floating point** - All amounts and prices use [`FixedPoint`]
//! 2. **Transactional crafting** - All-or-nothing item transformations
//! 3. **Identity equality** - Items and recipes compare by identifier
//! 4. **External configuration** - Catalog data lives in TOML files
//!
//! ## Example
//!
//! ```rust,ignore
//! use tinkerforge_economy::Catalog;
//!
//! let catalog = Catalog::starter()?;
//! let mut inventory = catalog.seed_inventory()?;
//!
//! for recipe in catalog.recipes() {
//!     if recipe.craft(&mut inventory) {
//!         println!("crafted {}", recipe.name());
//!     }
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod crafting;
pub mod error;
pub mod fixed_point;
pub mod identifier;
pub mod inventory;
pub mod item;
pub mod quantity;

pub use catalog::Catalog;
pub use crafting::{Recipe, RecipeBook, Shortfall};
pub use error::{EconomyError, EconomyResult};
pub use fixed_point::FixedPoint;
pub use identifier::{Identified, ItemId, RecipeId};
pub use inventory::{Inventory, InventorySnapshot, SharedInventory};
pub use item::{Item, ItemCategory, Rarity};
pub use quantity::{Ingredient, Product, Quantity};
