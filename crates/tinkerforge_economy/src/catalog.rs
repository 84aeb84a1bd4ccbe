//! # Catalog
//!
//! The items, recipes and starting inventory of a game, loaded from TOML.
//!
//! There is no global catalog. [`Catalog::starter`] parses the built-in
//! data once and hands back owned values; the caller passes them on.
//!
//! ## Format
//!
//! ```toml
//! [[items]]
//! id = "milk"
//! name = "Milk"
//! unit = "L"
//! price = 1.20
//! category = "material"      # optional, default "misc"
//! rarity = "common"          # optional
//! stackable = true           # optional
//! max_stack = 64             # optional
//!
//! [[recipes]]
//! id = "hot_chocolate"
//! name = "Hot Chocolate"
//! starter = true
//! result = { item = "hot_chocolate", amount = 12 }
//! ingredients = [{ item = "milk", amount = 4 }]
//!
//! [[starting_inventory]]
//! item = "milk"
//! amount = 10
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::crafting::{Recipe, RecipeBook};
use crate::error::{EconomyError, EconomyResult};
use crate::fixed_point::FixedPoint;
use crate::identifier::{Identified, ItemId, RecipeId};
use crate::inventory::{fold, Inventory};
use crate::item::{Item, ItemCategory, Rarity, DEFAULT_MAX_STACK};
use crate::quantity::Quantity;

/// The built-in starter catalog.
const STARTER_CATALOG: &str = include_str!("../data/starter_catalog.toml");

// =============================================================================
// File format
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<ItemDef>,
    #[serde(default)]
    recipes: Vec<RecipeDef>,
    #[serde(default)]
    starting_inventory: Vec<AmountDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemDef {
    id: ItemId,
    name: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    price: FixedPoint,
    #[serde(default)]
    category: ItemCategory,
    #[serde(default)]
    rarity: Rarity,
    #[serde(default = "default_stackable")]
    stackable: bool,
    #[serde(default)]
    max_stack: Option<u32>,
    #[serde(default)]
    description: String,
}

const fn default_stackable() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeDef {
    id: RecipeId,
    name: String,
    #[serde(default)]
    starter: bool,
    result: AmountDef,
    ingredients: Vec<AmountDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AmountDef {
    item: String,
    amount: FixedPoint,
}

// =============================================================================
// Catalog
// =============================================================================

/// Items, recipes and starting inventory.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// Items in definition order.
    items: Vec<Arc<Item>>,
    /// Lookup from case-folded identifier to position in `items`.
    index: HashMap<String, usize>,
    recipes: RecipeBook,
    starting_inventory: Vec<(ItemId, FixedPoint)>,
}

impl Catalog {
    /// Parses the built-in starter catalog.
    ///
    /// # Errors
    ///
    /// Only if the embedded data is broken; see [`Catalog::from_toml_str`].
    pub fn starter() -> EconomyResult<Self> {
        Self::from_toml_str(STARTER_CATALOG)
    }

    /// Loads a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidConfig` if the file cannot be read, plus
    /// everything [`Catalog::from_toml_str`] reports.
    pub fn from_toml_file(path: impl AsRef<Path>) -> EconomyResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EconomyError::InvalidConfig(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "loading catalog");
        Self::from_toml_str(&text)
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for malformed TOML or values (negative amounts,
    ///   unknown fields, empty ids)
    /// - `DuplicateId` for repeated item or recipe ids
    /// - `UnknownItem` for recipe or inventory lines naming undefined items
    /// - `InvalidItem`, `InvalidQuantity`, `InvalidRecipe` for definitions
    ///   that break their invariants
    pub fn from_toml_str(text: &str) -> EconomyResult<Self> {
        let file: CatalogFile =
            toml::from_str(text).map_err(|e| EconomyError::InvalidConfig(e.to_string()))?;

        let mut catalog = Self::default();

        for def in file.items {
            catalog.add_item(build_item(def)?)?;
        }

        for def in file.recipes {
            let result = catalog.quantity(&def.result)?;
            let ingredients = def
                .ingredients
                .iter()
                .map(|i| catalog.quantity(i))
                .collect::<EconomyResult<Vec<_>>>()?;
            let recipe =
                Recipe::new(def.id, def.name, result, ingredients)?.with_starter(def.starter);
            catalog.recipes.add_recipe(recipe)?;
        }

        for line in file.starting_inventory {
            let item = catalog.lookup(&line.item)?;
            if line.amount.is_zero() {
                return Err(EconomyError::InvalidQuantity {
                    item_id: line.item,
                });
            }
            let id = item.id().clone();
            catalog.starting_inventory.push((id, line.amount));
        }

        tracing::info!(
            items = catalog.items.len(),
            recipes = catalog.recipes.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Registers an item.
    ///
    /// Ids are matched ignoring case, the same way [`Inventory`] keys
    /// its stock.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::DuplicateId` if the id is already taken.
    pub fn add_item(&mut self, item: Item) -> EconomyResult<Arc<Item>> {
        let key = fold(item.id().as_str());
        if self.index.contains_key(&key) {
            return Err(EconomyError::DuplicateId {
                kind: "item",
                id: item.id().to_string(),
            });
        }
        let item = Arc::new(item);
        self.index.insert(key, self.items.len());
        self.items.push(Arc::clone(&item));
        Ok(item)
    }

    /// Gets an item by id, ignoring case.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Arc<Item>> {
        self.index.get(&fold(id)).map(|&i| &self.items[i])
    }

    /// Returns the recipes.
    #[must_use]
    pub const fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    /// Builds a fresh inventory holding the starting amounts.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::ArithmeticOverflow` if repeated lines for one
    /// item overflow.
    pub fn seed_inventory(&self) -> EconomyResult<Inventory> {
        let mut inventory = Inventory::new();
        for (id, amount) in &self.starting_inventory {
            inventory.add(id.as_str(), *amount)?;
        }
        Ok(inventory)
    }

    fn lookup(&self, id: &str) -> EconomyResult<&Arc<Item>> {
        self.item(id).ok_or_else(|| EconomyError::UnknownItem(id.to_string()))
    }

    fn quantity(&self, def: &AmountDef) -> EconomyResult<Quantity> {
        let item = self.lookup(&def.item)?;
        Quantity::new(Arc::clone(item), def.amount)
    }
}

fn build_item(def: ItemDef) -> EconomyResult<Item> {
    let item = Item::new(def.id, def.name, def.unit)?
        .with_price(def.price)
        .with_category(def.category)
        .with_rarity(def.rarity)
        .with_description(def.description);

    if def.stackable {
        item.with_max_stack(def.max_stack.unwrap_or(DEFAULT_MAX_STACK))
    } else {
        Ok(item.unstackable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> FixedPoint {
        s.parse().unwrap()
    }

    #[test]
    fn test_starter_catalog_loads() {
        let catalog = Catalog::starter().unwrap();
        let names: Vec<_> = catalog.recipes().iter().map(Recipe::name).collect();
        assert_eq!(names, vec!["Hot Chocolate", "Healing Potion", "Bread"]);

        for recipe in catalog.recipes() {
            assert_eq!(recipe.validate(), Ok(()), "{}", recipe.name());
        }

        let potion = catalog.item("healing_potion").unwrap();
        assert_eq!(potion.rarity(), Rarity::Uncommon);
        assert_eq!(potion.category(), ItemCategory::Consumable);
        assert_eq!(potion.max_stack(), 10);
        assert_eq!(potion.base_price(), amount("25"));
    }

    #[test]
    fn test_starter_seed() {
        let inventory = Catalog::starter().unwrap().seed_inventory().unwrap();
        assert_eq!(inventory.get_amount("milk"), amount("10"));
        assert_eq!(inventory.get_amount("chocolate_chips"), amount("2"));
        assert_eq!(inventory.get_amount("yeast"), amount("0.1"));
    }

    #[test]
    fn test_recipes_share_item_definitions() {
        let catalog = Catalog::starter().unwrap();
        let water = catalog.item("water").unwrap();
        let users = catalog
            .recipes()
            .iter()
            .flat_map(Recipe::ingredients)
            .filter(|i| Arc::ptr_eq(i.item(), water))
            .count();
        assert_eq!(users, 2);
    }

    #[test]
    fn test_unknown_item_reference() {
        let text = r#"
            [[items]]
            id = "milk"
            name = "Milk"

            [[recipes]]
            id = "butter"
            name = "Butter"
            result = { item = "butter", amount = 1 }
            ingredients = [{ item = "milk", amount = 2 }]
        "#;
        let result = Catalog::from_toml_str(text);
        assert_eq!(
            result.unwrap_err(),
            EconomyError::UnknownItem("butter".to_string())
        );
    }

    #[test]
    fn test_duplicate_item_id() {
        let text = r#"
            [[items]]
            id = "milk"
            name = "Milk"

            [[items]]
            id = "milk"
            name = "Goat Milk"
        "#;
        assert!(matches!(
            Catalog::from_toml_str(text),
            Err(EconomyError::DuplicateId { kind: "item", .. })
        ));
    }

    #[test]
    fn test_item_ids_differing_in_case_collide() {
        let text = r#"
            [[items]]
            id = "Milk"
            name = "Cow Milk"

            [[items]]
            id = "milk"
            name = "Goat Milk"
        "#;
        assert_eq!(
            Catalog::from_toml_str(text).unwrap_err(),
            EconomyError::DuplicateId {
                kind: "item",
                id: "milk".to_string(),
            }
        );
    }

    #[test]
    fn test_item_lookup_ignores_case() {
        let text = r#"
            [[items]]
            id = "Milk"
            name = "Milk"

            [[items]]
            id = "butter"
            name = "Butter"

            [[recipes]]
            id = "churn"
            name = "Churn"
            result = { item = "BUTTER", amount = 1 }
            ingredients = [{ item = "milk", amount = 2 }]

            [[starting_inventory]]
            item = "MILK"
            amount = 2
        "#;
        let catalog = Catalog::from_toml_str(text).unwrap();
        let milk = catalog.item("mIlK").unwrap();
        assert_eq!(milk.id().as_str(), "Milk");

        let churn = catalog.recipes().iter().next().unwrap();
        assert!(Arc::ptr_eq(churn.ingredients()[0].item(), milk));

        let mut inventory = catalog.seed_inventory().unwrap();
        assert!(churn.craft(&mut inventory));
        assert_eq!(inventory.get_amount("Milk"), FixedPoint::ZERO);
        assert_eq!(inventory.get_amount("butter"), amount("1"));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let text = r#"
            [[items]]
            id = "milk"
            name = "Milk"

            [[recipes]]
            id = "nothing"
            name = "Nothing"
            result = { item = "milk", amount = 1 }
            ingredients = [{ item = "milk", amount = 0 }]
        "#;
        assert!(matches!(
            Catalog::from_toml_str(text),
            Err(EconomyError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_empty_ingredient_list_rejected() {
        let text = r#"
            [[items]]
            id = "milk"
            name = "Milk"

            [[recipes]]
            id = "free_milk"
            name = "Free Milk"
            result = { item = "milk", amount = 1 }
            ingredients = []
        "#;
        assert!(matches!(
            Catalog::from_toml_str(text),
            Err(EconomyError::InvalidRecipe { .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Catalog::from_toml_str("[[items]]\nid = 3"),
            Err(EconomyError::InvalidConfig(_))
        ));
        assert!(matches!(
            Catalog::from_toml_str("[[items]]\nid = \"a\"\nname = \"A\"\ncolour = \"red\""),
            Err(EconomyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unstackable_item() {
        let text = r#"
            [[items]]
            id = "sword"
            name = "Sword"
            category = "weapon"
            stackable = false
            max_stack = 99
        "#;
        let catalog = Catalog::from_toml_str(text).unwrap();
        let sword = catalog.item("sword").unwrap();
        assert!(!sword.is_stackable());
        assert_eq!(sword.max_stack(), 1);
    }

    #[test]
    fn test_missing_file() {
        let result = Catalog::from_toml_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(EconomyError::InvalidConfig(_))));
    }
}
