//! # Crafting System
//!
//! **Transactional Recipes**
//!
//! A [`Recipe`] turns an ordered list of ingredients into one product:
//!
//! 1. **Transactional**: crafting is atomic - every ingredient consumed and
//!    the product added, OR nothing happens
//! 2. **Expected failure**: lacking ingredients is a `false`, not an error
//! 3. **Immutable recipes**: crafting only ever mutates the inventory
//!
//! ## Example
//!
//! ```rust,ignore
//! let cocoa = Recipe::new(id, "Hot Chocolate", product, vec![milk_4, chips_half])?;
//!
//! if cocoa.can_craft(&inventory) {
//!     assert!(cocoa.craft(&mut inventory));
//! }
//! ```

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::error::{EconomyError, EconomyResult};
use crate::fixed_point::FixedPoint;
use crate::identifier::{Identified, ItemId, RecipeId};
use crate::inventory::Inventory;
use crate::quantity::{Ingredient, Product};

/// A crafting recipe.
///
/// Equality and hashing use the identifier only.
#[derive(Clone, Debug)]
pub struct Recipe {
    id: RecipeId,
    name: String,
    result: Product,
    ingredients: Vec<Ingredient>,
    starter: bool,
}

/// An ingredient the inventory cannot cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortfall {
    /// The missing item.
    pub item_id: ItemId,
    /// Amount the recipe consumes.
    pub required: FixedPoint,
    /// Amount currently held.
    pub available: FixedPoint,
}

/// Checks the recipe invariants, reporting the first violation.
fn check_parts(name: &str, ingredients: &[Ingredient]) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("recipe must have a name".to_string());
    }
    if ingredients.is_empty() {
        return Err("recipe must have at least one ingredient".to_string());
    }
    if let Some(zero) = ingredients.iter().find(|i| i.amount().is_zero()) {
        return Err(format!("ingredient {} must have a positive amount", zero.item_id()));
    }
    Ok(())
}

impl Recipe {
    /// Creates a new recipe with basic validation.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::InvalidRecipe` if the name is empty or there
    /// are no ingredients.
    pub fn new(
        id: RecipeId,
        name: impl Into<String>,
        result: Product,
        ingredients: Vec<Ingredient>,
    ) -> EconomyResult<Self> {
        let name = name.into();
        check_parts(&name, &ingredients).map_err(|reason| EconomyError::InvalidRecipe {
            recipe: id.to_string(),
            reason,
        })?;

        Ok(Self {
            id,
            name,
            result,
            ingredients,
            starter: false,
        })
    }

    /// Marks the recipe as known from the start.
    #[must_use]
    pub const fn with_starter(mut self, starter: bool) -> Self {
        self.starter = starter;
        self
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the product.
    #[must_use]
    pub const fn result(&self) -> &Product {
        &self.result
    }

    /// Returns the ingredients in declaration order.
    #[must_use]
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Whether the recipe is known from the start. Cosmetic.
    #[must_use]
    pub const fn is_starter(&self) -> bool {
        self.starter
    }

    /// Re-checks the recipe invariants.
    ///
    /// Independent of crafting; [`Recipe::craft`] does not call it.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason for the first failure found.
    pub fn validate(&self) -> Result<(), String> {
        check_parts(&self.name, &self.ingredients)?;
        if self.result.amount().is_zero() {
            return Err("result must have a positive amount".to_string());
        }
        Ok(())
    }

    /// Checks if every ingredient is held in sufficient amount.
    #[must_use]
    pub fn can_craft(&self, inventory: &Inventory) -> bool {
        self.ingredients
            .iter()
            .all(|i| inventory.has(i.item_id().as_str(), i.amount()))
    }

    /// Lists the ingredients the inventory cannot cover.
    #[must_use]
    pub fn shortfalls(&self, inventory: &Inventory) -> Vec<Shortfall> {
        self.ingredients
            .iter()
            .filter_map(|i| {
                let available = inventory.get_amount(i.item_id().as_str());
                (available < i.amount()).then(|| Shortfall {
                    item_id: i.item_id().clone(),
                    required: i.amount(),
                    available,
                })
            })
            .collect()
    }

    /// Performs a transactional craft operation.
    ///
    /// **ATOMIC**: Either every ingredient is consumed and the product
    /// added, or the inventory is left exactly as it was.
    ///
    /// Returns `false` if ingredients are missing, or if the product would
    /// overflow the inventory (rolled back).
    pub fn craft(&self, inventory: &mut Inventory) -> bool {
        if !self.can_craft(inventory) {
            tracing::debug!(recipe = %self.id, "craft refused: insufficient ingredients");
            return false;
        }

        // Take snapshot for rollback
        let snapshot = inventory.snapshot();

        for ingredient in &self.ingredients {
            if !inventory.remove(ingredient.item_id().as_str(), ingredient.amount()) {
                // Two ingredients naming the same item can pass the check
                // individually and still not both fit.
                tracing::warn!(
                    recipe = %self.id,
                    item = %ingredient.item_id(),
                    "rolling back craft"
                );
                inventory.restore(&snapshot);
                return false;
            }
        }

        if let Err(e) = inventory.add(self.result.item_id().as_str(), self.result.amount()) {
            tracing::warn!(recipe = %self.id, error = %e, "rolling back craft");
            inventory.restore(&snapshot);
            return false;
        }

        tracing::debug!(
            recipe = %self.id,
            product = %self.result.item_id(),
            amount = %self.result.amount(),
            "crafted"
        );
        true
    }

    /// `"{Name} → {result} (needs {ingredients})"`.
    #[must_use]
    pub fn describe(&self) -> String {
        let needs = self
            .ingredients
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} → {} (needs {needs})", self.name, self.result)
    }
}

impl Identified for Recipe {
    type Id = RecipeId;

    #[inline]
    fn id(&self) -> &RecipeId {
        &self.id
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An ordered collection of recipes with lookup by identifier.
#[derive(Clone, Debug, Default)]
pub struct RecipeBook {
    /// Recipes in insertion order.
    recipes: Vec<Recipe>,
    /// Position of each recipe in `recipes`.
    index: HashMap<RecipeId, usize>,
}

impl RecipeBook {
    /// Creates an empty recipe book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::DuplicateId` if the recipe ID already exists.
    pub fn add_recipe(&mut self, recipe: Recipe) -> EconomyResult<()> {
        if self.index.contains_key(recipe.id()) {
            return Err(EconomyError::DuplicateId {
                kind: "recipe",
                id: recipe.id().to_string(),
            });
        }
        self.index.insert(recipe.id().clone(), self.recipes.len());
        self.recipes.push(recipe);
        Ok(())
    }

    /// Gets a recipe by ID.
    #[must_use]
    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.index.get(id).map(|&i| &self.recipes[i])
    }

    /// Iterates recipes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    /// Recipes flagged as starters.
    pub fn starters(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(|r| r.is_starter())
    }

    /// Returns the number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// True if the book holds no recipes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecipeBook {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::quantity::Quantity;
    use std::sync::Arc;

    fn amount(s: &str) -> FixedPoint {
        s.parse().unwrap()
    }

    fn item(id: &str, name: &str, unit: &str) -> Arc<Item> {
        Arc::new(Item::new(ItemId::new(id).unwrap(), name, unit).unwrap())
    }

    fn qty(item: &Arc<Item>, a: &str) -> Quantity {
        Quantity::new(Arc::clone(item), amount(a)).unwrap()
    }

    fn hot_chocolate() -> Recipe {
        let milk = item("milk", "Milk", "L");
        let chips = item("chocolate_chips", "Chocolate Chips", "kg");
        let cocoa = item("hot_chocolate", "Hot Chocolate", "cups");
        Recipe::new(
            RecipeId::new("hot_chocolate").unwrap(),
            "Hot Chocolate",
            qty(&cocoa, "12"),
            vec![qty(&milk, "4"), qty(&chips, "0.5")],
        )
        .unwrap()
    }

    #[test]
    fn test_construction_rejects_empty_name() {
        let milk = item("milk", "Milk", "L");
        let result = Recipe::new(
            RecipeId::new("r").unwrap(),
            "",
            qty(&milk, "1"),
            vec![qty(&milk, "1")],
        );
        assert!(matches!(result, Err(EconomyError::InvalidRecipe { .. })));
    }

    #[test]
    fn test_construction_rejects_no_ingredients() {
        let milk = item("milk", "Milk", "L");
        let result = Recipe::new(RecipeId::new("r").unwrap(), "Nothing", qty(&milk, "1"), vec![]);
        match result {
            Err(EconomyError::InvalidRecipe { recipe, reason }) => {
                assert_eq!(recipe, "r");
                assert!(reason.contains("at least one ingredient"));
            }
            other => panic!("expected InvalidRecipe, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_passes_for_constructed_recipe() {
        assert_eq!(hot_chocolate().validate(), Ok(()));
    }

    #[test]
    fn test_transactional_craft_success() {
        let recipe = hot_chocolate();
        let mut inventory = Inventory::new();
        inventory.add("milk", amount("10")).unwrap();
        inventory.add("chocolate_chips", amount("2")).unwrap();

        assert!(recipe.can_craft(&inventory));
        assert!(recipe.craft(&mut inventory));

        assert_eq!(inventory.get_amount("milk"), amount("6"));
        assert_eq!(inventory.get_amount("chocolate_chips"), amount("1.5"));
        assert_eq!(inventory.get_amount("hot_chocolate"), amount("12"));
    }

    #[test]
    fn test_transactional_craft_refused() {
        let recipe = hot_chocolate();
        let mut inventory = Inventory::new();
        inventory.add("milk", amount("3")).unwrap(); // Need 4!
        inventory.add("chocolate_chips", amount("5")).unwrap();
        let before = inventory.clone();

        assert!(!recipe.can_craft(&inventory));
        assert!(!recipe.craft(&mut inventory));
        assert_eq!(inventory, before);
    }

    #[test]
    fn test_repeated_ingredient_rolls_back() {
        let salt = item("salt", "Salt", "g");
        let brine = item("brine", "Brine", "L");
        let recipe = Recipe::new(
            RecipeId::new("brine").unwrap(),
            "Brine",
            qty(&brine, "1"),
            vec![qty(&salt, "3"), qty(&salt, "3")],
        )
        .unwrap();

        let mut inventory = Inventory::new();
        inventory.add("salt", amount("4")).unwrap();
        let before = inventory.clone();

        assert!(recipe.can_craft(&inventory), "each line alone is covered");
        assert!(!recipe.craft(&mut inventory));
        assert_eq!(inventory, before);
    }

    #[test]
    fn test_product_overflow_rolls_back() {
        let recipe = hot_chocolate();
        let mut inventory = Inventory::new();
        inventory.add("milk", amount("4")).unwrap();
        inventory.add("chocolate_chips", amount("0.5")).unwrap();
        inventory.add("hot_chocolate", FixedPoint::MAX).unwrap();
        let before = inventory.clone();

        assert!(!recipe.craft(&mut inventory));
        assert_eq!(inventory, before);
    }

    #[test]
    fn test_shortfalls() {
        let recipe = hot_chocolate();
        let mut inventory = Inventory::new();
        inventory.add("milk", amount("10")).unwrap();
        inventory.add("chocolate_chips", amount("0.25")).unwrap();

        let short = recipe.shortfalls(&inventory);
        assert_eq!(
            short,
            vec![Shortfall {
                item_id: ItemId::new("chocolate_chips").unwrap(),
                required: amount("0.5"),
                available: amount("0.25"),
            }]
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            hot_chocolate().describe(),
            "Hot Chocolate → 12 cups Hot Chocolate (needs 4 L Milk, 0.5 kg Chocolate Chips)"
        );
    }

    #[test]
    fn test_recipe_book_rejects_duplicates() {
        let mut book = RecipeBook::new();
        book.add_recipe(hot_chocolate().with_starter(true)).unwrap();
        let result = book.add_recipe(hot_chocolate());
        assert!(matches!(result, Err(EconomyError::DuplicateId { kind: "recipe", .. })));

        assert_eq!(book.len(), 1);
        assert_eq!(book.starters().count(), 1);
        let id = RecipeId::new("hot_chocolate").unwrap();
        assert_eq!(book.get(&id).map(Recipe::name), Some("Hot Chocolate"));
    }
}
