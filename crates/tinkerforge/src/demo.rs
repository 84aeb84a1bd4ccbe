//! # Crafting Demo
//!
//! Crafts every recipe of a catalog, in order, against the catalog's
//! starting inventory, and writes the transcript:
//!
//! ```text
//! Hot Chocolate → 12 cups Hot Chocolate (needs 4 L Milk, 0.5 kg Chocolate Chips)
//! ...
//!
//! Attempting to craft: Hot Chocolate
//!   SUCCESS – you now have 12 cups Hot Chocolate
//! Attempting to craft: Healing Potion
//!   FAILED – insufficient ingredients
//!
//! Final inventory:
//! bread: 1
//! ...
//! ```

use std::io::{self, Write};

use tinkerforge_economy::{Catalog, EconomyResult, Inventory, Recipe};

/// Outcome of one craft attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    /// Recipe name.
    pub recipe: String,
    /// Whether the craft went through.
    pub crafted: bool,
}

/// Everything the demo produced.
#[derive(Debug)]
pub struct DemoReport {
    /// One entry per recipe, in catalog order.
    pub attempts: Vec<Attempt>,
    /// Inventory after the last attempt.
    pub inventory: Inventory,
}

/// Errors from a demo run.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// The catalog could not seed an inventory.
    #[error(transparent)]
    Economy(#[from] tinkerforge_economy::EconomyError),
    /// Writing the transcript failed.
    #[error("failed to write transcript: {0}")]
    Io(#[from] io::Error),
}

/// Runs the demo and writes the transcript to `out`.
///
/// # Errors
///
/// Returns [`DemoError`] if the starting inventory is invalid or `out`
/// fails.
pub fn run(catalog: &Catalog, out: &mut impl Write) -> Result<DemoReport, DemoError> {
    let mut inventory = seed(catalog)?;

    for recipe in catalog.recipes() {
        writeln!(out, "{}", recipe.describe())?;
    }
    writeln!(out)?;

    let mut attempts = Vec::with_capacity(catalog.recipes().len());
    for recipe in catalog.recipes() {
        let crafted = attempt(recipe, &mut inventory, out)?;
        attempts.push(Attempt {
            recipe: recipe.name().to_string(),
            crafted,
        });
    }
    writeln!(out)?;

    writeln!(out, "Final inventory:")?;
    for (item_id, amount) in inventory.entries() {
        writeln!(out, "{item_id}: {amount}")?;
    }

    Ok(DemoReport { attempts, inventory })
}

fn seed(catalog: &Catalog) -> EconomyResult<Inventory> {
    let inventory = catalog.seed_inventory()?;
    tracing::debug!(entries = inventory.len(), "inventory seeded");
    Ok(inventory)
}

fn attempt(recipe: &Recipe, inventory: &mut Inventory, out: &mut impl Write) -> io::Result<bool> {
    writeln!(out, "Attempting to craft: {}", recipe.name())?;

    // Read before crafting; a successful craft may consume the evidence.
    let shortfalls = recipe.shortfalls(inventory);

    if recipe.craft(inventory) {
        let item = recipe.result().item();
        let held = inventory.get_amount(recipe.result().item_id().as_str());
        if item.unit().is_empty() {
            writeln!(out, "  SUCCESS – you now have {held} {}", item.name())?;
        } else {
            writeln!(out, "  SUCCESS – you now have {held} {} {}", item.unit(), item.name())?;
        }
        Ok(true)
    } else {
        for s in &shortfalls {
            tracing::info!(
                recipe = recipe.name(),
                item = %s.item_id,
                required = %s.required,
                available = %s.available,
                "missing ingredient"
            );
        }
        writeln!(out, "  FAILED – insufficient ingredients")?;
        Ok(false)
    }
}
