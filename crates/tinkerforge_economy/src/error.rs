//! # Economy Error Types
//!
//! Construction-time and configuration errors for the crafting economy.
//!
//! Running out of ingredients is not an error: crafting and removal report it
//! as `false`. Everything in here means the data handed to a constructor was
//! wrong.

use thiserror::Error;

/// Errors that can occur in the economy system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// An item definition violated one of its invariants.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// A quantity was built with a non-positive amount.
    #[error("invalid quantity of {item_id}: amount must be greater than zero")]
    InvalidQuantity {
        /// The item the quantity refers to.
        item_id: String,
    },

    /// A recipe definition violated one of its invariants.
    #[error("invalid recipe {recipe}: {reason}")]
    InvalidRecipe {
        /// Name or identifier of the offending recipe.
        recipe: String,
        /// First failure found.
        reason: String,
    },

    /// Discount percentage outside of `[0, 100]`.
    #[error("discount must be between 0 and 100 percent, got {0}")]
    InvalidDiscount(String),

    /// Inventory mutation with an empty identifier or a non-positive amount.
    #[error("invalid inventory amount for {item_id:?}: {reason}")]
    InvalidAmount {
        /// The item identifier as given by the caller.
        item_id: String,
        /// What was wrong with the request.
        reason: &'static str,
    },

    /// Arithmetic overflow in fixed-point calculation.
    #[error("arithmetic overflow in economic calculation")]
    ArithmeticOverflow,

    /// Two definitions share an identifier.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// `"item"` or `"recipe"`.
        kind: &'static str,
        /// The repeated identifier.
        id: String,
    },

    /// A recipe or seed entry refers to an item the catalog does not define.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;
