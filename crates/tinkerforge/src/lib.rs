//! # TINKERFORGE
//!
//! The console front end of the crafting game.
//!
//! ## Modules
//!
//! - `demo`: crafts a catalog's recipes against its starting inventory and
//!   prints the transcript

pub mod demo;

// Re-export the economy
pub use tinkerforge_economy as economy;

pub use demo::{run, Attempt, DemoError, DemoReport};
