//! Inventory domain module.
//!
//! Store-shelf stock as seen by a DSD vendor, implemented as validated,
//! immutable values (no IO, no HTTP, no storage).

pub mod item;

pub use item::{InventoryItem, NewInventoryItem};
