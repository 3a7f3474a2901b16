//! Ingredient tracking from raw user text.
//!
//! - [`tracker::scan_mentions`]: find "I have …" / "I don't have …" phrases
//! - [`tracker::apply_mentions`]: fold them into an [`IngredientInventory`](crate::session::inventory::IngredientInventory)

pub mod tracker;
