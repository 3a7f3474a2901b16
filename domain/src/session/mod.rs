//! Conversation session domain.
//!
//! - [`entities::Session`]: history, ingredient inventory and flags for one conversation
//! - [`entities::Message`]: a single turn within a session
//! - [`inventory::IngredientInventory`]: the mutually exclusive have/missing sets
//! - [`key::SessionKey`]: opaque session identifier

pub mod entities;
pub mod inventory;
pub mod key;
