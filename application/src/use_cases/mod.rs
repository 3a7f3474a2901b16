//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod filter_vision_labels;
pub mod generate_plating_images;
pub mod handle_turn;
pub(crate) mod shared;
