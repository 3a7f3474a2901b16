//! Reply parsing: structured data out of free-form model text.
//!
//! - [`parser::parse_reply`]: single entry point, picks the [`parser::DialogueStage`]
//! - [`recipe`]: recipe card blocks
//! - [`grocery`]: shopping-list blocks and item normalization
//! - [`cleanup`]: confirmation stripping, plating-offer split

pub mod cleanup;
pub mod grocery;
pub mod parser;
pub mod recipe;
mod text;
