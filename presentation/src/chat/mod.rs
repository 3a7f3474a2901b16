//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for DishMuse.

mod repl;

pub use repl::{ChatRepl, ReplCommand, parse_command, recipe_file_name};
