//! Presentation layer for dishmuse
//!
//! This crate contains CLI definitions, output formatters, the progress
//! spinner, the interactive chat REPL and the JSON-lines serving mode.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, Command, OutputFormat};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::{JsonFormatter, OutputFormatter, formatter_for};
pub use progress::reporter::ProgressReporter;
pub use server::stdio::{ServeRequest, StdioServer};
