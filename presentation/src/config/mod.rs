//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show a spinner while waiting for the model
    pub show_progress: bool,
    /// Path to history file; defaults to the user data directory
    pub history_file: Option<PathBuf>,
    /// Start with the in-store-only hint enabled
    pub prefer_in_store_only: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            prefer_in_store_only: false,
        }
    }
}

impl ReplConfig {
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("dishmuse").join("history.txt")))
    }
}
