//! Configuration file loading for dishmuse
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DISHMUSE_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./dishmuse.toml` or `./.dishmuse.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/dishmuse/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAssistantConfig, FileConfig, FileImagesConfig, FileLoggingConfig, FileModelConfig,
    FileOutputConfig, FileSessionConfig, FileVisionConfig,
};
pub use loader::ConfigLoader;
