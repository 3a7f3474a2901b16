//! Infrastructure layer for dishmuse
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod images;
pub mod logging;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileAssistantConfig, FileConfig, FileImagesConfig, FileLoggingConfig,
    FileModelConfig, FileOutputConfig, FileSessionConfig, FileVisionConfig,
};
pub use images::FireflyImageGenerator;
pub use logging::JsonlConversationLogger;
pub use providers::AnthropicChatModel;
pub use session::InMemorySessionStore;
