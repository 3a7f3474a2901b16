//! Chat model adapters.

pub mod anthropic;

pub use anthropic::AnthropicChatModel;
