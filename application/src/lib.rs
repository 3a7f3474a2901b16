//! Application layer for dishmuse
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    chat_model::{ChatModel, ChatModelError, ChatRequest},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    image_generator::{ImageGenerationError, ImageGenerator, NoImageGenerator},
    session_store::{SessionGuard, SessionStore},
};
pub use use_cases::filter_vision_labels::{FilterVisionLabelsUseCase, VisionFilterError};
pub use use_cases::generate_plating_images::GeneratePlatingImagesUseCase;
pub use use_cases::handle_turn::{HandleTurnUseCase, TurnError};
