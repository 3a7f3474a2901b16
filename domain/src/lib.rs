//! Domain layer for dishmuse
//!
//! This crate contains the recipe assistant's core logic: session state,
//! ingredient tracking, prompt composition and reply parsing.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A conversation keyed by an opaque [`SessionKey`], owning its message
//! history and an [`IngredientInventory`] of disjoint have/missing sets.
//!
//! ## Dialogue stage
//!
//! Every model reply is classified as exactly one [`DialogueStage`]:
//!
//! - **Chat**: free text, no structured payload
//! - **Recipe**: one or more [`RecipeCard`]s (takes precedence)
//! - **Grocery**: a shopping list of [`GroceryListItem`]s

pub mod config;
pub mod core;
pub mod ingredient;
pub mod plating;
pub mod prompt;
pub mod reply;
pub mod session;
pub mod turn;
pub mod vision;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use ingredient::tracker::{IngredientMention, MentionKind, scan_mentions, track_ingredients};
pub use plating::{PlatingIdea, PlatingImage, parse_plating_ideas};
pub use prompt::{
    ComposedPrompt, PLATING_OFFER_MESSAGE, PromptComposer, SystemPromptTemplate,
    ingredient_summary, labels_sentence, vision_filter_prompt,
};
pub use reply::{
    cleanup::split_plating_offer,
    grocery::GroceryListItem,
    parser::{DialogueStage, ParseOptions, ParsedReply, parse_reply},
    recipe::RecipeCard,
};
pub use session::{
    entities::{Message, Role, Session, SessionFlags},
    inventory::IngredientInventory,
    key::SessionKey,
};
pub use turn::{
    ControlAction, ControlHints, TurnKind, TurnRequest, TurnResponse, requests_shopping_list,
};
pub use vision::{VisionFilterRequest, VisionFilterResponse, parse_label_list};
