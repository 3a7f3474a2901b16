//! Prompt domain
//!
//! The versioned system instruction and the per-turn text composer.

pub mod composer;
mod template;

pub use composer::{PromptComposer, ComposedPrompt, ingredient_summary, labels_sentence};
pub use template::{
    PLATING_OFFER_MESSAGE, SHOPPING_LIST_HEADING, SystemPromptTemplate, vision_filter_prompt,
};
