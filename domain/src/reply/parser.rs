//! Reply parsing entry point.
//!
//! Turns raw model text into a [`ParsedReply`]: the dialogue stage, any
//! recipe cards, any shopping list, and the cleaned text shown to the user.
//!
//! # Stage selection
//!
//! ```text
//! recipe block accepted?  ── yes ──▶ Recipe   (shopping lists ignored)
//!        │ no
//! headed shopping list?   ── yes ──▶ Grocery  (list removed from text)
//!        │ no
//! implicit bullet list    ── yes ──▶ Grocery  (only if requested or quantities present)
//!        │ no
//!        ▼
//!      Chat
//! ```
//!
//! Parsing never fails: unrecognised text yields [`DialogueStage::Chat`].

use super::cleanup::{remove_lines, split_plating_offer, strip_confirmation_phrases};
use super::grocery::{GroceryListItem, find_headed_list, find_implicit_list};
use super::recipe::{RecipeCard, parse_recipe_cards};
use serde::{Deserialize, Serialize};

/// Classification of a turn's primary output shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogueStage {
    #[default]
    Chat,
    Recipe,
    Grocery,
}

impl DialogueStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueStage::Chat => "chat",
            DialogueStage::Recipe => "recipe",
            DialogueStage::Grocery => "grocery",
        }
    }
}

impl std::fmt::Display for DialogueStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-side signals that influence parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// The user explicitly asked for a shopping list this turn.
    pub grocery_requested: bool,
}

/// Structured view of one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub stage: DialogueStage,
    pub recipe_cards: Vec<RecipeCard>,
    pub grocery_list: Vec<GroceryListItem>,
    /// Reply text for display, with any shopping-list block removed.
    pub reply: String,
    /// Plating offer split off the reply, present only in the recipe stage.
    pub plating_offer: Option<String>,
}

impl ParsedReply {
    /// The first recipe card, for callers that show a single card.
    pub fn recipe_card(&self) -> Option<&RecipeCard> {
        self.recipe_cards.first()
    }

    fn chat(reply: String) -> Self {
        Self {
            stage: DialogueStage::Chat,
            recipe_cards: Vec::new(),
            grocery_list: Vec::new(),
            reply,
            plating_offer: None,
        }
    }
}

/// Parse a raw model reply.
pub fn parse_reply(raw: &str, options: ParseOptions) -> ParsedReply {
    let reply = strip_confirmation_phrases(raw);

    let recipe_cards = parse_recipe_cards(&reply);
    if !recipe_cards.is_empty() {
        let (_, plating_offer) = split_plating_offer(&reply);
        return ParsedReply {
            stage: DialogueStage::Recipe,
            recipe_cards,
            grocery_list: Vec::new(),
            reply,
            plating_offer,
        };
    }

    let lines: Vec<&str> = reply.lines().collect();
    let block = find_headed_list(&lines)
        .or_else(|| find_implicit_list(&lines, options.grocery_requested));

    match block {
        Some(block) => ParsedReply {
            stage: DialogueStage::Grocery,
            recipe_cards: Vec::new(),
            reply: remove_lines(&reply, block.start_line, block.end_line),
            grocery_list: block.items,
            plating_offer: None,
        },
        None => ParsedReply::chat(reply),
    }
}
