//! Per-turn prompt composition.
//!
//! The model consumes a single text stream per turn, so the ingredient
//! summary and caller hints are appended to the user text rather than sent
//! as structured fields.

use super::template::SystemPromptTemplate;
use crate::core::string::collapse_whitespace;
use crate::session::entities::Message;
use crate::session::inventory::IngredientInventory;
use crate::turn::request::ControlHints;

const IN_STORE_ONLY_DIRECTIVE: &str =
    "[Do not mention online ordering or delivery services; suggest in-store shopping only.]";
const SHOPPING_LIST_DIRECTIVE: &str =
    "[The user explicitly asked for a shopping list; reply with a plain bulleted shopping list.]";

/// Everything sent to the chat model for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub system: String,
    /// Prior turns, oldest first.
    pub history: Vec<Message>,
    /// The current user turn, enriched.
    pub turn_text: String,
}

impl ComposedPrompt {
    /// History followed by the current turn, ready for a messages API.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = self.history.clone();
        messages.push(Message::user(self.turn_text.clone()));
        messages
    }
}

/// Builds [`ComposedPrompt`]s around a rendered system instruction.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    system: String,
}

impl PromptComposer {
    pub fn new(template: &SystemPromptTemplate, assistant_name: &str) -> Self {
        Self {
            system: template.render(assistant_name),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system
    }

    /// Compose the request for `input`, given the inventory as updated by
    /// this turn.
    pub fn compose(
        &self,
        history: &[Message],
        input: &str,
        inventory: &IngredientInventory,
        hints: &ControlHints,
    ) -> ComposedPrompt {
        let mut turn_text = format!("{}\n\n{}", input.trim_end(), ingredient_summary(inventory));
        for directive in directives(hints) {
            turn_text.push('\n');
            turn_text.push_str(directive);
        }

        ComposedPrompt {
            system: self.system.clone(),
            history: history.to_vec(),
            turn_text,
        }
    }
}

/// Summary of the inventory appended to every user turn.
pub fn ingredient_summary(inventory: &IngredientInventory) -> String {
    let have = if inventory.have().is_empty() {
        "nothing confirmed yet".to_string()
    } else {
        inventory.have().join(", ")
    };
    let missing = if inventory.missing().is_empty() {
        "none detected".to_string()
    } else {
        inventory.missing().join(", ")
    };
    format!("🧾 So far, you have: {have}.\n❌ Missing: {missing}.")
}

/// Canonical sentence for image-derived input.
///
/// Labels are reduced to letters, digits, spaces and hyphens so the
/// ingredient tracker sees every one of them.
pub fn labels_sentence(labels: &[String]) -> String {
    let cleaned: Vec<String> = labels
        .iter()
        .map(|label| {
            let plain: String = label
                .chars()
                .map(|c| if c.is_alphanumeric() || c == '-' { c } else { ' ' })
                .collect();
            collapse_whitespace(&plain)
        })
        .filter(|label| !label.is_empty())
        .collect();
    format!("I have {}", cleaned.join(", "))
}

fn directives(hints: &ControlHints) -> impl Iterator<Item = &'static str> {
    [
        hints.prefer_in_store_only.then_some(IN_STORE_ONLY_DIRECTIVE),
        hints.force_grocery_stage.then_some(SHOPPING_LIST_DIRECTIVE),
    ]
    .into_iter()
    .flatten()
}
