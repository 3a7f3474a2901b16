//! Outbound turn responses.

use crate::reply::grocery::GroceryListItem;
use crate::reply::parser::{DialogueStage, ParsedReply};
use crate::reply::recipe::RecipeCard;
use crate::session::inventory::IngredientInventory;
use crate::session::key::SessionKey;
use serde::{Deserialize, Serialize};

/// The structured payload returned for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub session_key: SessionKey,
    pub stage: DialogueStage,
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_card: Option<RecipeCard>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipe_cards: Vec<RecipeCard>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grocery_list: Vec<GroceryListItem>,
    pub have_ingredients: Vec<String>,
    pub missing_ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plating_offer: Option<String>,
    /// Tells the client to put away the recipe it is showing.
    #[serde(default)]
    pub dismiss_recipe: bool,
}

impl TurnResponse {
    pub fn from_parsed(
        session_key: SessionKey,
        parsed: ParsedReply,
        inventory: &IngredientInventory,
    ) -> Self {
        Self {
            session_key,
            stage: parsed.stage,
            recipe_card: parsed.recipe_cards.first().cloned(),
            recipe_cards: parsed.recipe_cards,
            grocery_list: parsed.grocery_list,
            reply: parsed.reply,
            have_ingredients: inventory.have().to_vec(),
            missing_ingredients: inventory.missing().to_vec(),
            plating_offer: parsed.plating_offer,
            dismiss_recipe: false,
        }
    }

    /// Response for a control action: chat stage, no structured payload.
    pub fn for_action(
        session_key: SessionKey,
        reply: impl Into<String>,
        inventory: &IngredientInventory,
        dismiss_recipe: bool,
    ) -> Self {
        Self {
            session_key,
            stage: DialogueStage::Chat,
            reply: reply.into(),
            recipe_card: None,
            recipe_cards: Vec::new(),
            grocery_list: Vec::new(),
            have_ingredients: inventory.have().to_vec(),
            missing_ingredients: inventory.missing().to_vec(),
            plating_offer: None,
            dismiss_recipe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::parser::{ParseOptions, parse_reply};

    #[test]
    fn test_chat_response_shape() {
        let mut inventory = IngredientInventory::default();
        inventory.mark_have("rice");
        let parsed = parse_reply("What cuisine do you like?", ParseOptions::default());
        let response = TurnResponse::from_parsed(SessionKey::new("s1"), parsed, &inventory);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["sessionKey"], "s1");
        assert_eq!(json["stage"], "chat");
        assert_eq!(json["haveIngredients"][0], "rice");
        assert!(json.get("recipeCard").is_none());
        assert!(json.get("groceryList").is_none());
        assert_eq!(json["dismissRecipe"], false);
    }

    #[test]
    fn test_action_response() {
        let response = TurnResponse::for_action(
            SessionKey::new("s1"),
            "",
            &IngredientInventory::default(),
            true,
        );
        assert_eq!(response.stage, DialogueStage::Chat);
        assert!(response.reply.is_empty());
        assert!(response.dismiss_recipe);
    }
}
