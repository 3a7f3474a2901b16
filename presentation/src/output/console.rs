//! Console output formatter for turn responses

use colored::Colorize;
use dishmuse_domain::{DialogueStage, GroceryListItem, PlatingImage, RecipeCard, TurnResponse};

/// Formats turn responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a complete turn response.
    ///
    /// Recipe text is replaced by its card so it is not shown twice; any
    /// plating offer follows as its own bubble.
    pub fn format_response(response: &TurnResponse) -> String {
        let mut output = String::new();

        match response.stage {
            DialogueStage::Recipe if !response.recipe_cards.is_empty() => {
                for card in &response.recipe_cards {
                    output.push_str(&Self::format_recipe_card(card));
                    output.push('\n');
                }
            }
            DialogueStage::Grocery => {
                if !response.reply.trim().is_empty() {
                    output.push_str(&Self::bubble(&response.reply));
                    output.push('\n');
                }
                output.push_str(&Self::format_grocery_list(&response.grocery_list));
            }
            _ => {
                if !response.reply.trim().is_empty() {
                    output.push_str(&Self::bubble(&response.reply));
                }
            }
        }

        if let Some(offer) = &response.plating_offer {
            output.push('\n');
            output.push_str(&Self::bubble(offer));
        }

        output
    }

    /// Format as JSON
    pub fn format_json(response: &TurnResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_recipe_card(card: &RecipeCard) -> String {
        let mut output = String::new();
        output.push_str(&Self::header(&card.name));
        output.push('\n');
        if !card.serves.is_empty() {
            output.push_str(&format!("{} {}\n", "Serves:".cyan().bold(), card.serves));
        }

        output.push_str(&format!("\n{}\n", "Ingredients".cyan().bold()));
        for item in &card.ingredients {
            output.push_str(&format!("  {} {}\n", "•".yellow(), item));
        }

        output.push_str(&format!("\n{}\n", "Steps".cyan().bold()));
        for (i, step) in card.steps.iter().enumerate() {
            output.push_str(&format!("  {} {}\n", format!("{}.", i + 1).yellow(), step));
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_grocery_list(items: &[GroceryListItem]) -> String {
        let mut output = format!("{}\n", "Shopping List".green().bold());
        for item in items {
            let amount = match (&item.quantity, &item.unit) {
                (Some(q), Some(u)) => format!("{} {} ", q, u),
                (Some(q), None) => format!("{} ", q),
                (None, Some(u)) => format!("{} ", u),
                (None, None) => String::new(),
            };
            let optional = if item.optional {
                format!(" {}", "(optional)".dimmed())
            } else {
                String::new()
            };
            output.push_str(&format!(
                "  {} {}{}{}\n",
                "☐".green(),
                amount.bold(),
                item.name,
                optional
            ));
        }
        output
    }

    pub fn format_inventory(have: &[String], missing: &[String]) -> String {
        let join = |items: &[String], empty: &str| {
            if items.is_empty() {
                empty.dimmed().to_string()
            } else {
                items.join(", ")
            }
        };
        format!(
            "{} {}\n{} {}\n",
            "Have:".green().bold(),
            join(have, "nothing confirmed yet"),
            "Missing:".red().bold(),
            join(missing, "none detected")
        )
    }

    pub fn format_plating_images(images: &[PlatingImage]) -> String {
        if images.is_empty() {
            return format!("{}\n", "No plating images could be generated.".dimmed());
        }
        let mut output = format!("{}\n", "Plating ideas".cyan().bold());
        for image in images {
            output.push_str(&format!(
                "  {} {}\n    {}\n",
                format!("{}.", image.index + 1).yellow(),
                image.section.bold(),
                image.url.underline()
            ));
        }
        output
    }

    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    fn bubble(text: &str) -> String {
        format!("{} {}\n", "DishMuse:".magenta().bold(), text.trim())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(50);
        format!("{}\n{:^50}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(50).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishmuse_domain::SessionKey;

    fn response(stage: DialogueStage) -> TurnResponse {
        TurnResponse {
            session_key: SessionKey::new("s1"),
            stage,
            reply: "Here you go".to_string(),
            recipe_card: None,
            recipe_cards: Vec::new(),
            grocery_list: Vec::new(),
            have_ingredients: Vec::new(),
            missing_ingredients: Vec::new(),
            plating_offer: None,
            dismiss_recipe: false,
        }
    }

    fn card() -> RecipeCard {
        RecipeCard {
            name: "Masala Omelette".to_string(),
            serves: "2".to_string(),
            ingredients: vec!["4 eggs".to_string(), "1 onion".to_string()],
            steps: vec!["Whisk.".to_string(), "Cook.".to_string()],
        }
    }

    #[test]
    fn test_chat_response() {
        let output = ConsoleFormatter::format_response(&response(DialogueStage::Chat));
        assert!(output.contains("Here you go"));
    }

    #[test]
    fn test_recipe_response_shows_card_and_offer() {
        let mut r = response(DialogueStage::Recipe);
        r.reply = "**Masala Omelette** raw text".to_string();
        r.recipe_cards = vec![card()];
        r.recipe_card = Some(card());
        r.plating_offer = Some("Want to serve it café-style?".to_string());

        let output = ConsoleFormatter::format_response(&r);
        assert!(output.contains("Masala Omelette"));
        assert!(output.contains("4 eggs"));
        assert!(output.contains("Cook."));
        assert!(!output.contains("raw text"));
        assert!(output.contains("Want to serve it café-style?"));
    }

    #[test]
    fn test_grocery_list_format() {
        let items = vec![
            GroceryListItem {
                name: "milk".to_string(),
                quantity: Some("1".to_string()),
                unit: Some("bottle".to_string()),
                optional: false,
            },
            GroceryListItem {
                name: "coriander".to_string(),
                quantity: None,
                unit: None,
                optional: true,
            },
        ];
        let output = ConsoleFormatter::format_grocery_list(&items);
        assert!(output.contains("1 bottle"));
        assert!(output.contains("milk"));
        assert!(output.contains("coriander"));
        assert!(output.contains("(optional)"));
    }

    #[test]
    fn test_inventory_fallbacks() {
        let output = ConsoleFormatter::format_inventory(&[], &["salt".to_string()]);
        assert!(output.contains("nothing confirmed yet"));
        assert!(output.contains("salt"));
    }

    #[test]
    fn test_json_output_is_parseable() {
        let json = ConsoleFormatter::format_json(&response(DialogueStage::Grocery));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stage"], "grocery");
    }
}
