//! Fixed instruction templates sent to the chat model.

/// Canned message returned for the "download" control action.
pub const PLATING_OFFER_MESSAGE: &str =
    "Want to serve it café-style or thali-style? I can show you some plating ideas!";

/// Heading the system instruction asks the model to use for shopping lists.
pub const SHOPPING_LIST_HEADING: &str = "Shopping List:";

const ASSISTANT_NAME_PLACEHOLDER: &str = "{assistant_name}";

/// The versioned system instruction.
///
/// The canonical text ships with the crate; deployments may replace it with
/// their own revision loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPromptTemplate {
    version: String,
    text: String,
}

impl SystemPromptTemplate {
    pub const CANONICAL_VERSION: &'static str = "v1";

    /// The built-in template.
    pub fn canonical() -> Self {
        Self {
            version: Self::CANONICAL_VERSION.to_string(),
            text: include_str!("../../prompts/system_v1.md").to_string(),
        }
    }

    /// A template supplied from configuration.
    pub fn from_text(version: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            text: text.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Render the instruction with the assistant's display name.
    pub fn render(&self, assistant_name: &str) -> String {
        self.text
            .replace(ASSISTANT_NAME_PLACEHOLDER, assistant_name)
            .trim_end()
            .to_string()
    }
}

impl Default for SystemPromptTemplate {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Prompt for the vision label filter.
pub fn vision_filter_prompt(raw_labels: &[String]) -> String {
    // A JSON array keeps labels containing commas unambiguous.
    let list = serde_json::to_string(raw_labels).unwrap_or_else(|_| raw_labels.join(", "));
    format!(
        r#"You are a helpful kitchen assistant.

Given a list of words detected in a photo, identify only the actual food ingredients a person might cook with. Ignore anything that is:
- a brand name
- a cuisine
- packaging or label text
- not food (for example "plastic wrap" or "American")

Return only the food items as a single comma-separated list, with no other text.

List:
{list}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_renders_name() {
        let rendered = SystemPromptTemplate::canonical().render("DishMuse");
        assert!(rendered.starts_with("You are DishMuse,"));
        assert!(!rendered.contains(ASSISTANT_NAME_PLACEHOLDER));
    }

    #[test]
    fn test_canonical_carries_formatting_contract() {
        let rendered = SystemPromptTemplate::canonical().render("DishMuse");
        assert!(rendered.contains(SHOPPING_LIST_HEADING));
        assert!(rendered.contains("**Serves:**"));
        assert!(rendered.contains("**Steps:**"));
        assert!(rendered.contains(PLATING_OFFER_MESSAGE));
    }

    #[test]
    fn test_custom_template() {
        let template = SystemPromptTemplate::from_text("custom-2", "Hi, I am {assistant_name}.");
        assert_eq!(template.version(), "custom-2");
        assert_eq!(template.render("Muse"), "Hi, I am Muse.");
    }

    #[test]
    fn test_vision_prompt_lists_labels() {
        let labels = vec!["Coca-Cola".to_string(), "tomato".to_string()];
        let prompt = vision_filter_prompt(&labels);
        assert!(prompt.contains(r#"["Coca-Cola","tomato"]"#));
        assert!(prompt.contains("comma-separated"));
    }
}
