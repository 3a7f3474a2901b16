use regex::Regex;
use std::sync::LazyLock;

static SHOPPING_LIST_INTENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)shopping\s*list|grocery\s*list|what do i need|make.*list|give me.*list|list please|show.*list",
    )
    .expect("Invalid shopping list intent regex")
});

/// Whether the user is explicitly asking for a shopping list.
pub fn requests_shopping_list(text: &str) -> bool {
    SHOPPING_LIST_INTENT_REGEX.is_match(text) || text.trim().eq_ignore_ascii_case("list")
}
