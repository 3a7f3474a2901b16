//! Phrase-based ingredient tracker.
//!
//! Scans lower-cased user text for every (non-overlapping) availability
//! phrase and applies them left to right, so later phrases override earlier
//! ones within the same message:
//!
//! | Kind | Phrases |
//! |------|---------|
//! | [`MentionKind::Have`] | "i have", "i got" |
//! | [`MentionKind::Missing`] | "i don't have", "i do not have", "i am out of", "i'm out of", "i lack" |
//!
//! The item list following a phrase runs until the next phrase, a sentence
//! break, a clause word like "but", or any character outside
//! letters/digits/spaces/commas/hyphens. It is split on commas and the word
//! "and", and quantity fillers ("some", "lots of") are dropped from each item.

use crate::session::inventory::IngredientInventory;
use regex::Regex;
use std::sync::LazyLock;

static TRIGGER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bi(?:\s+(?P<have>have|got)|\s+(?:don'?t\s+have|do\s+not\s+have|am\s+out\s+of|lack)|'m\s+out\s+of)\b",
    )
    .expect("Invalid ingredient trigger regex")
});

static CLAUSE_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:but|so|though|although|because|except|while|yet|if|which|to)\b")
        .expect("Invalid clause break regex")
});

static FILLER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:so\s+(?:much|many)|some|lots\s+of|a\s+lot\s+of|plenty\s+of)\s+")
        .expect("Invalid filler regex")
});

static ITEM_SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",|\band\b").expect("Invalid item split regex"));

/// Whether a phrase adds to or removes from the user's pantry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKind {
    Have,
    Missing,
}

/// One availability phrase and the items it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientMention {
    pub kind: MentionKind,
    pub items: Vec<String>,
}

/// Find every availability phrase in `text`, in textual order.
pub fn scan_mentions(text: &str) -> Vec<IngredientMention> {
    let lower = text.to_lowercase().replace('\u{2019}', "'");

    let triggers: Vec<_> = TRIGGER_REGEX.captures_iter(&lower).collect();
    let mut mentions = Vec::with_capacity(triggers.len());

    for (i, caps) in triggers.iter().enumerate() {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let kind = if caps.name("have").is_some() {
            MentionKind::Have
        } else {
            MentionKind::Missing
        };

        let list_end = triggers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(lower.len());
        let items = split_items(&lower[whole.end()..list_end]);

        if !items.is_empty() {
            mentions.push(IngredientMention { kind, items });
        }
    }

    mentions
}

/// Cut the raw list at its first terminator and split it into item names.
fn split_items(raw: &str) -> Vec<String> {
    let end = raw
        .find(|c: char| !(c.is_alphanumeric() || c == ' ' || c == ',' || c == '-'))
        .unwrap_or(raw.len());
    let mut list = &raw[..end];

    // A clause word opening the list ("i have so much rice") is not a break.
    let leading = list.len() - list.trim_start().len();
    if let Some(m) = CLAUSE_BREAK_REGEX
        .find_iter(list)
        .find(|m| m.start() > leading)
    {
        list = &list[..m.start()];
    }

    ITEM_SPLIT_REGEX
        .split(list)
        .map(|item| FILLER_REGEX.replace(item.trim(), "").trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Fold mentions into the inventory in order.
pub fn apply_mentions(inventory: &mut IngredientInventory, mentions: &[IngredientMention]) {
    for mention in mentions {
        for item in &mention.items {
            match mention.kind {
                MentionKind::Have => inventory.mark_have(item),
                MentionKind::Missing => inventory.mark_missing(item),
            }
        }
    }
}

/// Scan `text` and update `inventory` in one step.
pub fn track_ingredients(inventory: &mut IngredientInventory, text: &str) {
    apply_mentions(inventory, &scan_mentions(text));
}
