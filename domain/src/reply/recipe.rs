//! Recipe card extraction.
//!
//! A recipe block is recognised structurally, one line at a time:
//!
//! ```text
//! **Crispy Aloo Tikki**          <- bold (or heading) name
//! **Serves:** 4                  <- servings line
//! **Ingredients:**               <- ingredients heading
//! - 🥔 4 potatoes                <- bullet items
//! **Steps:**                     <- steps heading
//! 1. Boil the potatoes.          <- numbered items
//! Enjoy your meal! 🍽️            <- optional closing phrase
//! ```
//!
//! A block ends at the next block's name line, at a closing phrase, or at
//! the end of the text. Blocks that yield no ingredient or no step are
//! discarded as false positives.

use super::text::{
    clean_item_line, has_content, starts_with_bullet, strip_bullet_prefix, strip_emoji, strip_markup,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Minimum characters for an ingredient or step line to count.
const MIN_ITEM_LEN: usize = 2;

static SERVES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<before>.*?)\b(?:serves|servings|serving size|yield)\b\s*:?\s*(?P<value>.*)$")
        .expect("Invalid serves regex")
});

static BOLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(?P<inner>[^*]+?)\*\*").expect("Invalid bold regex"));

static HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#{1,6}\s+(?P<inner>.+?)\s*#*\s*$").expect("Invalid heading regex")
});

static INGREDIENTS_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:#{1,6}\s*)?(?:ingredients|what you(?:'ll| will) need)\s*(?:\([^)]*\)\s*)?(?::\s*(?P<rest>.*))?$")
        .expect("Invalid ingredients heading regex")
});

static STEPS_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:#{1,6}\s*)?(?:steps|instructions|directions|method|preparation)\s*(?:\([^)]*\)\s*)?(?::\s*(?P<rest>.*))?$",
    )
    .expect("Invalid steps heading regex")
});

static STEP_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:step\s*)?\d{1,2}\s*[.):\-]\s*").expect("Invalid step number regex")
});

static CLOSING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)enjoy your (?:meal|dish|food)|bon app[eé]tit|want to serve it|would you like[^\n]*plating|caf[eé]-style|thali-style|plating ideas",
    )
    .expect("Invalid closing phrase regex")
});

/// A structured recipe extracted from a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCard {
    pub name: String,
    pub serves: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl RecipeCard {
    /// Render the card as a plain-text document for download.
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("{}\nServes: {}\n\nIngredients:\n", self.name, self.serves);
        for ingredient in &self.ingredients {
            out.push_str(&format!("- {}\n", ingredient));
        }
        out.push_str("\nSteps:\n");
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step));
        }
        out
    }
}

/// Whether a line contains a phrase that closes a recipe block.
pub fn is_closing_line(line: &str) -> bool {
    CLOSING_REGEX.is_match(line)
}

/// A candidate block: where its name and servings lines sit.
struct Candidate {
    name_line: usize,
    serves_line: usize,
    name: String,
    serves: String,
}

/// Extract every accepted recipe card, in textual order.
pub fn parse_recipe_cards(reply: &str) -> Vec<RecipeCard> {
    let lines: Vec<&str> = reply.lines().collect();
    let candidates = find_candidates(&lines);

    let mut cards = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        let next_start = candidates
            .get(i + 1)
            .map(|c| c.name_line)
            .unwrap_or(lines.len());
        let body_end = (candidate.serves_line + 1..next_start)
            .find(|&idx| is_closing_line(lines[idx]))
            .unwrap_or(next_start);

        let body = &lines[candidate.serves_line + 1..body_end];
        let (ingredients, steps) = parse_body(body);

        if ingredients.is_empty() || steps.is_empty() {
            continue;
        }

        cards.push(RecipeCard {
            name: candidate.name.clone(),
            serves: candidate.serves.clone(),
            ingredients,
            steps,
        });
    }
    cards
}

fn find_candidates(lines: &[&str]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(caps) = SERVES_REGEX.captures(line) else {
            continue;
        };
        let before = caps.name("before").map(|m| m.as_str()).unwrap_or("");
        let value = caps.name("value").map(|m| m.as_str()).unwrap_or("");
        let serves = clean_serves(value);
        if serves.is_empty() {
            continue;
        }

        // Name on the same line ("**Dal Tadka** Serves: 4") or on the
        // nearest preceding non-empty line. Any other text before the
        // keyword means this is prose, not a servings line.
        let (name, name_line) = match extract_name(before) {
            Some(name) => (name, idx),
            None if !strip_bullet_prefix(&strip_emoji(&strip_markup(before)))
                .trim()
                .is_empty() =>
            {
                continue;
            }
            None => {
                let Some(prev) = (0..idx).rev().find(|&i| !lines[i].trim().is_empty()) else {
                    continue;
                };
                let Some(name) = extract_name(lines[prev]) else {
                    continue;
                };
                (name, prev)
            }
        };

        // The name must not sit inside the previous candidate's header.
        if candidates
            .last()
            .is_some_and(|last| name_line <= last.serves_line)
        {
            continue;
        }

        candidates.push(Candidate {
            name_line,
            serves_line: idx,
            name,
            serves,
        });
    }
    candidates
}

/// Pull a recipe name out of a bold span or a markdown heading.
fn extract_name(line: &str) -> Option<String> {
    let inner = BOLD_REGEX
        .captures(line)
        .and_then(|c| c.name("inner"))
        .or_else(|| HEADING_REGEX.captures(line).and_then(|c| c.name("inner")))?
        .as_str();

    let name = strip_emoji(&strip_markup(inner));
    let name = name
        .trim()
        .trim_matches(|c: char| c == '[' || c == ']' || c == ':' || c == '#')
        .trim();

    let lower = name.to_lowercase();
    let is_section_word = ["ingredients", "steps", "instructions", "serves", "servings"]
        .iter()
        .any(|w| lower == *w);
    if name.is_empty() || is_section_word {
        None
    } else {
        Some(name.to_string())
    }
}

fn clean_serves(value: &str) -> String {
    strip_emoji(&strip_markup(value))
        .trim()
        .trim_start_matches(':')
        .trim()
        .to_string()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Ingredients,
    Steps,
}

/// Split a block body into cleaned ingredient and step lines.
fn parse_body(body: &[&str]) -> (Vec<String>, Vec<String>) {
    let mut section = Section::Preamble;
    let mut ingredients = Vec::new();
    let mut steps: Vec<String> = Vec::new();
    let mut saw_numbered = false;
    let mut blank_since_step = false;

    for raw in body {
        let unmarked = strip_markup(raw);
        let trimmed = unmarked.trim();

        if trimmed.is_empty() {
            blank_since_step = true;
            continue;
        }

        if !starts_with_bullet(raw) {
            let label = strip_emoji(trimmed);
            let label = label.trim();
            if let Some(caps) = STEPS_HEADING_REGEX.captures(label) {
                section = Section::Steps;
                blank_since_step = false;
                if let Some(rest) = caps.name("rest") {
                    push_step(&mut steps, rest.as_str());
                }
                continue;
            }
            if let Some(caps) = INGREDIENTS_HEADING_REGEX.captures(label) {
                section = Section::Ingredients;
                if let Some(rest) = caps.name("rest") {
                    push_ingredient(&mut ingredients, rest.as_str());
                }
                continue;
            }
        }

        match section {
            Section::Preamble => {}
            Section::Ingredients => push_ingredient(&mut ingredients, raw),
            Section::Steps => {
                if STEP_NUMBER_REGEX.is_match(trimmed) {
                    saw_numbered = true;
                    blank_since_step = false;
                    push_step(&mut steps, trimmed);
                } else if starts_with_bullet(raw) && !saw_numbered {
                    blank_since_step = false;
                    push_step(&mut steps, raw);
                } else if !blank_since_step && !steps.is_empty() {
                    // Wrapped continuation of the previous step.
                    let cleaned = clean_item_line(raw);
                    if let Some(last) = steps.last_mut()
                        && has_content(&cleaned, MIN_ITEM_LEN)
                    {
                        last.push(' ');
                        last.push_str(&cleaned);
                    }
                } else if !steps.is_empty() {
                    // Prose after a paragraph break ends the steps.
                    break;
                }
            }
        }
    }

    (ingredients, steps)
}

fn push_ingredient(ingredients: &mut Vec<String>, raw: &str) {
    let cleaned = clean_item_line(raw);
    if has_content(&cleaned, MIN_ITEM_LEN) {
        ingredients.push(cleaned);
    }
}

fn push_step(steps: &mut Vec<String>, raw: &str) {
    let unmarked = strip_markup(raw);
    let without_number = STEP_NUMBER_REGEX.replace(unmarked.trim(), "");
    let cleaned = clean_item_line(&without_number);
    if has_content(&cleaned, MIN_ITEM_LEN) {
        steps.push(cleaned);
    }
}
