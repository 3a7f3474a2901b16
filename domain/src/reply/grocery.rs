//! Shopping-list extraction.
//!
//! Two detection paths, tried in order:
//!
//! 1. **Heading**: a line labelled "Shopping list" / "Grocery list" (bold,
//!    markdown heading, or ending in a colon), followed by its item lines up
//!    to the next heading or the first prose paragraph.
//! 2. **Implicit**: the first run of at least [`MIN_IMPLICIT_ITEMS`]
//!    consecutive bullet lines. Only promoted when the caller asked for a
//!    list or the lines carry quantity-like tokens.
//!
//! Each item line is normalized into a [`GroceryListItem`].

use super::text::{clean_item_line, has_content, starts_with_bullet, strip_markup};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Minimum bullet-run length for the implicit list fallback.
pub const MIN_IMPLICIT_ITEMS: usize = 3;

const UNITS_RAW: &[&str] = &[
    "boxes", "box", "bunches", "bunch", "bottles", "bottle", "cans", "can", "jars", "jar",
    "bags", "bag", "packs", "pack", "packages", "package", "packets", "packet", "cartons",
    "carton", "dozen", "loaves", "loaf", "heads", "head", "cloves", "clove", "pieces", "piece",
    "sticks", "stick", "slices", "slice", "tubs", "tub", "blocks", "block", "kilograms",
    "kilogram", "kg", "grams", "gram", "g", "pounds", "pound", "lbs", "lb", "ounces", "ounce",
    "oz", "litres", "litre", "liters", "liter", "l", "ml", "cups", "cup", "tablespoons",
    "tablespoon", "tbsp", "teaspoons", "teaspoon", "tsp", "pinch", "handful",
];

/// Units sorted longest first so "bottles" wins over "bottle".
static UNIT_PATTERN: LazyLock<String> = LazyLock::new(|| {
    let mut units = UNITS_RAW.to_vec();
    units.sort_by(|a, b| b.len().cmp(&a.len()));
    units.join("|")
});

const QUANTITY_PATTERN: &str =
    r"\d+\s+\d+/\d+|\d+\s*/\s*\d+|\d+(?:[.,]\d+)?|[½⅓⅔¼¾⅛]|a dozen\b|half an?\b";

static LEADING_QUANTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<qty>{QUANTITY_PATTERN})\s*(?:x\s+)?(?:(?P<unit>{})\b\.?\s*(?:of\s+)?)?(?P<name>.*)$",
        UNIT_PATTERN.as_str()
    ))
    .expect("Invalid leading quantity regex")
});

static TRAILING_QUANTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<name>.*?)\s*(?:\(\s*(?P<qty>{QUANTITY_PATTERN})\s*(?P<unit>{units})?\.?\s*\)|[-:–]\s*(?P<qty2>{QUANTITY_PATTERN})\s*(?P<unit2>{units})?\.?|\bx\s*(?P<qty3>\d+))\s*$",
        units = UNIT_PATTERN.as_str()
    ))
    .expect("Invalid trailing quantity regex")
});

static OPTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*optional\s*\)|\boptional\b\s*[:,\-]?").expect("Invalid optional regex")
});

/// Digits, vulgar fractions, or a unit word introduced by an article or a
/// number word ("a can of", "two bunches"). Bare unit words such as "can"
/// or "head" are ordinary English and do not count.
static QUANTITY_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let word_units: Vec<&str> = UNITS_RAW.iter().copied().filter(|u| u.len() > 1).collect();
    Regex::new(&format!(
        r"(?i)\d|[½⅓⅔¼¾⅛]|\b(?:a|an|one|two|three|four|five|six|half\s+an?|a\s+few|a\s+couple\s+of)\s+(?:{})\b",
        word_units.join("|")
    ))
    .expect("Invalid quantity token regex")
});

/// Section labels that end a shopping list rather than group its items.
const NON_CATEGORY_LABELS: &[&str] = &[
    "note", "notes", "tip", "tips", "steps", "instructions", "directions", "method", "serves",
    "servings", "recipe", "total", "budget",
];

static LIST_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[.)]\s+").expect("Invalid list number regex"));

static LIST_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:shopping|grocery|groceries)(?:\s+list)?\b").expect("Invalid list heading regex")
});

/// A single shopping-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryListItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub optional: bool,
}

impl GroceryListItem {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
            optional: false,
        }
    }
}

/// A shopping list found in the reply, with the line range it occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryBlock {
    /// First line of the block (the heading, for headed lists).
    pub start_line: usize,
    /// One past the last item line.
    pub end_line: usize,
    pub items: Vec<GroceryListItem>,
}

/// Parse one list line into a [`GroceryListItem`]. Returns `None` for noise.
pub fn parse_grocery_item(line: &str) -> Option<GroceryListItem> {
    let cleaned = clean_item_line(line);
    let optional = OPTIONAL_REGEX.is_match(&cleaned);
    let cleaned = crate::core::string::collapse_whitespace(&OPTIONAL_REGEX.replace_all(&cleaned, " "));

    let mut item = GroceryListItem::named(cleaned.clone());
    item.optional = optional;

    if let Some(caps) = LEADING_QUANTITY_REGEX.captures(&cleaned)
        && let Some(name) = caps.name("name").filter(|n| has_content(n.as_str(), 2))
    {
        item.name = name.as_str().to_string();
        item.quantity = caps.name("qty").map(|m| m.as_str().to_string());
        item.unit = caps.name("unit").map(|m| m.as_str().to_lowercase());
    } else if let Some(caps) = TRAILING_QUANTITY_REGEX.captures(&cleaned)
        && let Some(name) = caps.name("name").filter(|n| has_content(n.as_str(), 2))
    {
        item.name = name.as_str().to_string();
        item.quantity = caps
            .name("qty")
            .or_else(|| caps.name("qty2"))
            .or_else(|| caps.name("qty3"))
            .map(|m| m.as_str().to_string());
        item.unit = caps
            .name("unit")
            .or_else(|| caps.name("unit2"))
            .map(|m| m.as_str().to_lowercase());
    }

    item.name = item
        .name
        .trim()
        .trim_end_matches([':', ',', '-', '.', ';'])
        .trim()
        .to_string();

    if has_content(&item.name, 2) {
        Some(item)
    } else {
        None
    }
}

/// Whether the line contains digits or unit words.
pub fn has_quantity_token(line: &str) -> bool {
    QUANTITY_TOKEN_REGEX.is_match(line)
}

/// Whether a line is a shopping-list heading.
fn is_list_heading(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || starts_with_bullet(trimmed) {
        return false;
    }
    let plain = strip_markup(trimmed);
    let plain = plain.trim();
    if plain.chars().count() > 80 || !LIST_HEADING_REGEX.is_match(plain) {
        return false;
    }
    let lower = plain.to_lowercase();
    let names_list = lower.contains("list") || lower.ends_with("groceries:");
    let shaped_like_heading =
        trimmed.starts_with('#') || trimmed.starts_with("**") || plain.ends_with(':');
    names_list && shaped_like_heading
}

/// Whether a line starts a new section (ends a headed list).
fn is_section_heading(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.starts_with('#') {
        return true;
    }
    let bold_only = trimmed.starts_with("**") && trimmed.ends_with("**") && trimmed.len() > 4;
    bold_only || (!starts_with_bullet(trimmed) && strip_markup(trimmed).trim_end().ends_with(':'))
}

/// Whether a section heading inside a shopping list is a category label
/// (`**Produce:**`, `Dairy:`) whose items continue the list.
fn is_category_label(lines: &[&str], idx: usize) -> bool {
    let trimmed = lines[idx].trim();
    if trimmed.starts_with('#') || is_list_heading(trimmed) {
        return false;
    }
    let plain = strip_markup(trimmed);
    let label = plain.trim().trim_end_matches(':').trim().to_lowercase();
    if label.is_empty() || label.chars().count() > 40 || NON_CATEGORY_LABELS.contains(&label.as_str())
    {
        return false;
    }
    lines[idx + 1..]
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .is_some_and(|next| starts_with_bullet(next) || LIST_NUMBER_REGEX.is_match(next))
}

/// Locate a shopping list introduced by a dedicated heading.
///
/// Category subheadings directly under the heading are absorbed into the
/// block; their items are collected in order.
pub fn find_headed_list(lines: &[&str]) -> Option<GroceryBlock> {
    let heading = lines.iter().position(|l| is_list_heading(l))?;

    let mut items = Vec::new();
    let mut end_line = heading + 1;
    let mut blank_seen = false;

    for (idx, line) in lines.iter().enumerate().skip(heading + 1) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            blank_seen = true;
            continue;
        }
        if is_section_heading(trimmed) {
            if !is_category_label(lines, idx) {
                break;
            }
            end_line = idx + 1;
            blank_seen = false;
            continue;
        }
        // After a paragraph break, only bullet lines continue the list.
        if blank_seen && !items.is_empty() && !starts_with_bullet(trimmed) {
            break;
        }
        if let Some(item) = parse_grocery_item(trimmed) {
            items.push(item);
        }
        end_line = idx + 1;
        blank_seen = false;
    }

    if items.is_empty() {
        return None;
    }
    Some(GroceryBlock {
        start_line: heading,
        end_line,
        items,
    })
}

/// Locate the first run of bullet lines long enough to be a list.
///
/// The run is returned only when `list_requested` is set or at least one
/// line carries a quantity-like token.
pub fn find_implicit_list(lines: &[&str], list_requested: bool) -> Option<GroceryBlock> {
    let mut idx = 0;
    while idx < lines.len() {
        if !starts_with_bullet(lines[idx]) {
            idx += 1;
            continue;
        }
        let start = idx;
        while idx < lines.len() && starts_with_bullet(lines[idx]) {
            idx += 1;
        }
        let run = &lines[start..idx];
        if run.len() < MIN_IMPLICIT_ITEMS {
            continue;
        }
        if !list_requested && !run.iter().any(|l| has_quantity_token(l)) {
            continue;
        }
        let items: Vec<GroceryListItem> = run.iter().filter_map(|l| parse_grocery_item(l)).collect();
        if items.len() >= MIN_IMPLICIT_ITEMS {
            return Some(GroceryBlock {
                start_line: start,
                end_line: idx,
                items,
            });
        }
    }
    None
}
