//! Line-level text cleanup shared by the recipe and grocery parsers.

use regex::Regex;
use std::sync::LazyLock;

static LIST_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d{1,2}[.)]\s+").expect("Invalid list number regex"));

/// Glyphs models put in front of list items.
const BULLET_CHARS: &[char] = &[
    '-', '*', '+', '>', '\u{2022}', '\u{2013}', '\u{2014}', '\u{25CF}', '\u{25AA}', '\u{25AB}',
    '\u{2606}', '\u{2605}', '\u{00B7}', '\u{25E6}', '\u{2023}', '\u{2043}',
];

/// Whether `c` renders as an emoji or pictograph rather than text.
pub fn is_emoji_glyph(c: char) -> bool {
    matches!(c as u32,
        0x1F000..=0x1FAFF
        | 0x2600..=0x27BF
        | 0x2B00..=0x2BFF
        | 0x25A0..=0x25FF
        | 0x2190..=0x21FF
        | 0xFE00..=0xFE0F
        | 0x200D
        | 0x20E3
        | 0xE0020..=0xE007F)
}

/// Whether `c` is a list bullet marker (including emoji used as bullets).
pub fn is_bullet_char(c: char) -> bool {
    BULLET_CHARS.contains(&c) || is_emoji_glyph(c)
}

/// Whether the line is a section label such as `**Steps:**` or
/// `🛒 **Ingredients:**`, ignoring any emoji in front of it.
pub fn is_heading_shaped(line: &str) -> bool {
    let unemoji = strip_emoji(line);
    let trimmed = unemoji.trim();
    if trimmed.starts_with("**") {
        return trimmed[2..].contains(":**");
    }
    let plain = strip_markup(trimmed);
    let plain = plain.trim();
    plain.ends_with(':')
        && plain.chars().count() <= 40
        && !plain.starts_with(['-', '*', '+'])
        && plain.chars().any(char::is_alphanumeric)
}

/// Whether the line starts with a bullet marker such as `- `, `* `, or `•`.
///
/// A leading `**` (bold) is not a bullet, and neither is an emoji in front
/// of a section label.
pub fn starts_with_bullet(line: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with("**") {
        return false;
    }
    match trimmed.chars().next() {
        Some('-' | '*' | '+') => trimmed
            .chars()
            .nth(1)
            .is_some_and(|c| c.is_whitespace()),
        Some(c) if is_emoji_glyph(c) => !is_heading_shaped(trimmed),
        Some(c) => is_bullet_char(c),
        None => false,
    }
}

/// Remove markdown emphasis markers (`**`, `__`, backticks).
pub fn strip_markup(line: &str) -> String {
    line.replace("**", "").replace("__", "").replace('`', "")
}

/// Remove every emoji glyph from the text.
pub fn strip_emoji(line: &str) -> String {
    line.chars().filter(|c| !is_emoji_glyph(*c)).collect()
}

/// Trim leading bullet markers, emoji and whitespace.
pub fn strip_bullet_prefix(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_whitespace() || is_bullet_char(c))
}

/// Normalize a list line: markup, bullets, list numbers (`1.`, `2)`) and
/// emoji removed, whitespace collapsed.
pub fn clean_item_line(line: &str) -> String {
    let unmarked = strip_markup(line);
    let unbulleted = strip_bullet_prefix(&unmarked);
    let unnumbered = LIST_NUMBER_REGEX.replace(unbulleted, "");
    let unbulleted = strip_bullet_prefix(&unnumbered);
    crate::core::string::collapse_whitespace(&strip_emoji(unbulleted))
}

/// Whether a cleaned line carries real content rather than noise.
///
/// Requires at least `min_len` characters and one alphanumeric character.
pub fn has_content(cleaned: &str, min_len: usize) -> bool {
    cleaned.chars().count() >= min_len && cleaned.chars().any(char::is_alphanumeric)
}
