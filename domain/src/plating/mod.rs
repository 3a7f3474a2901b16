//! Plating ideas: parsing suggestion text into image-generation prompts.

use crate::core::string::{collapse_whitespace, take_chars};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const MAX_DETAIL_CHARS: usize = 200;
const FALLBACK_SECTION: &str = "Plating";

static SECTION_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(?P<name>[^*]+):\*\*").expect("Invalid plating section regex")
});

/// One visual plating suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatingIdea {
    pub section: String,
    pub description: String,
    pub bullets: Vec<String>,
}

impl PlatingIdea {
    /// Photographic prompt for an image generator.
    pub fn image_prompt(&self, dish: &str) -> String {
        let dish = dish.trim();
        let mut base = String::from("Professional food photography, elegant restaurant plating,");
        if !dish.is_empty() {
            base.push(' ');
            base.push_str(dish);
            base.push(',');
        }
        base.push_str(" top-down view, natural lighting,");

        let details = collapse_whitespace(&self.description);
        format!(
            "{base} {}. High-quality, appetizing, commercial food photography style, warm tones, shallow depth of field, garnished beautifully",
            take_chars(&details, MAX_DETAIL_CHARS)
        )
    }
}

/// A generated plating image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatingImage {
    pub url: String,
    pub section: String,
    pub description: String,
    /// Position of the idea this image was generated from.
    pub index: usize,
}

/// Split plating text into ideas.
///
/// Each `**Section:**` heading followed by `-` bullets becomes one idea.
/// Text with no such structure becomes a single idea titled "Plating".
pub fn parse_plating_ideas(text: &str) -> Vec<PlatingIdea> {
    let headings: Vec<_> = SECTION_HEADING_REGEX.captures_iter(text).collect();
    let mut ideas = Vec::new();

    for (i, caps) in headings.iter().enumerate() {
        let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
            continue;
        };
        let body_end = headings
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());
        let bullets: Vec<String> = text[whole.end()..body_end]
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix('-'))
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if !bullets.is_empty() {
            ideas.push(PlatingIdea {
                section: name.as_str().trim().to_string(),
                description: bullets.join(". "),
                bullets,
            });
        }
    }

    if ideas.is_empty() {
        let flattened: String = text
            .chars()
            .map(|c| if c == '*' || c == '\n' { ' ' } else { c })
            .collect();
        ideas.push(PlatingIdea {
            section: FALLBACK_SECTION.to_string(),
            description: flattened.trim().to_string(),
            bullets: Vec::new(),
        });
    }

    ideas
}
