//! Post-filters applied to model text before it reaches the user.

use regex::Regex;
use std::sync::LazyLock;

/// Sentences acknowledging a like/favorite/download. Those acknowledgements
/// belong to the caller, so the model must never be the one saying them.
static CONFIRMATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[^\n.!?]*\b(?:(?:saved|added|marked|stored)\b[^\n.!?]{0,30}?\b(?:to (?:your )?favou?rites|as (?:a |your )?(?:favou?rite|liked))|(?:i've|i have) (?:liked|favou?rited|downloaded) (?:this|the|your) recipe|recipe (?:has been |was )?(?:liked|downloaded|favou?rited))\b[^\n.!?]*[.!?]*[ \t]*(?:happy cooking!?)?[ \t]*[\u{1F49B}\u{2764}\u{1F499}\u{1F49A}\u{1F9E1}\u{1F49C}]?\u{FE0F}?[ \t]*",
    )
    .expect("Invalid confirmation regex")
});

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("Invalid blank line regex"));

static PLATING_OFFER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)want to serve it|would you like[^\n]*?plating|caf[eé]-style or thali-style|i can show you some plating ideas",
    )
    .expect("Invalid plating offer regex")
});

/// Remove like/favorite/download acknowledgements emitted by the model.
///
/// Returns the input unchanged (same content) when nothing matches.
pub fn strip_confirmation_phrases(reply: &str) -> String {
    if !CONFIRMATION_REGEX.is_match(reply) {
        return reply.to_string();
    }
    let mut kept = Vec::new();
    for line in reply.lines() {
        if !CONFIRMATION_REGEX.is_match(line) {
            kept.push(line.to_string());
            continue;
        }
        let stripped = CONFIRMATION_REGEX.replace_all(line, "");
        // Lines that held nothing but the acknowledgement disappear.
        if !stripped.trim().is_empty() {
            kept.push(stripped.trim_end().to_string());
        }
    }
    collapse_blank_lines(&kept.join("\n")).trim().to_string()
}

/// Collapse runs of blank lines down to a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    EXCESS_BLANK_LINES.replace_all(text, "\n\n").into_owned()
}

/// Split a reply at its plating offer.
///
/// Returns the text before the offer and, when present, the offer itself
/// (from the start of its line onward).
pub fn split_plating_offer(reply: &str) -> (String, Option<String>) {
    let Some(m) = PLATING_OFFER_REGEX.find(reply) else {
        return (reply.to_string(), None);
    };
    let line_start = reply[..m.start()].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let main = reply[..line_start].trim_end().to_string();
    let offer = reply[line_start..].trim().to_string();
    if offer.is_empty() {
        (reply.to_string(), None)
    } else {
        (main, Some(offer))
    }
}

/// Remove the given line range from the text and tidy the gap it leaves.
pub fn remove_lines(text: &str, start_line: usize, end_line: usize) -> String {
    let kept: Vec<&str> = text
        .lines()
        .enumerate()
        .filter(|(idx, _)| *idx < start_line || *idx >= end_line)
        .map(|(_, line)| line)
        .collect();
    collapse_blank_lines(&kept.join("\n")).trim().to_string()
}
