//! Output formatter trait

use super::console::ConsoleFormatter;
use dishmuse_domain::{OutputFormat, TurnResponse};

/// Trait for formatting turn responses
pub trait OutputFormatter: Send + Sync {
    fn render(&self, response: &TurnResponse) -> String;
}

/// Human-readable console output.
impl OutputFormatter for ConsoleFormatter {
    fn render(&self, response: &TurnResponse) -> String {
        ConsoleFormatter::format_response(response)
    }
}

/// One pretty-printed JSON document per response.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn render(&self, response: &TurnResponse) -> String {
        ConsoleFormatter::format_json(response)
    }
}

/// Pick the formatter for a configured output format.
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
