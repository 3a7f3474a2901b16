//! Progress reporting while waiting on the model

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a turn is in flight
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_visibility(true)
    }

    /// A reporter that draws nothing when `visible` is false.
    pub fn with_visibility(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}") {
            bar.set_style(style);
        }
        Self { bar }
    }

    pub fn start(&self, message: &str) {
        self.bar.set_message(message.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_reporter_lifecycle() {
        let reporter = ProgressReporter::with_visibility(false);
        reporter.start("Cooking up ideas...");
        reporter.set_message("Almost there");
        reporter.finish();
    }
}
