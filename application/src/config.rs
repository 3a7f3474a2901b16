//! Application-level configuration.
//!
//! Controls how use cases behave: model-call timeouts and history limits.

use std::time::Duration;

/// Default cap on stored history messages.
pub const DEFAULT_MAX_HISTORY_MESSAGES: usize = 40;

/// Application behavior configuration.
#[derive(Debug, Clone)]
pub struct BehaviorConfig {
    /// Maximum time to wait for a model response before timing out.
    pub timeout: Option<Duration>,
    /// Messages kept per session; `0` keeps everything.
    pub max_history_messages: usize,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            max_history_messages: DEFAULT_MAX_HISTORY_MESSAGES,
        }
    }
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
            ..Default::default()
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.map(Duration::from_secs),
            ..Default::default()
        }
    }

    pub fn with_max_history_messages(mut self, max: usize) -> Self {
        self.max_history_messages = max;
        self
    }
}
