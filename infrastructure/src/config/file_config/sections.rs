//! Small TOML sections: `[assistant]`, `[session]`, `[vision]`, `[logging]`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssistantConfig {
    /// Name the assistant introduces itself with.
    pub name: String,
    /// Replacement system instruction; the built-in template is used when unset.
    pub system_prompt_file: Option<PathBuf>,
}

impl Default for FileAssistantConfig {
    fn default() -> Self {
        Self {
            name: "DishMuse".to_string(),
            system_prompt_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Messages kept per session (user and assistant each count); 0 keeps all.
    pub max_history_turns: usize,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            max_history_turns: 40,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVisionConfig {
    /// Model for label filtering; defaults to the chat model.
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript path; disabled when unset.
    pub conversation_log: Option<PathBuf>,
}
