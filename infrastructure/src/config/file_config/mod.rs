//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod images;
mod model;
mod output;
mod sections;

pub use images::FileImagesConfig;
pub use model::FileModelConfig;
pub use output::FileOutputConfig;
pub use sections::{FileAssistantConfig, FileLoggingConfig, FileSessionConfig, FileVisionConfig};

use dishmuse_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub assistant: FileAssistantConfig,
    /// Chat model settings
    pub model: FileModelConfig,
    pub session: FileSessionConfig,
    pub vision: FileVisionConfig,
    /// Plating image generation
    pub images: FileImagesConfig,
    /// Output settings
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    field: "model.model".to_string(),
                },
                "model.model: model name is empty",
            ));
        }
        if self
            .vision
            .model
            .as_deref()
            .is_some_and(|m| m.trim().is_empty())
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyModelName {
                    field: "vision.model".to_string(),
                },
                "vision.model: empty model name, falling back to model.model",
            ));
        }
        if self.model.max_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTokenBudget,
                "model.max_tokens: must be greater than zero",
            ));
        }
        if self.session.max_history_turns == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnboundedHistory,
                "session.max_history_turns: 0 disables the cap, history grows without bound",
            ));
        }
        if self.images.enabled && self.images.max_images == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoImages,
                "images.max_images: 0 while images.enabled is true, no images will be generated",
            ));
        }

        issues
    }

    /// Vision model override, ignoring blank values.
    pub fn vision_model(&self) -> Option<String> {
        self.vision
            .model
            .clone()
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishmuse_domain::{OutputFormat, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[assistant]
name = "Muse"

[model]
model = "claude-sonnet-4-5"
max_tokens = 2048
timeout_seconds = 30

[session]
max_history_turns = 20

[vision]
model = "claude-haiku-4-5"

[images]
enabled = false

[output]
format = "json"
color = false

[logging]
conversation_log = "/tmp/dishmuse.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.assistant.name, "Muse");
        assert_eq!(config.model.model, "claude-sonnet-4-5");
        assert_eq!(config.model.max_tokens, 2048);
        assert_eq!(config.model.timeout_seconds, Some(30));
        assert_eq!(config.session.max_history_turns, 20);
        assert_eq!(config.vision_model().as_deref(), Some("claude-haiku-4-5"));
        assert!(!config.images.enabled);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.logging.conversation_log.is_some());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[session]\nmax_history_turns = 8\n").unwrap();
        assert_eq!(config.session.max_history_turns, 8);
        assert_eq!(config.model, FileModelConfig::default());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_issues() {
        let mut config = FileConfig::default();
        config.model.model = " ".to_string();
        config.model.max_tokens = 0;
        config.session.max_history_turns = 0;
        config.vision.model = Some(String::new());

        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert_eq!(
            issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count(),
            2
        );
        assert!(
            issues
                .iter()
                .any(|i| i.code == ConfigIssueCode::UnboundedHistory)
        );
        assert!(config.vision_model().is_none());
    }
}
