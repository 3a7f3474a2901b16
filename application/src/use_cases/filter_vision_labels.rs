//! Filter Vision Labels use case.
//!
//! Asks the chat model to reduce labels detected in a photo to plausible
//! cooking ingredients. There is no local fallback: on failure the caller
//! decides whether to continue with the raw labels.

use crate::config::BehaviorConfig;
use crate::ports::chat_model::{ChatModel, ChatModelError, ChatRequest};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::use_cases::shared::complete_with_timeout;
use dishmuse_domain::core::string::truncate;
use dishmuse_domain::{parse_label_list, vision_filter_prompt};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum VisionFilterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Vision filter failed: {0}")]
    VisionFilterFailed(#[source] ChatModelError),
}

impl VisionFilterError {
    pub const USER_MESSAGE: &'static str = "Vision label filtering failed";

    pub fn user_message(&self) -> &'static str {
        Self::USER_MESSAGE
    }
}

#[derive(Clone)]
pub struct FilterVisionLabelsUseCase {
    model: Arc<dyn ChatModel>,
    model_override: Option<String>,
    behavior: BehaviorConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl FilterVisionLabelsUseCase {
    pub fn new(model: Arc<dyn ChatModel>, behavior: BehaviorConfig) -> Self {
        Self {
            model,
            model_override: None,
            behavior,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Use a different model than the chat default for filtering.
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        self.model_override = model;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub async fn execute(&self, raw_labels: &[String]) -> Result<Vec<String>, VisionFilterError> {
        let labels: Vec<String> = raw_labels
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if labels.is_empty() {
            return Err(VisionFilterError::InvalidInput(
                "no labels to filter".to_string(),
            ));
        }

        let request = ChatRequest::single(vision_filter_prompt(&labels))
            .with_model(self.model_override.clone());
        let reply = complete_with_timeout(self.model.as_ref(), request, self.behavior.timeout)
            .await
            .map_err(|e| {
                warn!(
                    "Vision filter failed for labels '{}': {}",
                    truncate(&labels.join(", "), 100),
                    e
                );
                VisionFilterError::VisionFilterFailed(e)
            })?;

        let filtered = parse_label_list(&reply);
        info!(
            "Vision filter kept {} of {} labels",
            filtered.len(),
            labels.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "vision_filter",
            serde_json::json!({
                "raw_labels": labels,
                "filtered": filtered,
            }),
        ));
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::handle_turn::tests::MockChatModel;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_filters_to_ingredients() {
        let model = Arc::new(MockChatModel::replying(&["tomato"]));
        let uc = FilterVisionLabelsUseCase::new(model.clone(), BehaviorConfig::default());

        let filtered = uc
            .execute(&labels(&["Coca-Cola", "tomato", "plastic wrap", "Italian"]))
            .await
            .unwrap();
        assert_eq!(filtered, vec!["tomato"]);

        let seen = model.seen();
        assert!(seen[0].system.is_none());
        assert!(seen[0].messages[0].content.contains("\"plastic wrap\""));
        assert!(seen[0].model.is_none());
    }

    #[tokio::test]
    async fn test_model_override_is_forwarded() {
        let model = Arc::new(MockChatModel::replying(&["egg, milk"]));
        let uc = FilterVisionLabelsUseCase::new(model.clone(), BehaviorConfig::default())
            .with_model_override(Some("vision-model".into()));

        let filtered = uc.execute(&labels(&["egg", "milk"])).await.unwrap();
        assert_eq!(filtered, vec!["egg", "milk"]);
        assert_eq!(model.seen()[0].model.as_deref(), Some("vision-model"));
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let model = Arc::new(MockChatModel::new(vec![Err(ChatModelError::Api {
            status: 529,
            message: "overloaded".into(),
        })]));
        let uc = FilterVisionLabelsUseCase::new(model, BehaviorConfig::default());

        let err = uc.execute(&labels(&["tomato"])).await.unwrap_err();
        assert!(matches!(err, VisionFilterError::VisionFilterFailed(_)));
        assert!(!err.user_message().contains("overloaded"));
    }

    #[tokio::test]
    async fn test_empty_labels_rejected() {
        let model = Arc::new(MockChatModel::replying(&["unused"]));
        let uc = FilterVisionLabelsUseCase::new(model.clone(), BehaviorConfig::default());

        let err = uc.execute(&labels(&[" ", ""])).await.unwrap_err();
        assert!(matches!(err, VisionFilterError::InvalidInput(_)));
        assert!(model.seen().is_empty());
    }
}
