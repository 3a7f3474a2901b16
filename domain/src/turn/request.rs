//! Inbound turn requests and their validation.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Out-of-band actions that bypass the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    /// The user downloaded the current recipe.
    Download,
    /// The user liked the current recipe.
    Like,
}

/// Caller-supplied directives for the current turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlHints {
    pub prefer_in_store_only: bool,
    pub force_grocery_stage: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ControlAction>,
}

/// A single user turn as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_labels: Option<Vec<String>>,
    pub control_hints: ControlHints,
}

/// What a validated request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnKind {
    Text(String),
    /// Detected labels, trimmed, empties dropped.
    ImageLabels(Vec<String>),
    Action(ControlAction),
}

impl TurnRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn image_labels(labels: Vec<String>) -> Self {
        Self {
            image_labels: Some(labels),
            ..Default::default()
        }
    }

    pub fn action(action: ControlAction) -> Self {
        Self {
            control_hints: ControlHints {
                action: Some(action),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = Some(key.into());
        self
    }

    pub fn with_hints(mut self, hints: ControlHints) -> Self {
        self.control_hints = hints;
        self
    }

    /// Classify the request, rejecting missing or contradictory input.
    ///
    /// A control action wins over any text or labels sent alongside it.
    /// Otherwise exactly one of non-blank text or a non-empty label list must
    /// be present.
    pub fn validate(&self) -> Result<TurnKind, DomainError> {
        if let Some(action) = self.control_hints.action {
            return Ok(TurnKind::Action(action));
        }

        let text = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let labels: Vec<String> = self
            .image_labels
            .iter()
            .flatten()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        match (text, labels.is_empty()) {
            (Some(_), false) => Err(DomainError::invalid_input(
                "request carries both text and image labels",
            )),
            (Some(text), true) => Ok(TurnKind::Text(text.to_string())),
            (None, false) => Ok(TurnKind::ImageLabels(labels)),
            (None, true) => Err(DomainError::invalid_input(
                "request carries neither text nor image labels",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_turn() {
        let kind = TurnRequest::text("  I have rice  ").validate().unwrap();
        assert_eq!(kind, TurnKind::Text("I have rice".to_string()));
    }

    #[test]
    fn test_label_turn_drops_blanks() {
        let req = TurnRequest::image_labels(vec![" tomato ".into(), "".into(), "onion".into()]);
        assert_eq!(
            req.validate().unwrap(),
            TurnKind::ImageLabels(vec!["tomato".into(), "onion".into()])
        );
    }

    #[test]
    fn test_neither_is_rejected() {
        assert!(matches!(
            TurnRequest::default().validate(),
            Err(DomainError::InvalidInput(_))
        ));
        let blank = TurnRequest {
            text: Some("   ".into()),
            image_labels: Some(vec![" ".into()]),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_both_is_rejected() {
        let req = TurnRequest {
            text: Some("hello".into()),
            image_labels: Some(vec!["egg".into()]),
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_action_wins() {
        let req = TurnRequest::text("ignored").with_hints(ControlHints {
            action: Some(ControlAction::Like),
            ..Default::default()
        });
        assert_eq!(req.validate().unwrap(), TurnKind::Action(ControlAction::Like));
    }

    #[test]
    fn test_wire_format() {
        let req: TurnRequest = serde_json::from_str(
            r#"{"sessionKey":"abc","imageLabels":["egg"],"controlHints":{"preferInStoreOnly":true,"action":"download"}}"#,
        )
        .unwrap();
        assert_eq!(req.session_key.as_deref(), Some("abc"));
        assert!(req.control_hints.prefer_in_store_only);
        assert!(!req.control_hints.force_grocery_stage);
        assert_eq!(req.control_hints.action, Some(ControlAction::Download));
    }
}
