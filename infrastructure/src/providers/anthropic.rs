//! Anthropic Messages API chat model.

use crate::config::FileModelConfig;
use async_trait::async_trait;
use dishmuse_application::{ChatModel, ChatModelError, ChatRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// [`ChatModel`] backed by the Anthropic Messages API.
#[derive(Debug)]
pub struct AnthropicChatModel {
    api_key: String,
    base_url: String,
    api_version: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl AnthropicChatModel {
    /// Build from configuration, resolving the API key.
    pub fn from_config(config: &FileModelConfig) -> Result<Self, ChatModelError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            ChatModelError::NotConfigured(format!("set {} or model.api_key", config.api_key_env))
        })?;
        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client: reqwest::Client::new(),
        })
    }

    fn build_request<'a>(&'a self, request: &'a ChatRequest) -> MessagesRequest<'a> {
        MessagesRequest {
            model: request.model.as_deref().unwrap_or(&self.model),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: request.system.as_deref(),
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Concatenate the text blocks of a successful response body.
fn parse_response(body: &str) -> Result<String, ChatModelError> {
    let response: MessagesResponse =
        serde_json::from_str(body).map_err(|e| ChatModelError::ParseError(e.to_string()))?;

    let text: String = response
        .content
        .into_iter()
        .filter(|c| c.content_type == "text")
        .filter_map(|c| c.text)
        .collect();
    if text.is_empty() {
        return Err(ChatModelError::ParseError(
            "No text content in response".to_string(),
        ));
    }
    Ok(text)
}

fn parse_error(status: u16, body: String) -> ChatModelError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    ChatModelError::Api { status, message }
}

fn map_transport_error(e: reqwest::Error) -> ChatModelError {
    if e.is_timeout() {
        ChatModelError::Timeout
    } else if e.is_connect() {
        ChatModelError::Connection(e.to_string())
    } else {
        ChatModelError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl ChatModel for AnthropicChatModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, ChatModelError> {
        let body = self.build_request(&request);
        debug!(
            "Anthropic request: model={} messages={}",
            body.model,
            body.messages.len()
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_transport_error)?;

        if status != 200 {
            return Err(parse_error(status, text));
        }
        parse_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishmuse_domain::Message;

    fn model() -> AnthropicChatModel {
        let config = FileModelConfig {
            api_key: Some("test-key".to_string()),
            base_url: "https://api.example.com/".to_string(),
            ..Default::default()
        };
        AnthropicChatModel::from_config(&config).unwrap()
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = FileModelConfig {
            api_key: None,
            api_key_env: "DISHMUSE_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            AnthropicChatModel::from_config(&config),
            Err(ChatModelError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_request_body() {
        let model = model();
        assert_eq!(model.base_url, "https://api.example.com");

        let request = ChatRequest::new(vec![Message::user("hi"), Message::assistant("hello")])
            .with_system("be nice");
        let json = serde_json::to_value(model.build_request(&request)).unwrap();
        assert_eq!(json["model"], "claude-opus-4-20250514");
        assert_eq!(json["system"], "be nice");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][1]["role"], "assistant");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_request_body_model_override_and_no_system() {
        let model = model();
        let request = ChatRequest::single("labels").with_model(Some("vision".into()));
        let json = serde_json::to_value(model.build_request(&request)).unwrap();
        assert_eq!(json["model"], "vision");
        assert!(json.get("system").is_none());
    }

    #[test]
    fn test_parse_response_joins_text_blocks() {
        let body = r#"{"content":[{"type":"text","text":"Hello "},{"type":"tool_use","id":"x"},{"type":"text","text":"there"}]}"#;
        assert_eq!(parse_response(body).unwrap(), "Hello there");
    }

    #[test]
    fn test_parse_response_without_text() {
        assert!(matches!(
            parse_response(r#"{"content":[]}"#),
            Err(ChatModelError::ParseError(_))
        ));
        assert!(matches!(
            parse_response("not json"),
            Err(ChatModelError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_error_body() {
        let err = parse_error(
            529,
            r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#
                .to_string(),
        );
        assert!(matches!(err, ChatModelError::Api { status: 529, ref message } if message == "Overloaded"));

        let raw = parse_error(502, "Bad Gateway".to_string());
        assert!(matches!(raw, ChatModelError::Api { status: 502, ref message } if message == "Bad Gateway"));
    }
}
