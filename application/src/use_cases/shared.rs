//! Helpers shared by use cases.

use crate::ports::chat_model::{ChatModel, ChatModelError, ChatRequest};
use std::time::Duration;

/// Call the model, mapping an elapsed timeout to [`ChatModelError::Timeout`].
pub(crate) async fn complete_with_timeout(
    model: &dyn ChatModel,
    request: ChatRequest,
    timeout: Option<Duration>,
) -> Result<String, ChatModelError> {
    let call = model.complete(request);
    match timeout {
        Some(timeout) => tokio::time::timeout(timeout, call)
            .await
            .unwrap_or(Err(ChatModelError::Timeout)),
        None => call.await,
    }
}
