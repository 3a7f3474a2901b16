//! JSON-lines request/response loop over stdin/stdout.
//!
//! Every input line is one request tagged by `kind`; every output line is the
//! serialized response or `{"error": "..."}` carrying only a generic message.
//! Requests run concurrently, so replies may arrive out of order; a request
//! `id` is echoed on its reply line.

use dishmuse_application::{FilterVisionLabelsUseCase, HandleTurnUseCase, TurnError};
use dishmuse_domain::{TurnRequest, VisionFilterRequest, VisionFilterResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

const INVALID_REQUEST_MESSAGE: &str = "Invalid request";

/// One inbound JSON-lines request.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServeRequest {
    Turn(TurnRequest),
    VisionFilter(VisionFilterRequest),
}

/// Serves turns and vision filtering over JSON lines.
#[derive(Clone)]
pub struct StdioServer {
    handle_turn: Arc<HandleTurnUseCase>,
    vision: Arc<FilterVisionLabelsUseCase>,
}

impl StdioServer {
    pub fn new(handle_turn: Arc<HandleTurnUseCase>, vision: Arc<FilterVisionLabelsUseCase>) -> Self {
        Self {
            handle_turn,
            vision,
        }
    }

    /// Handle one input line and return the output line (without newline).
    pub async fn handle_line(&self, line: &str) -> String {
        let mut value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Rejected malformed request line: {}", e);
                return error_line(None, INVALID_REQUEST_MESSAGE);
            }
        };
        let id = value.as_object_mut().and_then(|obj| obj.remove("id"));
        let id = id.as_ref();

        let request: ServeRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejected request: {}", e);
                return error_line(id, INVALID_REQUEST_MESSAGE);
            }
        };

        match request {
            ServeRequest::Turn(turn) => match self.handle_turn.execute(turn).await {
                Ok(response) => to_line(id, &response),
                Err(e) => error_line(id, e.user_message()),
            },
            ServeRequest::VisionFilter(filter) => {
                match self.vision.execute(&filter.raw_labels).await {
                    Ok(filtered_ingredients) => to_line(
                        id,
                        &VisionFilterResponse {
                            filtered_ingredients,
                        },
                    ),
                    Err(e) => error_line(id, e.user_message()),
                }
            }
        }
    }

    /// Serve requests from `reader` until EOF, writing reply lines to
    /// `writer` as each request completes. Returns the writer once every
    /// reply has been written.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<W>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let writer_task = tokio::spawn(async move {
            while let Some(mut line) = rx.recv().await {
                line.push('\n');
                writer.write_all(line.as_bytes()).await?;
                writer.flush().await?;
            }
            Ok::<W, std::io::Error>(writer)
        });

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            // Same-session turns still serialize on the session lock.
            let server = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let output = server.handle_line(&line).await;
                let _ = tx.send(output);
            });
        }
        drop(tx);

        writer_task.await.map_err(std::io::Error::other)?
    }

    /// Read requests from stdin until EOF, answering each on stdout.
    pub async fn run(&self) -> std::io::Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
            .map(|_| ())
    }
}

fn to_line<T: Serialize>(id: Option<&Value>, value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(mut body) => {
            if let (Some(id), Some(obj)) = (id, body.as_object_mut()) {
                obj.insert("id".to_string(), id.clone());
            }
            body.to_string()
        }
        Err(_) => error_line(id, TurnError::USER_MESSAGE),
    }
}

fn error_line(id: Option<&Value>, message: &str) -> String {
    let mut body = json!({ "error": message });
    if let Some(id) = id {
        body["id"] = id.clone();
    }
    body.to_string()
}
