use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Semaphore;

use super::{ApiTransport, RawResponse};
use crate::errors::ConsoleError;

/// A request as seen by the scripted transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Replays queued replies in order and records every request.
///
/// An empty queue answers with a transport failure. With `held()`, each
/// reply waits for a `release` so callers can observe in-flight state.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<RawResponse, String>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replies are withheld until released one by one.
    pub fn held() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    pub fn release(&self, replies: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(replies);
        }
    }

    pub fn push(&self, response: RawResponse) {
        self.replies.lock().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push(RawResponse::json(status, &body));
    }

    /// Queues a failure that never produced an HTTP response.
    pub fn push_failure(&self, message: &str) {
        self.replies.lock().push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    async fn answer(&self, request: RecordedRequest) -> Result<RawResponse, ConsoleError> {
        self.requests.lock().push(request);

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| ConsoleError::Transport(e.to_string()))?;
            permit.forget();
        }

        let next = self.replies.lock().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ConsoleError::Transport(message)),
            None => Err(ConsoleError::Transport("no scripted reply queued".to_string())),
        }
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn get(&self, path: &str) -> Result<RawResponse, ConsoleError> {
        self.answer(RecordedRequest {
            method: "GET",
            path: path.to_string(),
            body: None,
        })
        .await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, ConsoleError> {
        self.answer(RecordedRequest {
            method: "POST",
            path: path.to_string(),
            body: Some(body.clone()),
        })
        .await
    }
}
