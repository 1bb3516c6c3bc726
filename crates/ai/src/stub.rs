//! Scripted [`CompletionClient`] for tests and offline development.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::completion::{CompletionClient, CompletionError, CompletionRequest};

/// One canned answer.
#[derive(Debug, Clone, PartialEq)]
pub enum StubReply {
    Json(JsonValue),
    Fail(CompletionError),
    /// Wait, then answer with the inner reply.
    Delayed(Duration, Box<StubReply>),
}

/// Replays scripted replies in order, then repeats the last one forever.
///
/// Every request is recorded so tests can inspect prompts and call counts.
#[derive(Debug)]
pub struct StubCompletionClient {
    script: Mutex<VecDeque<StubReply>>,
    last: Mutex<StubReply>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletionClient {
    pub fn always(reply: StubReply) -> Self {
        Self::sequence(vec![reply])
    }

    pub fn json(value: JsonValue) -> Self {
        Self::always(StubReply::Json(value))
    }

    pub fn failing(err: CompletionError) -> Self {
        Self::always(StubReply::Fail(err))
    }

    /// An empty script behaves like a client without credentials.
    pub fn sequence(replies: Vec<StubReply>) -> Self {
        let last = replies
            .last()
            .cloned()
            .unwrap_or(StubReply::Fail(CompletionError::AuthMissing));
        Self {
            script: Mutex::new(replies.into()),
            last: Mutex::new(last),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn next_reply(&self) -> StubReply {
        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        match script.pop_front() {
            Some(reply) => reply,
            None => self.last.lock().unwrap_or_else(|e| e.into_inner()).clone(),
        }
    }
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<JsonValue, CompletionError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let mut reply = self.next_reply();
        loop {
            match reply {
                StubReply::Json(v) => return Ok(v),
                StubReply::Fail(e) => return Err(e),
                StubReply::Delayed(d, inner) => {
                    tokio::time::sleep(d).await;
                    reply = *inner;
                }
            }
        }
    }
}
