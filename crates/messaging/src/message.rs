use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dsd_core::{DomainError, DomainResult, MessageId};

/// Which side of the conversation wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Vendor,
    Driver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only conversation, ordered by arrival.
#[derive(Debug, Clone, Default)]
pub struct ChatThread {
    messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a thread with existing history (e.g. demo messages).
    pub fn with_history(messages: Vec<ChatMessage>) -> Self {
        Self { messages }
    }

    /// Append a message sent at `at`.
    ///
    /// Blank text is rejected; surrounding whitespace is trimmed.
    pub fn post(
        &mut self,
        sender: Sender,
        text: impl AsRef<str>,
        at: DateTime<Utc>,
    ) -> DomainResult<ChatMessage> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(DomainError::validation("message text cannot be empty"));
        }

        let msg = ChatMessage {
            id: MessageId::generate(),
            sender,
            text: text.to_string(),
            timestamp: at,
        };
        self.messages.push(msg.clone());
        Ok(msg)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
