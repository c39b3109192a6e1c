//! Conversation transcript types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{Answer, DocumentChunk};

/// Author of a [`Message`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
    System,
}

/// One entry of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Chunks used to generate a model answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieved_context: Option<Vec<DocumentChunk>>,
}

impl Message {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
            retrieved_context: None,
        }
    }

    /// A model message built from an [`Answer`].
    pub fn from_answer(answer: &Answer) -> Self {
        Self {
            retrieved_context: Some(answer.used_chunks.clone()),
            ..Self::new(MessageRole::Model, &answer.text)
        }
    }
}

/// An ordered conversation owned by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transcript with a system greeting.
    pub fn with_greeting(text: impl Into<String>) -> Self {
        Self { messages: vec![Message::new(MessageRole::System, text)] }
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.messages.push(Message::new(MessageRole::User, text));
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_answer(&mut self, answer: &Answer) -> &Message {
        self.messages.push(Message::from_answer(answer));
        &self.messages[self.messages.len() - 1]
    }

    /// Drop every turn, keeping the opening greeting if there is one.
    pub fn reset(&mut self) {
        let keep = self.messages.first().is_some_and(|m| m.role == MessageRole::System);
        self.messages.truncate(usize::from(keep));
    }

    /// All messages, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
