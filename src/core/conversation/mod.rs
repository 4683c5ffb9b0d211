pub mod message;

pub use message::{Author, Message};

use crate::error::ConversationError;
use serde::Serialize;

/// Append-only, ordered chat history.
///
/// Messages are never edited or removed; the only mutation is [`push`].
///
/// [`push`]: Conversation::push
#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        let last = self.messages.len() - 1;
        &self.messages[last]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The last `limit` user messages, oldest first.
    pub fn recent_user_messages(&self, limit: usize) -> Vec<&Message> {
        let mut recent: Vec<&Message> = self
            .messages
            .iter()
            .rev()
            .filter(|m| m.is_from(Author::User))
            .take(limit)
            .collect();
        recent.reverse();
        recent
    }

    pub fn to_json_pretty(&self) -> Result<String, ConversationError> {
        Ok(serde_json::to_string_pretty(&self.messages)?)
    }
}
