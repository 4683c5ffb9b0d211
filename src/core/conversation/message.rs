use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Author {
    User,
    Agent,
    System,
}

/// A single chat entry. Fields are private so a message cannot change after
/// it has been appended to a [`Conversation`](super::Conversation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    author: Author,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    created_at: DateTime<Utc>,
}

impl Message {
    fn new(author: Author, content: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            author,
            content: content.into(),
            hint,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Author::User, content, None)
    }

    pub fn agent(content: impl Into<String>, hint: Option<String>) -> Self {
        Self::new(Author::Agent, content, hint)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Author::System, content, None)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_from(&self, author: Author) -> bool {
        self.author == author
    }
}
