use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{MessageKind, Sender};

/// A single entry in the conversation transcript.
///
/// Messages are immutable once created: the constructors stamp the current
/// time and there are no mutators. Ordering is the transcript's concern, not
/// the message's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Which side of the conversation produced this entry.
    pub sender: Sender,

    /// What this entry represents.
    pub kind: MessageKind,

    /// The text shown in the chat UI.
    pub text: String,

    /// When the entry was appended.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl ChatMessage {
    fn new(sender: Sender, kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            sender,
            kind,
            text: text.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Creates a user query entry.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageKind::Query, text)
    }

    /// Creates the assistant's greeting entry.
    pub fn welcome(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, MessageKind::Welcome, text)
    }

    /// Creates a successful assistant reply entry.
    pub fn bot_response(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, MessageKind::Response, text)
    }

    /// Creates a failure entry shown in the transcript.
    pub fn bot_error(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, MessageKind::Error, text)
    }

    /// Returns true if the user typed this entry.
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Returns true if this entry surfaced a failure.
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}
