use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a transcript entry represents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// The greeting the assistant seeds a fresh session with
    Welcome,

    /// A question the user sent
    Query,

    /// A successful assistant reply
    Response,

    /// A failure surfaced in the transcript
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Welcome => write!(f, "welcome"),
            MessageKind::Query => write!(f, "query"),
            MessageKind::Response => write!(f, "response"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}

/// Error returned when parsing an invalid message kind string.
#[derive(Debug)]
pub struct MessageKindParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for MessageKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown message kind: {}", self.invalid_value)
    }
}

impl std::error::Error for MessageKindParseError {}

impl FromStr for MessageKind {
    type Err = MessageKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "welcome" => Ok(MessageKind::Welcome),
            "query" => Ok(MessageKind::Query),
            "response" => Ok(MessageKind::Response),
            "error" => Ok(MessageKind::Error),
            _ => Err(MessageKindParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}
