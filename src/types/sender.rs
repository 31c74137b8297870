use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the conversation a transcript entry belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The person typing into the chat box
    User,

    /// The Arth assistant
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// Error returned when parsing an invalid sender string.
#[derive(Debug)]
pub struct SenderParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for SenderParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown sender: {}", self.invalid_value)
    }
}

impl std::error::Error for SenderParseError {}

impl FromStr for Sender {
    type Err = SenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            _ => Err(SenderParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization() {
        let sender = Sender::User;
        let json = serde_json::to_string(&sender).unwrap();
        assert_eq!(json, r#""user""#);

        let sender = Sender::Bot;
        let json = serde_json::to_string(&sender).unwrap();
        assert_eq!(json, r#""bot""#);
    }

    #[test]
    fn deserialization() {
        let json = r#""user""#;
        let sender: Sender = serde_json::from_str(json).unwrap();
        assert_eq!(sender, Sender::User);

        let json = r#""bot""#;
        let sender: Sender = serde_json::from_str(json).unwrap();
        assert_eq!(sender, Sender::Bot);
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Bot.to_string(), "bot");
        assert_eq!("user".parse::<Sender>().unwrap(), Sender::User);
        assert!("robot".parse::<Sender>().is_err());
    }
}
