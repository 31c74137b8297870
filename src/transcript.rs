//! The append-only conversation transcript.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::to_writer_pretty;

use crate::error::{Error, Result};
use crate::types::ChatMessage;

///////////////////////////////////////////// Transcript //////////////////////////////////////////

/// An ordered record of the conversation.
///
/// Messages append in causal order and are never edited or reordered. A
/// transcript lives as long as its session view; starting a fresh view means
/// starting a fresh transcript.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the end.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// The messages in insertion order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The number of messages recorded.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Writes the transcript to disk as pretty-printed JSON.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .map_err(|err| Error::io("failed to create transcript file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &TranscriptFile::new(&self.messages)).map_err(|err| {
            Error::serialization("failed to serialize transcript", Some(Box::new(err)))
        })
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[derive(Serialize, Deserialize)]
struct TranscriptFile {
    version: u8,
    messages: Vec<ChatMessage>,
}

impl TranscriptFile {
    fn new(messages: &[ChatMessage]) -> Self {
        Self {
            version: 1,
            messages: messages.to_vec(),
        }
    }
}

/////////////////////////////////////////////// tests /////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.push(ChatMessage::welcome("Hi! I'm the Arth assistant."));
        transcript.push(ChatMessage::user("show my expenses"));
        transcript.push(ChatMessage::bot_response("You spent ₹500"));

        assert_eq!(transcript.len(), 3);
        let texts: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec![
                "Hi! I'm the Arth assistant.",
                "show my expenses",
                "You spent ₹500",
            ]
        );
        assert_eq!(transcript.last().unwrap().text, "You spent ₹500");
    }

    #[test]
    fn save_writes_versioned_json() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("what's my budget?"));
        transcript.push(ChatMessage::bot_response("₹10,000 left this month."));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.json");
        transcript.save_to(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let file: TranscriptFile = serde_json::from_str(&raw).unwrap();
        assert_eq!(file.version, 1);
        assert_eq!(file.messages, transcript.messages());
    }

    #[test]
    fn save_to_unwritable_path_is_an_io_error() {
        let transcript = Transcript::new();
        let err = transcript
            .save_to("/nonexistent-dir/transcript.json")
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
