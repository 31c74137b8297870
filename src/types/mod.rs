// Public modules
pub mod chat_message;
pub mod message_kind;
pub mod query;
pub mod sender;

// Re-exports
pub use chat_message::ChatMessage;
pub use message_kind::{MessageKind, MessageKindParseError};
pub use query::{QueryRequest, QueryResponse};
pub use sender::{Sender, SenderParseError};
