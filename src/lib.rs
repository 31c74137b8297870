// Public modules
pub mod auth;
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod quota;
pub mod render;
pub mod transcript;
pub mod types;
pub mod validate;

// Re-exports
pub use client::{Arth, QueryTransport};
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use types::*;
