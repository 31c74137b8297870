//! Chat application module for interactive assistant conversations.
//!
//! This module provides a terminal REPL built on top of the arth-assist
//! client library. It supports:
//!
//! - A transcript seeded with the assistant's greeting
//! - Input validation with transient banners
//! - Client-side rate-limit tracking
//! - Human-paced replies via the typing simulation
//! - Slash commands for session control
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and send policy
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatSession, SendOutcome, SessionStats};
