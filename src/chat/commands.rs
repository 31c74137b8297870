//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the assistant.

/// A parsed chat command.
///
/// These commands control the chat session and are never sent to the
/// assistant.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Start a fresh conversation view.
    Clear,

    /// Save the current transcript to a specific file.
    SaveTranscript(String),

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Display session statistics (message count, request totals, etc.).
    Stats,

    /// Display the remaining rate-limit quota.
    Quota,

    /// Show the current configuration.
    ShowConfig,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use arth_assist::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/save chat.json").is_some());
/// assert!(parse_command("How much did I spend on food?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => ChatCommand::Clear,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        "stats" | "status" => ChatCommand::Stats,
        "quota" | "limit" => ChatCommand::Quota,
        "config" => ChatCommand::ShowConfig,
        "save" => match argument {
            Some(arg) => ChatCommand::SaveTranscript(arg.to_string()),
            None => ChatCommand::Invalid("/save requires a file path".to_string()),
        },
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /clear                 Start a fresh conversation
  /save <file>           Save the current transcript to a file
  /stats                 Show session statistics
  /quota                 Show remaining quota and reset time
  /config                Show current configuration
  /help                  Show this help message
  /quit                  Exit the chat"#
}
