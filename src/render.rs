//! Output rendering for chat sessions.
//!
//! This module provides the renderer trait and a plain-text implementation
//! used by the terminal front end and the demos.

use std::io::{self, Stdout, Write};

use crate::types::{ChatMessage, MessageKind};

/// ANSI escape code for dim text (used for the typing indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for the typing indicator).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the assistant prompt).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for validation banners).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for red text (used for error entries).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code to erase the current line (used to clear the typing
/// indicator).
const ANSI_CLEAR_LINE: &str = "\x1b[2K";

////////////////////////////////////////////// Renderer ///////////////////////////////////////////

/// Trait for rendering session output.
///
/// The session drives the renderer as the conversation unfolds: one call per
/// transcript entry, plus notifications for the transient validation banner
/// and the typing indicator. This abstraction allows for different rendering
/// strategies: ANSI-styled terminal output, unstyled output for piping, or a
/// recording sink in tests.
pub trait Renderer: Send {
    /// Called when a message is appended to the transcript.
    fn print_message(&mut self, message: &ChatMessage);

    /// Called when a validation banner appears.
    ///
    /// The banner is transient; it is not part of the transcript.
    fn print_banner(&mut self, text: &str);

    /// Called when the typing indicator appears.
    fn start_typing(&mut self) {}

    /// Called when the typing indicator clears.
    fn finish_typing(&mut self) {}

    /// Print an informational message outside the transcript.
    fn print_info(&mut self, info: &str);

    /// Print an error message outside the transcript.
    fn print_error(&mut self, error: &str);
}

////////////////////////////////////////// PlainTextRenderer //////////////////////////////////////

/// Plain text renderer with optional ANSI styling.
///
/// User messages can be echoed or suppressed; the terminal front end
/// suppresses them because the user's own input is already on screen.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    echo_user: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
            echo_user: true,
        }
    }

    /// Creates a new PlainTextRenderer with the specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            echo_user: true,
        }
    }

    /// Sets whether user messages are echoed back as they are appended.
    pub fn with_user_echo(mut self, echo_user: bool) -> Self {
        self.echo_user = echo_user;
        self
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, message: &ChatMessage) {
        match message.kind {
            MessageKind::Query => {
                if self.echo_user {
                    println!("you> {}", message.text);
                }
            }
            MessageKind::Welcome | MessageKind::Response => {
                if self.use_color {
                    println!("{ANSI_CYAN}arth>{ANSI_RESET} {}", message.text);
                } else {
                    println!("arth> {}", message.text);
                }
            }
            MessageKind::Error => {
                if self.use_color {
                    println!("{ANSI_RED}arth> {}{ANSI_RESET}", message.text);
                } else {
                    println!("arth> {}", message.text);
                }
            }
        }
        self.flush();
    }

    fn print_banner(&mut self, text: &str) {
        if self.use_color {
            println!("{ANSI_YELLOW}! {text}{ANSI_RESET}");
        } else {
            println!("! {text}");
        }
        self.flush();
    }

    fn start_typing(&mut self) {
        if self.use_color {
            print!("{ANSI_DIM}{ANSI_ITALIC}arth is typing...{ANSI_RESET}");
        } else {
            print!("arth is typing...");
        }
        self.flush();
    }

    fn finish_typing(&mut self) {
        if self.use_color {
            print!("\r{ANSI_CLEAR_LINE}");
        } else {
            println!();
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("\nError: {error}");
    }
}
