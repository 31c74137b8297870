//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling session behavior.

use arrrg_derive::CommandLine;

use crate::quota::DEFAULT_QUOTA_LIMIT;

/// Default greeting seeded into every new session.
const DEFAULT_WELCOME: &str =
    "Hi! I'm your Arth assistant. Ask me about your tasks, budgets, or spending.";

/// Command-line arguments for the arth-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the Arth app.
    #[arrrg(
        optional,
        "Base URL of the Arth app (default: https://app.arth.finance/)",
        "URL"
    )]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 30)", "SECONDS")]
    pub timeout: Option<u32>,

    /// Requests allowed per rate-limit window.
    #[arrrg(optional, "Requests allowed per rate-limit window (default: 10)", "COUNT")]
    pub quota: Option<u32>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log requests, responses, and errors to stderr.
    #[arrrg(flag, "Log requests, responses, and errors to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL of the Arth app, or `None` for the production endpoint.
    pub base_url: Option<String>,

    /// Request timeout in seconds, or `None` for the default.
    pub timeout_secs: Option<u64>,

    /// Requests allowed per rate-limit window.
    pub quota_limit: u8,

    /// Greeting seeded into the transcript when a session starts.
    pub welcome_message: String,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether to log wire traffic to stderr.
    pub verbose: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Endpoint: production
    /// - Quota: 10 requests per window
    /// - Color: enabled
    /// - Verbose: disabled
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout_secs: None,
            quota_limit: DEFAULT_QUOTA_LIMIT,
            welcome_message: DEFAULT_WELCOME.to_string(),
            use_color: true,
            verbose: false,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Sets the per-window quota limit.
    pub fn with_quota_limit(mut self, quota_limit: u8) -> Self {
        self.quota_limit = quota_limit;
        self
    }

    /// Sets the greeting seeded into new sessions.
    pub fn with_welcome_message(mut self, welcome_message: String) -> Self {
        self.welcome_message = welcome_message;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Enables wire-traffic logging to stderr.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let quota_limit = args
            .quota
            .map(|q| q.min(u8::MAX as u32) as u8)
            .unwrap_or(DEFAULT_QUOTA_LIMIT);

        ChatConfig {
            base_url: args.base_url,
            timeout_secs: args.timeout.map(u64::from),
            quota_limit,
            use_color: !args.no_color,
            verbose: args.verbose,
            ..ChatConfig::new()
        }
    }
}
