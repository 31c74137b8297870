//! Interactive chat application for talking to the Arth assistant.
//!
//! This binary provides a terminal REPL over the Arth chatbot endpoint,
//! with the same validation, quota, and typing behavior as the web widget.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! arth-chat
//!
//! # Point at a different deployment
//! arth-chat --base-url https://staging.arth.finance/
//!
//! # Allow more messages before the local quota refuses sends
//! arth-chat --quota 25
//!
//! # Disable colors (useful for piping output)
//! arth-chat --no-color
//! ```
//!
//! The session token is read from the `ARTH_SESSION_TOKEN` environment
//! variable each time a message is sent.
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/clear` - Clear the conversation view
//! - `/save <path>` - Save the transcript to a file
//! - `/stats` - Show session statistics
//! - `/quota` - Show remaining message quota
//! - `/config` - Show the current configuration
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use arth_assist::auth::{EnvSessionStore, SessionStore};
use arth_assist::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, SendOutcome,
    help_text, parse_command,
};
use arth_assist::{Arth, ClientLogger, Error, QueryRequest, QueryResponse};

/// Main entry point for the arth-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("arth-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let timeout = config.timeout_secs.map(Duration::from_secs);
    let mut client = Arth::with_options(config.base_url.clone(), timeout)?;
    if config.verbose {
        client = client.with_logger(Arc::new(StderrLogger));
    }
    let store: Arc<dyn SessionStore> = Arc::new(EnvSessionStore);
    let mut session = ChatSession::with_transport(client, config, store);
    let mut renderer = PlainTextRenderer::with_color(use_color).with_user_echo(false);
    let mut rl = DefaultEditor::new()?;

    // Flag for dropping a pending reply on Ctrl+C
    let closed = session.close_flag();

    // Set up Ctrl+C handler
    let closed_clone = closed.clone();
    ctrlc::set_handler(move || {
        closed_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Arth Assistant");
    println!("Type /help for commands, /quit to exit\n");
    session.replay(&mut renderer);

    loop {
        // Reset the close flag before each input
        closed.store(false, Ordering::Relaxed);

        let readline = rl.readline("you> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Conversation cleared.");
                            session.replay(&mut renderer);
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::SaveTranscript(path) => {
                            match session.save_transcript_to(&path) {
                                Ok(_) => {
                                    renderer.print_info(&format!("Transcript saved to {}", path))
                                }
                                Err(err) => renderer
                                    .print_error(&format!("Failed to save transcript: {}", err)),
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::Quota => {
                            print_quota(&session);
                        }
                        ChatCommand::ShowConfig => {
                            print_config(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the assistant
                let outcome = session.send(line, &mut renderer).await;
                if matches!(outcome, SendOutcome::Dropped) {
                    renderer.print_info("(reply discarded)");
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats(session: &ChatSession<Arth>) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Messages: {}", stats.message_count);
    println!("      Requests: {}", stats.request_count);
    println!("      Replies: {}", stats.reply_count);
    println!("      Failures: {}", stats.failure_count);
    println!(
        "      Quota: {}/{} remaining",
        stats.quota_remaining, stats.quota_limit
    );
    println!("      Quota reset: {}", describe_reset(stats.quota_reset_in));
}

fn print_quota(session: &ChatSession<Arth>) {
    let stats = session.stats();
    println!(
        "    Quota: {}/{} remaining",
        stats.quota_remaining, stats.quota_limit
    );
    println!("    Reset: {}", describe_reset(stats.quota_reset_in));
}

fn print_config(session: &ChatSession<Arth>) {
    let config = session.config();
    println!("    Current Configuration:");
    println!(
        "      Base URL: {}",
        config.base_url.as_deref().unwrap_or("(default)")
    );
    println!(
        "      Timeout: {}",
        config
            .timeout_secs
            .map(|t| format!("{t}s"))
            .unwrap_or_else(|| "default".to_string())
    );
    println!("      Quota limit: {}", config.quota_limit);
    println!(
        "      Colors: {}",
        if config.use_color { "enabled" } else { "disabled" }
    );
    println!(
        "      Verbose logging: {}",
        if config.verbose { "enabled" } else { "disabled" }
    );
}

fn describe_reset(reset_in: Option<Duration>) -> String {
    reset_in
        .map(|wait| format!("in {}s", wait.as_secs()))
        .unwrap_or_else(|| "not scheduled".to_string())
}

/// Logs request traffic to stderr when `--verbose` is set.
struct StderrLogger;

impl ClientLogger for StderrLogger {
    fn log_request(&self, request: &QueryRequest) {
        eprintln!(
            "[arth] sending query ({} chars)",
            request.query.chars().count()
        );
    }

    fn log_response(&self, response: &QueryResponse) {
        eprintln!("[arth] response: success={}", response.success);
    }

    fn log_error(&self, err: &Error) {
        eprintln!("[arth] error: {}", err);
    }
}
