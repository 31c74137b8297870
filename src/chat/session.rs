//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript,
//! enforces input and quota policy, and paces replies with the typing
//! simulation.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::Instant;

use crate::auth::SessionStore;
use crate::chat::config::ChatConfig;
use crate::client::{Arth, QueryTransport};
use crate::error::{Error, Result};
use crate::observability::{
    SESSION_BUSY_DROPS, SESSION_FAILURES, SESSION_QUOTA_REFUSALS, SESSION_REJECTED,
    SESSION_REPLIES, SESSION_SENDS, SESSION_TYPING_DELAY,
};
use crate::quota::QuotaTracker;
use crate::render::Renderer;
use crate::transcript::Transcript;
use crate::types::{ChatMessage, QueryRequest};
use crate::validate;

/// Typing-simulation pacing per reply character.
const TYPING_MS_PER_CHAR: u64 = 50;

/// Upper bound on the typing simulation.
const TYPING_CAP: Duration = Duration::from_millis(2000);

/// How long a validation banner stays visible.
const BANNER_DURATION: Duration = Duration::from_secs(3);

///////////////////////////////////////////// SendOutcome /////////////////////////////////////////

/// What became of a call to [`ChatSession::send`].
#[derive(Debug)]
pub enum SendOutcome {
    /// The input was discarded: a request was already in flight, or the
    /// session is closed.
    Dropped,

    /// Validation refused the input. A banner is showing and nothing was
    /// appended to the transcript.
    Rejected(Error),

    /// The send was attempted and failed. The user's entry and an error
    /// entry were appended.
    Failed(Error),

    /// The assistant answered and its reply was appended.
    Replied,
}

impl SendOutcome {
    /// Returns true if the assistant's reply landed in the transcript.
    pub fn is_replied(&self) -> bool {
        matches!(self, SendOutcome::Replied)
    }
}

///////////////////////////////////////////// ChatSession /////////////////////////////////////////

/// A chat session that owns the transcript and enforces send policy.
///
/// One session corresponds to one conversation view: the transcript starts
/// with a greeting and grows monotonically until [`ChatSession::clear`]
/// starts a fresh view. At most one send is in flight at a time; input
/// arriving while busy is dropped rather than queued.
pub struct ChatSession<T: QueryTransport> {
    transport: T,
    store: Arc<dyn SessionStore>,
    config: ChatConfig,
    transcript: Transcript,
    quota: QuotaTracker,
    busy: bool,
    closed: Arc<AtomicBool>,
    banner: Option<Banner>,
    request_count: u64,
    reply_count: u64,
    failure_count: u64,
}

struct Banner {
    text: String,
    expires_at: Instant,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The number of messages in the transcript.
    pub message_count: usize,
    /// Requests issued to the backend.
    pub request_count: u64,
    /// Sends that ended with a reply in the transcript.
    pub reply_count: u64,
    /// Sends that ended with an error entry in the transcript.
    pub failure_count: u64,
    /// Sends remaining in the current rate-limit window.
    pub quota_remaining: u8,
    /// The per-window quota limit.
    pub quota_limit: u8,
    /// Time until the quota refills, if a reset is pending.
    pub quota_reset_in: Option<Duration>,
}

impl ChatSession<Arth> {
    /// Creates a new session backed by the production client.
    pub fn new(config: ChatConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        let client = Arth::with_options(config.base_url.clone(), timeout)?;
        Ok(Self::with_transport(client, config, store))
    }
}

impl<T: QueryTransport> ChatSession<T> {
    /// Creates a new session with a custom transport.
    pub fn with_transport(transport: T, config: ChatConfig, store: Arc<dyn SessionStore>) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::welcome(config.welcome_message.clone()));
        let quota = QuotaTracker::new(config.quota_limit);
        Self {
            transport,
            store,
            config,
            transcript,
            quota,
            busy: false,
            closed: Arc::new(AtomicBool::new(false)),
            banner: None,
            request_count: 0,
            reply_count: 0,
            failure_count: 0,
        }
    }

    /// Sends a user message and records the outcome in the transcript.
    ///
    /// The flow per send:
    /// 1. Drop the input if a send is already in flight or the session is
    ///    closed.
    /// 2. Validate the input; a rejection shows a transient banner and
    ///    appends nothing.
    /// 3. Append the user's entry before any network latency.
    /// 4. Refuse locally when the quota window is exhausted, refuse when no
    ///    session token is present, and otherwise issue the query.
    /// 5. On an answer, pace its arrival with the typing simulation and
    ///    append it; on a failure, append an error entry immediately. A
    ///    session closed while the call was out appends nothing either way.
    ///
    /// Failures are recorded in the transcript rather than returned as
    /// `Err`; the outcome says which path was taken.
    pub async fn send(&mut self, input: &str, renderer: &mut dyn Renderer) -> SendOutcome {
        SESSION_SENDS.click();
        if self.busy || self.is_closed() {
            SESSION_BUSY_DROPS.click();
            return SendOutcome::Dropped;
        }

        let text = match validate::validate(input) {
            Ok(text) => text,
            Err(err) => {
                SESSION_REJECTED.click();
                self.show_banner(err.user_message(), renderer);
                return SendOutcome::Rejected(err);
            }
        };

        self.append(ChatMessage::user(text.clone()), renderer);
        self.busy = true;

        match self.attempt(text).await {
            Ok(reply) => {
                let delay = typing_delay(&reply);
                SESSION_TYPING_DELAY.add(delay.as_secs_f64());
                renderer.start_typing();
                tokio::time::sleep(delay).await;
                renderer.finish_typing();
                if self.is_closed() {
                    // The view went away while the reply was being paced.
                    self.busy = false;
                    return SendOutcome::Dropped;
                }
                SESSION_REPLIES.click();
                self.reply_count += 1;
                self.append(ChatMessage::bot_response(reply), renderer);
                self.busy = false;
                SendOutcome::Replied
            }
            Err(err) => {
                if self.is_closed() {
                    // The view went away while the request was out.
                    self.busy = false;
                    return SendOutcome::Dropped;
                }
                SESSION_FAILURES.click();
                self.failure_count += 1;
                self.append(ChatMessage::bot_error(err.user_message()), renderer);
                self.busy = false;
                SendOutcome::Failed(err)
            }
        }
    }

    /// Runs the quota, token, and wire stages of a send.
    ///
    /// All quota bookkeeping happens here, next to the call that the server
    /// actually sees.
    async fn attempt(&mut self, text: String) -> Result<String> {
        self.quota.check().map_err(|err| {
            SESSION_QUOTA_REFUSALS.click();
            err
        })?;

        let token = match self.store.session_token() {
            Some(token) => token,
            None => return Err(Error::NotAuthenticated),
        };

        self.request_count += 1;
        match self.transport.query(&token, QueryRequest::new(text)).await {
            Ok(reply) => {
                self.quota.record_success();
                Ok(reply)
            }
            Err(err) => {
                if let Error::RateLimited { retry_after, .. } = &err {
                    self.quota.record_rate_limited(*retry_after);
                }
                Err(err)
            }
        }
    }

    fn show_banner(&mut self, text: String, renderer: &mut dyn Renderer) {
        renderer.print_banner(&text);
        self.banner = Some(Banner {
            text,
            expires_at: Instant::now() + BANNER_DURATION,
        });
    }

    fn append(&mut self, message: ChatMessage, renderer: &mut dyn Renderer) {
        renderer.print_message(&message);
        self.transcript.push(message);
    }

    /// The active validation banner, if its display window is still open.
    pub fn banner(&mut self) -> Option<&str> {
        if self
            .banner
            .as_ref()
            .is_some_and(|banner| Instant::now() >= banner.expires_at)
        {
            self.banner = None;
        }
        self.banner.as_ref().map(|banner| banner.text.as_str())
    }

    /// Starts a fresh conversation view.
    ///
    /// The transcript is replaced and reseeded with the greeting. Quota
    /// state survives; the server's window does not reset with our view.
    pub fn clear(&mut self) {
        self.transcript = Transcript::new();
        self.transcript
            .push(ChatMessage::welcome(self.config.welcome_message.clone()));
        self.banner = None;
    }

    /// Renders every transcript entry in order.
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        for message in &self.transcript {
            renderer.print_message(message);
        }
    }

    /// Marks the session closed; subsequent sends drop their input.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }

    /// Returns true once the session is closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    /// The flag behind [`ChatSession::close`], for wiring into a signal
    /// handler or another task.
    pub fn close_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    /// Returns true while a send is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The conversation so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the number of messages in the transcript.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Saves the transcript to the specified path.
    pub fn save_transcript_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.transcript.save_to(path)
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            message_count: self.transcript.len(),
            request_count: self.request_count,
            reply_count: self.reply_count,
            failure_count: self.failure_count,
            quota_remaining: self.quota.remaining(),
            quota_limit: self.quota.limit(),
            quota_reset_in: self.quota.reset_in(),
        }
    }
}

/// The pacing delay applied before a reply appears.
fn typing_delay(reply: &str) -> Duration {
    let chars = reply.chars().count() as u64;
    Duration::from_millis(chars * TYPING_MS_PER_CHAR).min(TYPING_CAP)
}

/////////////////////////////////////////////// tests /////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use tokio::time::advance;

    use super::*;
    use crate::auth::MemorySessionStore;
    use crate::types::{MessageKind, Sender};

    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<String>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl QueryTransport for ScriptedTransport {
        async fn query(&self, token: &str, request: QueryRequest) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((token.to_string(), request.query.clone()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::request_failed("no scripted reply")))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        messages: Vec<ChatMessage>,
        banners: Vec<String>,
        typing_starts: usize,
        typing_finishes: usize,
    }

    impl Renderer for RecordingRenderer {
        fn print_message(&mut self, message: &ChatMessage) {
            self.messages.push(message.clone());
        }

        fn print_banner(&mut self, text: &str) {
            self.banners.push(text.to_string());
        }

        fn start_typing(&mut self) {
            self.typing_starts += 1;
        }

        fn finish_typing(&mut self) {
            self.typing_finishes += 1;
        }

        fn print_info(&mut self, _info: &str) {}

        fn print_error(&mut self, _error: &str) {}
    }

    fn logged_in() -> Arc<MemorySessionStore> {
        Arc::new(MemorySessionStore::with_token("tok-123"))
    }

    fn session_with(
        replies: Vec<Result<String>>,
    ) -> (Arc<ScriptedTransport>, ChatSession<Arc<ScriptedTransport>>) {
        let transport = Arc::new(ScriptedTransport::new(replies));
        let session =
            ChatSession::with_transport(Arc::clone(&transport), ChatConfig::new(), logged_in());
        (transport, session)
    }

    #[test]
    fn new_session_seeds_the_greeting() {
        let (_, session) = session_with(vec![]);
        assert_eq!(session.message_count(), 1);
        let welcome = &session.transcript().messages()[0];
        assert_eq!(welcome.sender, Sender::Bot);
        assert_eq!(welcome.kind, MessageKind::Welcome);
        assert_eq!(welcome.text, session.config().welcome_message);
    }

    #[tokio::test(start_paused = true)]
    async fn successful_round_trip_appends_user_then_reply() {
        let (transport, mut session) =
            session_with(vec![Ok("You spent ₹500".to_string())]);
        let mut renderer = RecordingRenderer::default();

        let started = Instant::now();
        let outcome = session.send("Show my expenses this month", &mut renderer).await;
        let elapsed = started.elapsed();

        assert!(outcome.is_replied());
        // 14 reply characters at 50ms apiece.
        assert_eq!(elapsed, Duration::from_millis(700));

        let kinds: Vec<MessageKind> = session
            .transcript()
            .messages()
            .iter()
            .map(|m| m.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![MessageKind::Welcome, MessageKind::Query, MessageKind::Response]
        );
        assert_eq!(session.transcript().last().unwrap().text, "You spent ₹500");

        assert_eq!(renderer.typing_starts, 1);
        assert_eq!(renderer.typing_finishes, 1);
        assert_eq!(
            transport.calls(),
            vec![("tok-123".to_string(), "Show my expenses this month".to_string())]
        );
        assert!(!session.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn long_replies_cap_the_typing_delay() {
        let (_, mut session) = session_with(vec![Ok("x".repeat(400))]);
        let mut renderer = RecordingRenderer::default();

        let started = Instant::now();
        let outcome = session.send("list every transaction", &mut renderer).await;

        assert!(outcome.is_replied());
        assert_eq!(started.elapsed(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn input_is_trimmed_before_recording_and_sending() {
        let (transport, mut session) = session_with(vec![Ok("done".to_string())]);
        let mut renderer = RecordingRenderer::default();

        session.send("  show my budget  \n", &mut renderer).await;

        assert_eq!(
            session.transcript().messages()[1].text,
            "show my budget"
        );
        assert_eq!(transport.calls()[0].1, "show my budget");
    }

    #[tokio::test(start_paused = true)]
    async fn validation_rejection_shows_a_banner_and_appends_nothing() {
        let (transport, mut session) = session_with(vec![]);
        let mut renderer = RecordingRenderer::default();

        let outcome = session.send("hi", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Rejected(Error::OffTopic { .. })));

        assert_eq!(session.message_count(), 1);
        assert_eq!(transport.call_count(), 0);
        assert_eq!(renderer.banners.len(), 1);
        assert_eq!(
            session.banner(),
            Some("I can only help with your tasks, budgets, and spending in Arth.")
        );

        // The banner clears itself after three seconds.
        advance(Duration::from_secs(3)).await;
        assert_eq!(session.banner(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_and_oversized_inputs_reject_without_side_effects() {
        let (transport, mut session) = session_with(vec![]);
        let mut renderer = RecordingRenderer::default();

        let outcome = session.send("   ", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Rejected(Error::EmptyInput)));

        let outcome = session.send(&"a".repeat(501), &mut renderer).await;
        assert!(matches!(
            outcome,
            SendOutcome::Rejected(Error::TooLong { length: 501 })
        ));

        assert_eq!(session.message_count(), 1);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_token_records_a_login_error() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let mut session = ChatSession::with_transport(
            Arc::clone(&transport),
            ChatConfig::new(),
            Arc::new(MemorySessionStore::logged_out()),
        );
        let mut renderer = RecordingRenderer::default();

        // "hi there" is on-topic; only the remote call stage refuses it.
        let outcome = session.send("hi there", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Failed(Error::NotAuthenticated)));

        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].kind, MessageKind::Query);
        assert_eq!(messages[2].kind, MessageKind::Error);
        assert_eq!(messages[2].text, "Please log in to continue...");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn server_429_exhausts_the_quota_until_the_window_resets() {
        let (transport, mut session) = session_with(vec![
            Err(Error::rate_limited("too many requests", None)),
            Ok("back in business".to_string()),
        ]);
        let mut renderer = RecordingRenderer::default();

        let outcome = session.send("show my tasks", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Failed(Error::RateLimited { .. })));
        assert_eq!(
            session.transcript().last().unwrap().text,
            "You're sending messages too quickly. Please wait a minute and try again."
        );
        assert_eq!(session.stats().quota_remaining, 0);

        // Still inside the window: refused locally, nothing hits the wire.
        let outcome = session.send("show my tasks", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Failed(Error::RateLimited { .. })));
        assert_eq!(transport.call_count(), 1);

        advance(Duration::from_secs(60)).await;
        let outcome = session.send("show my tasks", &mut renderer).await;
        assert!(outcome.is_replied());
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_quota_without_a_deadline_still_reaches_the_server() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok("one".to_string()),
            Ok("two".to_string()),
            Ok("three".to_string()),
        ]));
        let config = ChatConfig::new().with_quota_limit(2);
        let mut session =
            ChatSession::with_transport(Arc::clone(&transport), config, logged_in());
        let mut renderer = RecordingRenderer::default();

        session.send("first question", &mut renderer).await;
        session.send("second question", &mut renderer).await;
        assert_eq!(session.stats().quota_remaining, 0);

        // No 429 has taught us a deadline, so the server gets to decide.
        let outcome = session.send("third question", &mut renderer).await;
        assert!(outcome.is_replied());
        assert_eq!(transport.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_entries_use_the_user_facing_message() {
        let (_, mut session) = session_with(vec![Err(Error::server_error(
            "stack trace at QueryHandler.scala:412",
            Some("req-42".to_string()),
        ))]);
        let mut renderer = RecordingRenderer::default();

        session.send("show my budget", &mut renderer).await;
        assert_eq!(
            session.transcript().last().unwrap().text,
            "Something went wrong on our side. Please try again."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unsuccessful_200_surfaces_the_server_message() {
        let (_, mut session) = session_with(vec![Err(Error::request_failed(
            "I couldn't understand that question.",
        ))]);
        let mut renderer = RecordingRenderer::default();

        let outcome = session.send("show my budget", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Failed(Error::RequestFailed { .. })));
        assert_eq!(
            session.transcript().last().unwrap().text,
            "I couldn't understand that question."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn busy_session_drops_input() {
        let (transport, mut session) = session_with(vec![]);
        let mut renderer = RecordingRenderer::default();

        session.busy = true;
        let outcome = session.send("show my budget", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Dropped));
        assert_eq!(session.message_count(), 1);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_session_drops_input() {
        let (_, mut session) = session_with(vec![]);
        let mut renderer = RecordingRenderer::default();

        session.close();
        let outcome = session.send("show my budget", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Dropped));
        assert_eq!(session.message_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_during_the_typing_simulation_drops_the_reply() {
        // 40 characters buys a full two-second pacing window.
        let (_, mut session) = session_with(vec![Ok("x".repeat(40))]);
        let closed = session.close_flag();

        let handle = tokio::spawn(async move {
            let mut renderer = RecordingRenderer::default();
            let outcome = session.send("show my spending", &mut renderer).await;
            (session, outcome)
        });

        // Let the request finish and the pacing timer start, then close.
        tokio::time::sleep(Duration::from_millis(100)).await;
        closed.store(true, Ordering::Relaxed);

        let (session, outcome) = handle.await.unwrap();
        assert!(matches!(outcome, SendOutcome::Dropped));
        // Welcome and user entry only; the reply never landed.
        assert_eq!(session.message_count(), 2);
        assert!(!session.is_busy());
    }

    /// Transport that stalls before failing, leaving room to interleave
    /// teardown with the in-flight request.
    struct StalledFailureTransport;

    #[async_trait::async_trait]
    impl QueryTransport for StalledFailureTransport {
        async fn query(&self, _: &str, _: QueryRequest) -> Result<String> {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Err(Error::server_error("backend went away", None))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn closing_during_a_failing_request_drops_the_error_entry() {
        let mut session =
            ChatSession::with_transport(StalledFailureTransport, ChatConfig::new(), logged_in());
        let closed = session.close_flag();

        let handle = tokio::spawn(async move {
            let mut renderer = RecordingRenderer::default();
            let outcome = session.send("show my spending", &mut renderer).await;
            (session, outcome, renderer)
        });

        // Close while the request is still out.
        tokio::time::sleep(Duration::from_millis(100)).await;
        closed.store(true, Ordering::Relaxed);

        let (session, outcome, renderer) = handle.await.unwrap();
        assert!(matches!(outcome, SendOutcome::Dropped));
        // Welcome and user entry only; the failure never landed.
        assert_eq!(session.message_count(), 2);
        assert_eq!(renderer.messages.len(), 1);
        assert_eq!(renderer.messages[0].kind, MessageKind::Query);
        assert_eq!(session.stats().failure_count, 0);
        assert!(!session.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn transcript_keeps_causal_order_across_round_trips() {
        let (_, mut session) = session_with(vec![
            Ok("answer one".to_string()),
            Ok("answer two".to_string()),
        ]);
        let mut renderer = RecordingRenderer::default();

        session.send("question one", &mut renderer).await;
        session.send("question two", &mut renderer).await;

        let texts: Vec<&str> = session
            .transcript()
            .messages()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(
            texts[1..],
            ["question one", "answer one", "question two", "answer two"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn clear_starts_a_fresh_view_but_keeps_quota_state() {
        let (transport, mut session) =
            session_with(vec![Err(Error::rate_limited("too many", None))]);
        let mut renderer = RecordingRenderer::default();

        session.send("show my tasks", &mut renderer).await;
        assert_eq!(session.message_count(), 3);

        session.clear();
        assert_eq!(session.message_count(), 1);
        assert_eq!(
            session.transcript().messages()[0].kind,
            MessageKind::Welcome
        );

        // The server's window did not reset with the view.
        let outcome = session.send("show my tasks", &mut renderer).await;
        assert!(matches!(outcome, SendOutcome::Failed(Error::RateLimited { .. })));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stats_reflect_the_session_so_far() {
        let (_, mut session) = session_with(vec![
            Ok("fine".to_string()),
            Err(Error::server_error("boom", None)),
        ]);
        let mut renderer = RecordingRenderer::default();

        session.send("first question", &mut renderer).await;
        session.send("second question", &mut renderer).await;
        session.send("hi", &mut renderer).await;

        let stats = session.stats();
        assert_eq!(stats.message_count, 5);
        assert_eq!(stats.request_count, 2);
        assert_eq!(stats.reply_count, 1);
        assert_eq!(stats.failure_count, 1);
        assert_eq!(stats.quota_remaining, stats.quota_limit - 1);
        assert!(stats.quota_reset_in.is_none());
    }
}
