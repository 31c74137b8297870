use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use arth_assist::auth::MemorySessionStore;
use arth_assist::chat::{ChatConfig, ChatSession, PlainTextRenderer};
use arth_assist::{QueryRequest, QueryTransport, Result};

/// Answers every query from a canned script instead of the network.
struct ScriptedTransport {
    replies: Mutex<VecDeque<&'static str>>,
}

#[async_trait::async_trait]
impl QueryTransport for ScriptedTransport {
    async fn query(&self, _token: &str, _request: QueryRequest) -> Result<String> {
        let mut replies = self.replies.lock().unwrap();
        let reply = replies.pop_front().unwrap_or("That's everything I know.");
        Ok(reply.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let transport = ScriptedTransport {
        replies: Mutex::new(VecDeque::from([
            "You spent ₹4,250 on food this week, mostly on delivery.",
            "Done. I set a monthly grocery budget of ₹8,000.",
        ])),
    };

    let config = ChatConfig::new().with_quota_limit(5);
    let store = Arc::new(MemorySessionStore::with_token("demo-token"));
    let mut session = ChatSession::with_transport(transport, config, store);
    let mut renderer = PlainTextRenderer::new();

    // Replay prints the welcome message that seeds every session
    session.replay(&mut renderer);

    session
        .send("What did I spend on food this week?", &mut renderer)
        .await;

    // Greetings are rejected locally; a banner shows and no request is made
    session.send("hi", &mut renderer).await;

    session
        .send("Set a budget for groceries", &mut renderer)
        .await;

    Ok(())
}
