use arth_assist::auth::{EnvSessionStore, SessionStore};
use arth_assist::{Arth, QueryRequest, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Create a client against the default deployment
    let client = Arth::new()?;

    // The web widget reads the token from browser session storage; here we
    // read it from the ARTH_SESSION_TOKEN environment variable.
    let token = match EnvSessionStore.session_token() {
        Some(token) => token,
        None => {
            eprintln!("Set ARTH_SESSION_TOKEN to run this example.");
            return Ok(());
        }
    };

    // Send a single question and print the assistant's reply
    let request = QueryRequest::new("How much did I spend on groceries this month?");
    let reply = client.query(&token, request).await?;
    println!("arth> {}", reply);

    Ok(())
}
