//! Session token lookup.
//!
//! The dashboard keeps the login token in browser session storage under a
//! fixed key. Here the same role is played by a [`SessionStore`] read at send
//! time, so a token that appears or disappears mid-session takes effect on
//! the next message rather than at construction.

use std::env;

/// The key the session token is persisted under.
pub const SESSION_TOKEN_KEY: &str = "ARTH_SESSION_TOKEN";

//////////////////////////////////////////// SessionStore /////////////////////////////////////////

/// Read-only access to the persisted session token.
///
/// `None` means the user is not logged in. This component never writes the
/// token; login and logout belong to the host application.
pub trait SessionStore: Send + Sync {
    /// The bearer token for the current session, if one is persisted.
    fn session_token(&self) -> Option<String>;
}

////////////////////////////////////////// EnvSessionStore ////////////////////////////////////////

/// Reads the token from the process environment under [`SESSION_TOKEN_KEY`].
///
/// An unset or empty variable reads as logged out.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSessionStore;

impl SessionStore for EnvSessionStore {
    fn session_token(&self) -> Option<String> {
        env::var(SESSION_TOKEN_KEY)
            .ok()
            .filter(|token| !token.is_empty())
    }
}

///////////////////////////////////////// MemorySessionStore //////////////////////////////////////

/// Holds a fixed token in memory.
///
/// Useful in tests and in hosts that manage login themselves.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    token: Option<String>,
}

impl MemorySessionStore {
    /// A store holding the given token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// A store with no token, mimicking a logged-out session.
    pub fn logged_out() -> Self {
        Self { token: None }
    }
}

impl SessionStore for MemorySessionStore {
    fn session_token(&self) -> Option<String> {
        self.token.clone()
    }
}

/////////////////////////////////////////////// tests /////////////////////////////////////////////
