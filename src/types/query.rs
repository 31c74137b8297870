use serde::{Deserialize, Serialize};

///////////////////////////////////////////// QueryRequest ////////////////////////////////////////

/// The request body sent to the assistant endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The user's question, already validated.
    pub query: String,
}

impl QueryRequest {
    /// Creates a new request with the given query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

//////////////////////////////////////////// QueryResponse ////////////////////////////////////////

/// The response body returned by the assistant endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Whether the backend answered the query.
    pub success: bool,

    /// The answer text on success, or a human-readable failure reason.
    pub message: String,
}

/////////////////////////////////////////////// tests /////////////////////////////////////////////
