//! Error types for the arth-assist SDK.
//!
//! This module defines the failure taxonomy for the Arth assistant: local
//! input-validation failures, which surface as a transient banner, and
//! remote-call failures, which surface as an error entry in the transcript.
//! Nothing here is fatal to a session; every variant carries enough context
//! to produce the user-facing message shown in the chat UI.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// The main error type for the arth-assist SDK.
#[derive(Clone, Debug)]
pub enum Error {
    /// The message was blank after trimming.
    EmptyInput,

    /// The message exceeded the maximum query length.
    TooLong {
        /// Character count of the rejected input.
        length: usize,
    },

    /// The message matched the off-topic denylist.
    OffTopic {
        /// The denylist rule that matched.
        matched: String,
    },

    /// No session token was available when the remote call was attempted.
    NotAuthenticated,

    /// The server rejected the session token (HTTP 401).
    SessionExpired {
        /// Human-readable error message.
        message: String,
    },

    /// Rate limit exceeded, either locally pre-checked or reported by the
    /// server (HTTP 429).
    RateLimited {
        /// Human-readable error message.
        message: String,
        /// Time to wait before retrying, in seconds.
        retry_after: Option<u64>,
    },

    /// The server refused access to the assistant (HTTP 403).
    AccessDenied {
        /// Human-readable error message.
        message: String,
    },

    /// The query endpoint was not found (HTTP 404).
    ServiceUnavailable {
        /// Human-readable error message.
        message: String,
    },

    /// The server reported an internal failure (HTTP 500).
    ServerError {
        /// Human-readable error message.
        message: String,
        /// Request ID for debugging and support.
        request_id: Option<String>,
    },

    /// The server could not be reached at all.
    NetworkError {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The server answered with a status this client does not recognize.
    UnknownServerError {
        /// HTTP status code.
        status_code: u16,
        /// Human-readable error message.
        message: String,
    },

    /// The server answered 200 but flagged the query as unsuccessful.
    RequestFailed {
        /// Server-provided failure message.
        message: String,
    },

    /// Error during JSON serialization or deserialization.
    Serialization {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// HTTP client construction or request preparation error.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// A URL parsing or manipulation error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },

    /// I/O error (transcript export).
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },
}

impl Error {
    /// Creates a new too-long validation error.
    pub fn too_long(length: usize) -> Self {
        Error::TooLong { length }
    }

    /// Creates a new off-topic validation error.
    pub fn off_topic(matched: impl Into<String>) -> Self {
        Error::OffTopic {
            matched: matched.into(),
        }
    }

    /// Creates a new session-expired error.
    pub fn session_expired(message: impl Into<String>) -> Self {
        Error::SessionExpired {
            message: message.into(),
        }
    }

    /// Creates a new rate-limited error.
    pub fn rate_limited(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Error::RateLimited {
            message: message.into(),
            retry_after,
        }
    }

    /// Creates a new access-denied error.
    pub fn access_denied(message: impl Into<String>) -> Self {
        Error::AccessDenied {
            message: message.into(),
        }
    }

    /// Creates a new service-unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Error::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Creates a new server error.
    pub fn server_error(message: impl Into<String>, request_id: Option<String>) -> Self {
        Error::ServerError {
            message: message.into(),
            request_id,
        }
    }

    /// Creates a new network error.
    pub fn network(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::NetworkError {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new unknown-status error.
    pub fn unknown_status(status_code: u16, message: impl Into<String>) -> Self {
        Error::UnknownServerError {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a new request-failed error from a 200 response without the
    /// success flag.
    pub fn request_failed(message: impl Into<String>) -> Self {
        Error::RequestFailed {
            message: message.into(),
        }
    }

    /// Creates a new serialization error.
    pub fn serialization(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Serialization {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Returns true if this error came from local input validation.
    ///
    /// Validation failures surface as a transient banner; everything else
    /// becomes a transcript entry.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput | Error::TooLong { .. } | Error::OffTopic { .. }
        )
    }

    /// Returns true if this error is related to authentication.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::NotAuthenticated | Error::SessionExpired { .. })
    }

    /// Returns true if this error is related to rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }

    /// Returns true if this error means the server itself failed.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Error::ServerError { .. } | Error::ServiceUnavailable { .. }
        )
    }

    /// Returns the status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::UnknownServerError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns the retry-after hint associated with this error, if any.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns the message shown to the user for this failure.
    ///
    /// This is the text the chat UI displays, distinct from the diagnostic
    /// `Display` rendering. Server-provided failure messages pass through
    /// unaltered; everything else gets a fixed phrasing.
    pub fn user_message(&self) -> String {
        match self {
            Error::EmptyInput => "Please type a message first.".to_string(),
            Error::TooLong { .. } => {
                "Please keep your question under 500 characters.".to_string()
            }
            Error::OffTopic { .. } => {
                "I can only help with your tasks, budgets, and spending in Arth.".to_string()
            }
            Error::NotAuthenticated => "Please log in to continue...".to_string(),
            Error::SessionExpired { .. } => {
                "Your session has expired. Please log in again.".to_string()
            }
            Error::RateLimited { .. } => {
                "You're sending messages too quickly. Please wait a minute and try again."
                    .to_string()
            }
            Error::AccessDenied { .. } => {
                "You don't have access to the assistant.".to_string()
            }
            Error::ServiceUnavailable { .. } => {
                "The assistant is unavailable right now. Please try again later.".to_string()
            }
            Error::ServerError { .. } => {
                "Something went wrong on our side. Please try again.".to_string()
            }
            Error::NetworkError { .. } => {
                "Unable to reach Arth. Check your connection and try again.".to_string()
            }
            Error::UnknownServerError { status_code, .. } => {
                format!("Something unexpected happened (status {status_code}). Please try again.")
            }
            Error::RequestFailed { message } => message.clone(),
            Error::Serialization { .. } | Error::HttpClient { .. } | Error::Url { .. } => {
                "Something went wrong talking to Arth. Please try again.".to_string()
            }
            Error::Io { .. } => "Could not write the file.".to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => {
                write!(f, "Validation error: message is empty")
            }
            Error::TooLong { length } => {
                write!(f, "Validation error: message is {length} characters, max 500")
            }
            Error::OffTopic { matched } => {
                write!(f, "Validation error: off-topic (matched {matched})")
            }
            Error::NotAuthenticated => {
                write!(f, "Authentication error: no session token")
            }
            Error::SessionExpired { message } => {
                write!(f, "Session expired: {message}")
            }
            Error::RateLimited {
                message,
                retry_after,
            } => {
                if let Some(retry_after) = retry_after {
                    write!(
                        f,
                        "Rate limit exceeded: {message} (retry after {retry_after} seconds)"
                    )
                } else {
                    write!(f, "Rate limit exceeded: {message}")
                }
            }
            Error::AccessDenied { message } => {
                write!(f, "Access denied: {message}")
            }
            Error::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {message}")
            }
            Error::ServerError {
                message,
                request_id,
            } => {
                if let Some(request_id) = request_id {
                    write!(f, "Server error: {message} (Request ID: {request_id})")
                } else {
                    write!(f, "Server error: {message}")
                }
            }
            Error::NetworkError { message, .. } => {
                write!(f, "Network error: {message}")
            }
            Error::UnknownServerError {
                status_code,
                message,
            } => {
                write!(f, "Unexpected status {status_code}: {message}")
            }
            Error::RequestFailed { message } => {
                write!(f, "Request failed: {message}")
            }
            Error::Serialization { message, .. } => {
                write!(f, "Serialization error: {message}")
            }
            Error::HttpClient { message, .. } => {
                write!(f, "HTTP client error: {message}")
            }
            Error::Url { message, .. } => {
                write!(f, "URL error: {message}")
            }
            Error::Io { message, .. } => {
                write!(f, "I/O error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::NetworkError { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            Error::Io { source, .. } => Some(source.as_ref() as &(dyn error::Error + 'static)),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(format!("JSON error: {err}"), Some(Box::new(err)))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for arth-assist operations.
pub type Result<T> = std::result::Result<T, Error>;
