//! Logging trait for assistant client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log all query traffic passing through the [`Arth`] client.
//!
//! [`Arth`]: crate::Arth

use crate::{Error, QueryRequest, QueryResponse};

/// A trait for logging assistant client operations.
///
/// Implement this trait to capture and record every query, its response, and
/// any failure along the way.
///
/// # Example
///
/// ```rust,ignore
/// use arth_assist::{ClientLogger, Error, QueryRequest, QueryResponse};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_request(&self, request: &QueryRequest) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Request: {}", serde_json::to_string(request).unwrap()).unwrap();
///     }
///
///     fn log_response(&self, response: &QueryResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Response: {}", serde_json::to_string(response).unwrap()).unwrap();
///     }
///
///     fn log_error(&self, err: &Error) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Error: {}", err).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a request about to be issued.
    ///
    /// This method is called once per query, after validation and quota
    /// checks have passed, immediately before the request goes out.
    fn log_request(&self, request: &QueryRequest);

    /// Log a successful response.
    ///
    /// This method is called once per query the server answered, with the
    /// deserialized [`QueryResponse`].
    fn log_response(&self, response: &QueryResponse);

    /// Log a failed query.
    ///
    /// This method is called once per query that did not produce an answer,
    /// with the [`Error`] describing why.
    fn log_error(&self, err: &Error);
}
