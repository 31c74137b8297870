use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{QueryRequest, QueryResponse};

const DEFAULT_APP_URL: &str = "https://app.arth.finance/";
const QUERY_PATH: &str = "api/chatbot/query";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/////////////////////////////////////////// QueryTransport ////////////////////////////////////////

/// The wire contract a chat session sends queries through.
///
/// [`Arth`] is the production implementation. Tests substitute their own to
/// script responses without a server.
#[async_trait::async_trait]
pub trait QueryTransport: Send + Sync {
    /// Issues a query with the given bearer token and returns the answer
    /// text.
    async fn query(&self, token: &str, request: QueryRequest) -> Result<String>;
}

/////////////////////////////////////////////// Arth //////////////////////////////////////////////

/// Client for the Arth assistant endpoint.
///
/// The client holds no credentials. The bearer token is passed into each
/// [`Arth::query`] call so that a login or logout between sends takes effect
/// immediately.
#[derive(Clone)]
pub struct Arth {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl Arth {
    /// Create a new client against the production endpoint.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    ///
    /// The base URL should end with a trailing slash; the query path is
    /// resolved against it.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.as_deref().unwrap_or(DEFAULT_APP_URL);
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::url(format!("Invalid base URL {base_url:?}: {e}"), Some(e)))?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every request, response, and error.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Create and return headers for a query carrying the given token.
    fn headers(&self, token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            Error::http_client(
                format!("Session token is not a valid header value: {}", e),
                Some(Box::new(e)),
            )
        })?;
        headers.insert(header::AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        // Get headers we might need for error processing
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|val| val.to_str().ok())
            .map(String::from);

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // The backend answers errors as JSON with a message field; proxies in
        // front of it sometimes answer plain text.
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            error: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let message = serde_json::from_str::<ErrorBody>(&error_body)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or(error_body);

        map_status(status_code, message, request_id, retry_after)
    }

    /// Send a query to the assistant and return the answer text.
    ///
    /// A 200 response with the success flag set yields the answer. Everything
    /// else maps onto the error taxonomy in [`Error`], including a 200 whose
    /// success flag is false.
    pub async fn query(&self, token: &str, request: QueryRequest) -> Result<String> {
        if let Some(logger) = &self.logger {
            logger.log_request(&request);
        }
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.issue(token, &request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        let result = result.and_then(|response| {
            if let Some(logger) = &self.logger {
                logger.log_response(&response);
            }
            if response.success {
                Ok(response.message)
            } else {
                Err(Error::request_failed(response.message))
            }
        });

        if let Err(err) = &result {
            CLIENT_REQUEST_ERRORS.click();
            if let Some(logger) = &self.logger {
                logger.log_error(err);
            }
        }
        result
    }

    async fn issue(&self, token: &str, request: &QueryRequest) -> Result<QueryResponse> {
        let url = self
            .base_url
            .join(QUERY_PATH)
            .map_err(|e| Error::url(format!("Failed to resolve query endpoint: {e}"), Some(e)))?;

        let response = self
            .client
            .post(url)
            .headers(self.headers(token)?)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::network(
                        format!(
                            "Request timed out after {}s: {}",
                            self.timeout.as_secs(),
                            e
                        ),
                        Some(Box::new(e)),
                    )
                } else if e.is_connect() {
                    Error::network(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<QueryResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

impl fmt::Debug for Arth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arth")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl QueryTransport for Arth {
    async fn query(&self, token: &str, request: QueryRequest) -> Result<String> {
        Arth::query(self, token, request).await
    }
}

#[async_trait::async_trait]
impl<T: QueryTransport + ?Sized> QueryTransport for Arc<T> {
    async fn query(&self, token: &str, request: QueryRequest) -> Result<String> {
        (**self).query(token, request).await
    }
}

/// Maps an HTTP error status to the failure it represents.
fn map_status(
    status_code: u16,
    message: String,
    request_id: Option<String>,
    retry_after: Option<u64>,
) -> Error {
    match status_code {
        401 => Error::session_expired(message),
        403 => Error::access_denied(message),
        404 => Error::service_unavailable(message),
        429 => Error::rate_limited(message, retry_after),
        500 => Error::server_error(message, request_id),
        _ => Error::unknown_status(status_code, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_client_creation() {
        // Default endpoint and timeout
        let client = Arth::new().unwrap();
        assert_eq!(client.base_url.as_str(), DEFAULT_APP_URL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        // Custom options
        let client = Arth::with_options(
            Some("https://staging.arth.finance/".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(client.base_url.as_str(), "https://staging.arth.finance/");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Arth::with_options(Some("not a url".to_string()), None).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }

    #[test]
    fn test_query_endpoint_resolution() {
        let client = Arth::new().unwrap();
        let url = client.base_url.join(QUERY_PATH).unwrap();
        assert_eq!(url.as_str(), "https://app.arth.finance/api/chatbot/query");
    }

    #[test]
    fn test_status_mapping() {
        let err = map_status(401, "token expired".to_string(), None, None);
        assert!(matches!(err, Error::SessionExpired { .. }));

        let err = map_status(403, "forbidden".to_string(), None, None);
        assert!(matches!(err, Error::AccessDenied { .. }));

        let err = map_status(404, "no such route".to_string(), None, None);
        assert!(matches!(err, Error::ServiceUnavailable { .. }));

        let err = map_status(429, "slow down".to_string(), None, Some(30));
        assert!(matches!(err, Error::RateLimited { .. }));
        assert_eq!(err.retry_after(), Some(30));

        let err = map_status(429, "slow down".to_string(), None, None);
        assert_eq!(err.retry_after(), None);

        let err = map_status(500, "boom".to_string(), Some("req-9".to_string()), None);
        match err {
            Error::ServerError { request_id, .. } => {
                assert_eq!(request_id.as_deref(), Some("req-9"));
            }
            other => panic!("expected ServerError, got {other:?}"),
        }

        let err = map_status(418, "teapot".to_string(), None, None);
        assert!(matches!(err, Error::UnknownServerError { .. }));
        assert_eq!(err.status_code(), Some(418));
    }

    #[tokio::test]
    #[ignore] // Ignore by default as this requires a live backend
    async fn test_query_live() {
        // This test requires a valid token in the ARTH_SESSION_TOKEN
        // environment variable, and optionally ARTH_BASE_URL.
        let token = match env::var("ARTH_SESSION_TOKEN") {
            Ok(token) => token,
            Err(_) => {
                println!("Skipping test_query_live: ARTH_SESSION_TOKEN not set");
                return;
            }
        };

        let client = Arth::with_options(env::var("ARTH_BASE_URL").ok(), None).unwrap();
        let answer = client
            .query(&token, QueryRequest::new("How much did I spend this week?"))
            .await
            .unwrap();
        assert!(!answer.is_empty());
    }
}
