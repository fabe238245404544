//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for issuing one-shot HTTP requests,
//! enabling dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use encoding_rs::Encoding;

use crate::headers::HeaderSet;
use crate::models::HttpMethod;

/// A fully validated request, ready for the wire.
///
/// An empty header set and an absent body are sent as nothing at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderSet,
    pub body: Option<String>,
}

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase reported for the status
    pub reason: String,
    /// Response headers, repeated names joined with `", "`
    pub headers: HeaderSet,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            reason: String::new(),
            headers: HeaderSet::new(),
            body: body.into(),
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: HeaderSet, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            reason: String::new(),
            headers,
            body: body.into(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Charset named by the `Content-Type` header, if any.
    pub fn charset(&self) -> Option<&str> {
        let content_type = self
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value)?;
        content_type.split(';').skip(1).find_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches('"'))
        })
    }

    /// Decode the body using the declared charset, UTF-8 when none.
    ///
    /// Decoding is strict: malformed input is an error, never replaced.
    pub fn text(&self) -> Result<String, HttpError> {
        let label = self.charset().unwrap_or("utf-8");
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| HttpError::Decode(format!("unsupported charset '{}'", label)))?;
        encoding
            .decode_without_bom_handling_and_without_replacement(&self.body)
            .map(|text| text.into_owned())
            .ok_or_else(|| {
                HttpError::Decode(format!("response body is not valid {}", encoding.name()))
            })
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Connection failed (DNS, refused, TLS)
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// The request could not be built (bad URL, bad header name or value)
    InvalidRequest(String),
    /// Response body could not be decoded
    Decode(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            HttpError::Decode(msg) => write!(f, "Decode error: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// Implementations own their transport resources for the duration of one
/// call; concurrent calls do not interact.
///
/// # Example
///
/// ```ignore
/// use apibench::traits::{HttpClient, HttpRequest};
///
/// async fn fetch<C: HttpClient>(client: &C, request: HttpRequest) -> Result<String, HttpError> {
///     client.send(request).await?.text()
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a request and read the whole response body.
    async fn send(&self, request: HttpRequest) -> Result<Response, HttpError>;
}
