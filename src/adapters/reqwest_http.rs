//! Reqwest-based HTTP client adapter.
//!
//! This module provides the production HTTP client implementation using
//! reqwest, implementing the [`HttpClient`] trait from `crate::traits`.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::headers::HeaderSet;
use crate::models::HttpMethod;
use crate::traits::{HttpClient, HttpError, HttpRequest, Response};

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client implementation using reqwest.
///
/// Every request is bounded by the configured timeout; expiry surfaces as
/// [`HttpError::Timeout`].
///
/// # Example
///
/// ```ignore
/// use apibench::adapters::ReqwestHttpClient;
/// use apibench::traits::HttpClient;
///
/// let client = ReqwestHttpClient::new();
/// let response = client.send(request).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with the default 30 second timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Convert reqwest error to HttpError, keeping the whole source chain.
    fn convert_error(err: reqwest::Error) -> HttpError {
        let message = Self::describe(&err);
        if err.is_timeout() {
            HttpError::Timeout(message)
        } else if err.is_connect() {
            HttpError::ConnectionFailed(message)
        } else if err.is_builder() {
            HttpError::InvalidRequest(message)
        } else {
            HttpError::Other(message)
        }
    }

    fn describe(err: &reqwest::Error) -> String {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    fn convert_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
        }
    }

    /// Convert reqwest headers to a HeaderSet, joining repeated names.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> HeaderSet {
        let mut converted = HeaderSet::new();
        for (name, value) in headers {
            converted.append_joined(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        converted
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &HeaderSet,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers.iter() {
            builder = builder.header(key, value);
        }
        builder
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<Response, HttpError> {
        let builder = self
            .client
            .request(Self::convert_method(request.method), &request.url)
            .timeout(self.timeout);
        let builder = Self::apply_headers(builder, &request.headers);
        let builder = match request.body {
            Some(body) => builder.body(body),
            None => builder,
        };

        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status();
        debug!("{} {} -> {}", request.method, request.url, status);
        let response_headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status.as_u16(), response_headers, body)
            .with_reason(status.canonical_reason().unwrap_or_default()))
    }
}
