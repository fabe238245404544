//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{HttpClient, HttpError, HttpRequest, Response};

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response
    Success(Response),
    /// Return an error
    Error(HttpError),
}

/// Mock HTTP client for testing.
///
/// This client can be configured to return specific responses for URLs,
/// allowing tests to verify HTTP interactions without network access.
///
/// # Example
///
/// ```ignore
/// use apibench::adapters::mock::{MockHttpClient, MockResponse};
/// use apibench::traits::Response;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://api.example.com/data",
///     MockResponse::Success(Response::new(200, "Hello")),
/// );
///
/// // ... run the executor ...
///
/// let requests = client.get_requests();
/// assert_eq!(requests[0].url, "https://api.example.com/data");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a specific URL.
    ///
    /// The URL is matched exactly first, then as a prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = lock(&self.responses);

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern.as_str()) {
                return Some(response.clone());
            }
        }

        lock(&self.default_response).clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<Response, HttpError> {
        let url = request.url.clone();
        lock(&self.requests).push(request);

        match self.get_response(&url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::HeaderSet;
    use crate::models::HttpMethod;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: HeaderSet::new(),
            body: None,
        }
    }

    #[test]
    fn test_mock_http_client_new() {
        let client = MockHttpClient::new();
        assert!(client.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_send_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/test",
            MockResponse::Success(Response::new(200, "Hello")),
        );

        let response = client.send(get("https://example.com/test")).await.unwrap();
        assert_eq!(response.status, 200);

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "https://example.com/test");
    }

    #[tokio::test]
    async fn test_send_with_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/error",
            MockResponse::Error(HttpError::Timeout("30s".to_string())),
        );

        let result = client.send(get("https://example.com/error")).await;
        assert!(matches!(result, Err(HttpError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_prefix_and_default_matching() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/api",
            MockResponse::Success(Response::new(201, "")),
        );
        client.set_default_response(MockResponse::Success(Response::new(404, "")));

        let prefixed = client.send(get("https://example.com/api/items")).await.unwrap();
        assert_eq!(prefixed.status, 201);
        let fallback = client.send(get("https://other.example.com")).await.unwrap();
        assert_eq!(fallback.status, 404);
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.send(get("https://example.com/none")).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
        client.clear_requests();
        assert!(client.get_requests().is_empty());
    }
}
