//! REST and GraphQL request execution.
//!
//! The executor is stateless: each call validates its input, issues one
//! request through an [`HttpClient`] and converts whatever happens into a
//! single [`Outcome`]. Nothing escapes past [`Executor::execute`].

mod prepare;

pub use prepare::prepare;

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::adapters::{ReqwestHttpClient, DEFAULT_REQUEST_TIMEOUT};
use crate::error::OperationError;
use crate::models::{Outcome, RequestResult, RequestSpec};
use crate::traits::HttpClient;

/// Configuration for the request executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Upper bound for one request, body included
    pub timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Runs REST and GraphQL calls.
#[derive(Debug, Clone)]
pub struct Executor<C: HttpClient> {
    client: C,
}

impl Executor<ReqwestHttpClient> {
    /// Executor backed by reqwest.
    pub fn from_config(config: &ExecutorConfig) -> Self {
        Self::new(ReqwestHttpClient::with_timeout(config.timeout))
    }
}

impl<C: HttpClient> Executor<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Validate and run one request.
    ///
    /// Produces exactly one of a [`RequestResult`] or an [`OperationError`].
    pub async fn execute(&self, spec: RequestSpec) -> Outcome {
        let request = prepare(&spec).map_err(|err| {
            warn!("Rejected request: {}", err);
            OperationError::from(err)
        })?;

        info!("{} {}", request.method, request.url);
        let started = Instant::now();

        let response = self.client.send(request).await.map_err(|err| {
            warn!("Request failed: {}", err);
            OperationError::from(err)
        })?;
        let body = response.text().map_err(|err| {
            warn!("Response body rejected: {}", err);
            OperationError::from(err)
        })?;
        let elapsed = started.elapsed();

        info!(
            "Received {} in {:.2} ms",
            response.status,
            elapsed.as_secs_f64() * 1000.0
        );
        Ok(RequestResult {
            status: response.status,
            reason: response.reason,
            elapsed,
            headers: response.headers,
            body,
        })
    }
}
