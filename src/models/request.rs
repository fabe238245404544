use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ValidationError;

/// HTTP verbs offered by the REST panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// All supported verbs, in selector order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// The next verb in selector order, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The previous verb in selector order, wrapping around.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnsupportedMethod(wanted.to_string()))
    }
}

/// A REST call as entered by the user.
///
/// `headers` and `body` are the raw text of their editors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: String,
    pub body: String,
}

impl RestRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// A GraphQL call as entered by the user.
///
/// `variables` is raw JSON text; blank text means "no variables".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphqlRequest {
    pub url: String,
    pub headers: String,
    pub query: String,
    pub variables: String,
}

impl GraphqlRequest {
    pub fn new(url: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    pub fn with_variables(mut self, variables: impl Into<String>) -> Self {
        self.variables = variables.into();
        self
    }
}

/// Anything the executor can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSpec {
    Rest(RestRequest),
    Graphql(GraphqlRequest),
}

impl From<RestRequest> for RequestSpec {
    fn from(request: RestRequest) -> Self {
        RequestSpec::Rest(request)
    }
}

impl From<GraphqlRequest> for RequestSpec {
    fn from(request: GraphqlRequest) -> Self {
        RequestSpec::Graphql(request)
    }
}

/// GraphQL POST body.
///
/// `variables` is left out of the JSON entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlPayload {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}
