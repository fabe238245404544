//! Pure validation: user-entered request text to a wire-ready request.
//!
//! Checks run in a fixed order and stop at the first failure:
//! URL, query (GraphQL), header block, variables (GraphQL).

use crate::error::ValidationError;
use crate::headers::parse_headers;
use crate::models::{GraphqlPayload, GraphqlRequest, HttpMethod, RequestSpec, RestRequest};
use crate::traits::HttpRequest;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Validate a request spec without touching the network.
pub fn prepare(spec: &RequestSpec) -> Result<HttpRequest, ValidationError> {
    match spec {
        RequestSpec::Rest(rest) => prepare_rest(rest),
        RequestSpec::Graphql(graphql) => prepare_graphql(graphql),
    }
}

fn prepare_rest(rest: &RestRequest) -> Result<HttpRequest, ValidationError> {
    let url = rest.url.trim();
    if url.is_empty() {
        return Err(ValidationError::MissingRequestUrl);
    }
    let headers = parse_headers(&rest.headers)?;
    let body = (!rest.body.is_empty()).then(|| rest.body.clone());

    Ok(HttpRequest {
        method: rest.method,
        url: url.to_string(),
        headers,
        body,
    })
}

fn prepare_graphql(graphql: &GraphqlRequest) -> Result<HttpRequest, ValidationError> {
    let url = graphql.url.trim();
    if url.is_empty() {
        return Err(ValidationError::MissingEndpointUrl);
    }
    let query = graphql.query.trim();
    if query.is_empty() {
        return Err(ValidationError::MissingQuery);
    }
    let mut headers = parse_headers(&graphql.headers)?;
    let variables = parse_variables(&graphql.variables)?;

    let payload = GraphqlPayload {
        query: query.to_string(),
        variables,
    };
    let body = serde_json::to_string(&payload)
        .map_err(|e| ValidationError::InvalidVariables(e.to_string()))?;

    if !headers.contains_ignore_case("content-type") {
        headers.insert("Content-Type", JSON_CONTENT_TYPE);
    }

    Ok(HttpRequest {
        method: HttpMethod::Post,
        url: url.to_string(),
        headers,
        body: Some(body),
    })
}

/// Blank variables text means "no variables", not a JSON error.
fn parse_variables(raw: &str) -> Result<Option<serde_json::Value>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(raw)
        .map(Some)
        .map_err(|e| ValidationError::InvalidVariables(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorPhase;

    fn body_json(request: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn test_rest_missing_url() {
        let spec = RestRequest::new(HttpMethod::Get, "   ").into();
        assert_eq!(prepare(&spec), Err(ValidationError::MissingRequestUrl));
    }

    #[test]
    fn test_rest_url_checked_before_headers() {
        let spec = RestRequest::new(HttpMethod::Get, "")
            .with_headers("bad line")
            .into();
        assert_eq!(prepare(&spec), Err(ValidationError::MissingRequestUrl));
    }

    #[test]
    fn test_rest_header_error_surfaces_unchanged() {
        let spec = RestRequest::new(HttpMethod::Get, "http://x")
            .with_headers("bad line")
            .into();
        let err = prepare(&spec).unwrap_err();
        assert_eq!(err.to_string(), "Invalid header line (missing colon): bad line");
    }

    #[test]
    fn test_rest_empty_body_and_headers_are_absent() {
        let spec = RestRequest::new(HttpMethod::Delete, "  http://x/items/1 ").into();
        let request = prepare(&spec).unwrap();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "http://x/items/1");
        assert!(request.headers.is_empty());
        assert_eq!(request.body, None);
    }

    #[test]
    fn test_rest_body_sent_verbatim() {
        let spec = RestRequest::new(HttpMethod::Post, "http://x")
            .with_body("  {\"a\": 1}\n")
            .into();
        let request = prepare(&spec).unwrap();
        assert_eq!(request.body.as_deref(), Some("  {\"a\": 1}\n"));
    }

    #[test]
    fn test_graphql_validation_order() {
        let missing_url = GraphqlRequest::new("", "").with_headers("bad").into();
        assert_eq!(prepare(&missing_url), Err(ValidationError::MissingEndpointUrl));

        let missing_query = GraphqlRequest::new("http://x", "  \n ")
            .with_headers("bad")
            .into();
        assert_eq!(prepare(&missing_query), Err(ValidationError::MissingQuery));

        let bad_header = GraphqlRequest::new("http://x", "{ a }")
            .with_headers("bad")
            .with_variables("{not json")
            .into();
        assert!(matches!(
            prepare(&bad_header),
            Err(ValidationError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_graphql_blank_variables_are_omitted() {
        for blank in ["", "   ", "\n\t\n"] {
            let spec = GraphqlRequest::new("http://x/graphql", "{ ping }")
                .with_variables(blank)
                .into();
            let request = prepare(&spec).unwrap();
            assert_eq!(body_json(&request), serde_json::json!({"query": "{ ping }"}));
        }
    }

    #[test]
    fn test_graphql_variables_are_embedded() {
        let spec = GraphqlRequest::new("http://x/graphql", "query($n: Int) { f(n: $n) }")
            .with_variables(r#"{"n": 3}"#)
            .into();
        let request = prepare(&spec).unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(body_json(&request)["variables"], serde_json::json!({"n": 3}));
    }

    #[test]
    fn test_graphql_invalid_variables_is_decode_error() {
        let spec = GraphqlRequest::new("http://x", "{ a }")
            .with_variables("{oops")
            .into();
        let err = prepare(&spec).unwrap_err();
        assert_eq!(err.phase(), ErrorPhase::Decode);
        assert!(err.to_string().starts_with("Variables must be valid JSON: "));
    }

    #[test]
    fn test_graphql_query_is_trimmed() {
        let spec = GraphqlRequest::new("http://x", "\n  { ping }  \n").into();
        let request = prepare(&spec).unwrap();
        assert_eq!(body_json(&request)["query"], "{ ping }");
    }

    #[test]
    fn test_graphql_content_type() {
        let spec = GraphqlRequest::new("http://x", "{ a }").into();
        let request = prepare(&spec).unwrap();
        assert_eq!(request.headers.get("Content-Type"), Some("application/json"));

        let spec = GraphqlRequest::new("http://x", "{ a }")
            .with_headers("content-type: application/graphql+json")
            .into();
        let request = prepare(&spec).unwrap();
        assert_eq!(request.headers.len(), 1);
        assert_eq!(
            request.headers.get("content-type"),
            Some("application/graphql+json")
        );
    }
}
