//! Executor tests against a wiremock HTTP server.
//!
//! These exercise the reqwest adapter end to end: what goes on the wire,
//! how responses are folded into a result, and how transport failures are
//! reported.

use std::time::Duration;

use apibench::adapters::ReqwestHttpClient;
use apibench::error::ErrorPhase;
use apibench::executor::Executor;
use apibench::models::{GraphqlRequest, HttpMethod, RestRequest};
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn executor() -> Executor<ReqwestHttpClient> {
    Executor::new(ReqwestHttpClient::with_timeout(Duration::from_secs(5)))
}

#[tokio::test]
async fn test_rest_post_sends_method_headers_and_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("Authorization", "Bearer abc:123"))
        .and(header("X-Test", "1"))
        .and(body_string("{\"name\":\"widget\"}"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("content-type", "application/json")
                .set_body_string("{\"id\":7}"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let spec = RestRequest::new(HttpMethod::Post, format!("  {}/items  ", mock_server.uri()))
        .with_headers("Authorization: Bearer abc:123\n\nX-Test:   1  ")
        .with_body("{\"name\":\"widget\"}")
        .into();
    let result = executor().execute(spec).await.expect("request should succeed");

    assert_eq!(result.status, 201);
    assert_eq!(result.reason, "Created");
    assert_eq!(result.body, "{\"id\":7}");
    assert_eq!(result.headers.get("content-type"), Some("application/json"));
    assert!(result.elapsed > Duration::ZERO);
}

#[tokio::test]
async fn test_non_success_status_is_a_result() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let spec = RestRequest::new(HttpMethod::Get, format!("{}/missing", mock_server.uri())).into();
    let result = executor().execute(spec).await.unwrap();

    assert_eq!(result.status, 404);
    assert_eq!(result.reason, "Not Found");
    assert_eq!(result.body, "nope");
}

#[tokio::test]
async fn test_every_method_reaches_the_server() {
    let mock_server = MockServer::start().await;
    for verb in ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"] {
        Mock::given(method(verb))
            .and(path("/verbs"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    for m in HttpMethod::ALL {
        let spec = RestRequest::new(m, format!("{}/verbs", mock_server.uri())).into();
        let result = executor().execute(spec).await.unwrap();
        assert_eq!(result.status, 204, "method {}", m);
        assert_eq!(result.body, "");
    }
}

#[tokio::test]
async fn test_duplicate_response_headers_are_joined() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("x-multi", "a")
                .append_header("x-multi", "b"),
        )
        .mount(&mock_server)
        .await;

    let spec = RestRequest::new(HttpMethod::Get, mock_server.uri()).into();
    let result = executor().execute(spec).await.unwrap();
    assert_eq!(result.headers.get("x-multi"), Some("a, b"));
}

#[tokio::test]
async fn test_body_decoded_with_declared_charset() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(vec![0x63, 0x61, 0x66, 0xe9], "text/plain; charset=iso-8859-1"),
        )
        .mount(&mock_server)
        .await;

    let spec = RestRequest::new(HttpMethod::Get, mock_server.uri()).into();
    let result = executor().execute(spec).await.unwrap();
    assert_eq!(result.body, "café");
}

#[tokio::test]
async fn test_undecodable_body_is_a_transport_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![0xff, 0xfe, 0xfd], "text/plain; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let spec = RestRequest::new(HttpMethod::Get, mock_server.uri()).into();
    let err = executor().execute(spec).await.unwrap_err();
    assert_eq!(err.phase, ErrorPhase::Transport);
    assert!(err.message.starts_with("Decode error"), "{}", err.message);
}

#[tokio::test]
async fn test_graphql_posts_query_and_variables() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "query": "{ me { id } }",
            "variables": {"a": 1}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": {"me": {"id": "1"}}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let spec = GraphqlRequest::new(
        format!("{}/graphql", mock_server.uri()),
        "  { me { id } }\n",
    )
    .with_variables("{\"a\": 1}")
    .into();
    let result = executor().execute(spec).await.unwrap();

    assert_eq!(result.status, 200);
    let body: serde_json::Value = serde_json::from_str(&result.body).unwrap();
    assert_eq!(body["data"]["me"]["id"], "1");
}

#[tokio::test]
async fn test_graphql_without_variables_omits_the_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({"query": "{ ping }"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let spec = GraphqlRequest::new(mock_server.uri(), "{ ping }")
        .with_variables("   ")
        .into();
    executor().execute(spec).await.unwrap();
}

#[tokio::test]
async fn test_validation_failure_never_reaches_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let spec = RestRequest::new(HttpMethod::Get, mock_server.uri())
        .with_headers("missing colon")
        .into();
    let err = executor().execute(spec).await.unwrap_err();
    assert_eq!(err.phase, ErrorPhase::Validation);
    assert_eq!(err.message, "Invalid header line (missing colon): missing colon");
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let executor = Executor::new(ReqwestHttpClient::with_timeout(Duration::from_millis(100)));
    let spec = RestRequest::new(HttpMethod::Get, mock_server.uri()).into();
    let err = executor.execute(spec).await.unwrap_err();

    assert_eq!(err.phase, ErrorPhase::Transport);
    assert!(err.message.starts_with("Request timeout"), "{}", err.message);
}

#[tokio::test]
async fn test_refused_connection_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let spec = RestRequest::new(HttpMethod::Get, format!("http://127.0.0.1:{}/", port)).into();
    let err = executor().execute(spec).await.unwrap_err();

    assert_eq!(err.phase, ErrorPhase::Transport);
    assert!(err.message.starts_with("Connection failed"), "{}", err.message);
}
