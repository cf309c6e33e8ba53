//! Integration tests for the API client against a mock HTTP server
//!
//! **Purpose**: Test the full path from request building → network →
//! response normalization
//!
//! **Coverage:**
//! - Happy path: GET → JSON decoded payload
//! - Error statuses: non-2xx → `Http { status, body }`
//! - Transport failures: refused connection, timeout → `Connection`
//! - Authentication: configured key attached, per-call override wins
//! - Body handling: JSON echo round-trip, form encoding, empty, non-JSON
//! - Lifecycle: closed client performs no network call
//!
//! **Infrastructure:**
//! - WireMock HTTP server
//! - Blocking client calls moved onto the tokio blocking pool

use std::net::TcpListener;
use std::time::Duration;

use restline_client::ApiClient;
use restline_domain::{ClientError, Method, Payload, RequestSpec};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("restline_client=debug").try_init();
}

/// Run a blocking client call off the async test runtime.
async fn run_blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}

#[tokio::test]
async fn get_decodes_json_object() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "a"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let payload = run_blocking(move || {
        ApiClient::builder().base_url(uri).build().unwrap().get("users/1")
    })
    .await
    .unwrap();

    assert_eq!(payload, Payload::Json(json!({"id": 1, "name": "a"})));
}

#[tokio::test]
async fn non_success_status_maps_to_http_error() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = run_blocking(move || {
        ApiClient::builder().base_url(uri).build().unwrap().get("users/42")
    })
    .await
    .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.response_body().unwrap().contains("not found"));
    assert!(matches!(err, ClientError::Http { .. }));
}

#[tokio::test]
async fn error_status_with_empty_body_carries_no_body() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = run_blocking(move || {
        ApiClient::builder().base_url(uri).build().unwrap().delete("users/1")
    })
    .await
    .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.response_body(), None);
}

#[tokio::test]
async fn refused_connection_maps_to_connection_error() {
    init_tracing();
    // Bind a port, then release it so requests fail with ECONNREFUSED.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let url = format!("http://{addr}");

    let err = run_blocking(move || {
        ApiClient::builder().base_url(url).build().unwrap().get("users")
    })
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::Connection(_)), "got {err:?}");
}

#[tokio::test]
async fn slow_response_times_out_as_connection_error() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = run_blocking(move || {
        ApiClient::builder()
            .base_url(uri)
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap()
            .get("slow")
    })
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::Connection(_)), "got {err:?}");
}

#[tokio::test]
async fn configured_api_key_is_attached() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let payload = run_blocking(move || {
        ApiClient::builder().base_url(uri).api_key("test-token").build().unwrap().get("me")
    })
    .await
    .unwrap();

    assert_eq!(payload, Payload::Json(json!({"id": 7})));
}

#[tokio::test]
async fn per_call_auth_header_overrides_configured_key() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer override"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = run_blocking(move || {
        let client = ApiClient::builder().base_url(uri).api_key("test-token").build().unwrap();
        let spec = RequestSpec::new(Method::Get, "me").header("Authorization", "Bearer override");
        client.request(spec)
    })
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn json_body_round_trips_through_echo() {
    init_tracing();
    let server = MockServer::start().await;

    let body = json!({
        "name": "a",
        "tags": ["x", "y"],
        "nested": {"depth": 2, "flag": true}
    });

    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let expected = body.clone();
    let payload = run_blocking(move || {
        ApiClient::builder().base_url(uri).build().unwrap().post("echo", &body)
    })
    .await
    .unwrap();

    assert_eq!(payload, Payload::Json(expected));
}

#[tokio::test]
async fn form_body_is_urlencoded() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string("user=a&pass=b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = run_blocking(move || {
        let client = ApiClient::builder().base_url(uri).build().unwrap();
        let spec = RequestSpec::new(Method::Post, "login")
            .form_field("user", "a")
            .form_field("pass", "b");
        client.request(spec)
    })
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn query_parameters_are_appended() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let payload = run_blocking(move || {
        let client = ApiClient::builder().base_url(uri).build().unwrap();
        let spec = RequestSpec::new(Method::Get, "users").query("page", "2").query("per_page", "50");
        client.request(spec)
    })
    .await
    .unwrap();

    assert_eq!(payload, Payload::Json(json!([])));
}

#[tokio::test]
async fn empty_body_yields_empty_payload() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let uri = server.uri();
    let payload = run_blocking(move || {
        ApiClient::builder().base_url(uri).build().unwrap().delete("users/1")
    })
    .await
    .unwrap();

    assert!(payload.is_empty());
}

#[tokio::test]
async fn non_json_body_degrades_to_text() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ALL SYSTEMS GO"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let payload = run_blocking(move || {
        ApiClient::builder().base_url(uri).build().unwrap().get("status")
    })
    .await
    .unwrap();

    assert_eq!(payload.as_text(), Some("ALL SYSTEMS GO"));
}

#[tokio::test]
async fn default_headers_are_sent_with_every_request() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .and(header("X-Client-Tag", "restline-test"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = run_blocking(move || {
        ApiClient::builder()
            .base_url(uri)
            .default_header("X-Client-Tag", "restline-test")
            .build()
            .unwrap()
            .get("ping")
    })
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn closed_client_performs_no_network_call() {
    init_tracing();
    let server = MockServer::start().await;

    // Any request reaching the server would fail this expectation.
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let uri = server.uri();
    let err = run_blocking(move || {
        let mut client = ApiClient::builder().base_url(uri).build().unwrap();
        client.close();
        client.get("users")
    })
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Closed));

    server.verify().await;
}

#[tokio::test]
async fn leading_and_trailing_slashes_resolve_to_one_separator() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let base = format!("{}/v1/", server.uri());
    let (first, second) = run_blocking(move || {
        let client = ApiClient::builder().base_url(base).build().unwrap();
        let first = client.get("/users");
        let second = client.get("users");
        (first, second)
    })
    .await;

    assert!(first.is_ok());
    assert!(second.is_ok());
    server.verify().await;
}
