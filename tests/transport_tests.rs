//! HTTP transport against a mock ledger API

use ledgerline::config::ConnectionProfile;
use ledgerline::repl::services::{ApiRequest, HttpTransport, RequestOutcome, Transport};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::new(&ConnectionProfile::new(server.uri())).expect("transport should build")
}

#[tokio::test]
async fn get_should_decode_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/X1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": "X1",
            "balance": 100,
            "is_frozen": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .await
        .send(&ApiRequest::get("/accounts/X1"))
        .await;

    assert_eq!(
        outcome,
        RequestOutcome::Success(json!({"address": "X1", "balance": 100, "is_frozen": false}))
    );
}

#[tokio::test]
async fn post_should_send_json_body_with_content_type() {
    let server = MockServer::start().await;
    let payload = json!({"sender": "A", "receiver": "B", "amount": 5, "nonce": 1, "private_key": "k"});
    Mock::given(method("POST"))
        .and(path("/transactions/transfer"))
        .and(header("content-type", "application/json"))
        .and(body_json(payload.clone()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"tx_id": "abc123", "status": "confirmed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .await
        .send(&ApiRequest::post("/transactions/transfer", Some(payload)))
        .await;

    assert_eq!(
        outcome,
        RequestOutcome::Success(json!({"tx_id": "abc123", "status": "confirmed"}))
    );
}

#[tokio::test]
async fn no_content_should_succeed_with_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/raft/remove"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .await
        .send(&ApiRequest::post("/raft/remove", Some(json!({"node_id": "n2"}))))
        .await;

    assert_eq!(outcome, RequestOutcome::Success(serde_json::Value::Null));
}

#[tokio::test]
async fn error_status_should_fail_with_body_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transactions/transfer"))
        .respond_with(ResponseTemplate::new(400).set_body_string("insufficient balance"))
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .await
        .send(&ApiRequest::post("/transactions/transfer", Some(json!({}))))
        .await;

    assert_eq!(outcome, RequestOutcome::Failure("insufficient balance".to_string()));
}

#[tokio::test]
async fn empty_error_body_should_fall_back_to_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/unknown"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .await
        .send(&ApiRequest::get("/accounts/unknown"))
        .await;

    assert_eq!(outcome, RequestOutcome::Failure("Not Found".to_string()));
}

#[tokio::test]
async fn invalid_json_should_be_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raft/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .await
        .send(&ApiRequest::get("/raft/status"))
        .await;

    match outcome {
        RequestOutcome::Failure(message) => assert!(!message.is_empty()),
        other => panic!("expected decode failure, got {other:?}"),
    }
}

#[tokio::test]
async fn gzip_body_should_be_inflated() {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(br#"{"state":"Leader","term":7}"#).unwrap();
    let compressed = encoder.finish().unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raft/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .insert_header("content-type", "application/json")
                .set_body_bytes(compressed),
        )
        .mount(&server)
        .await;

    let outcome = transport_for(&server)
        .await
        .send(&ApiRequest::get("/raft/status"))
        .await;

    assert_eq!(outcome, RequestOutcome::Success(json!({"state": "Leader", "term": 7})));
}

#[tokio::test]
async fn unreachable_server_should_be_a_network_failure() {
    // Nothing listens on port 9 of localhost in the test environment
    let transport = HttpTransport::new(&ConnectionProfile::new("http://127.0.0.1:9")).unwrap();

    let outcome = transport.send(&ApiRequest::get("/raft/status")).await;

    assert!(!outcome.is_success());
}
