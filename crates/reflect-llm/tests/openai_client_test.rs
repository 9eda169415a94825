//! Integration tests for OpenAiCompatClient against a mock endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reflect_core::Message;
use reflect_llm::{CompletionClient, CompletionError, OpenAiCompatClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn completion_json(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1234567890,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn complete_returns_reply_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_json("Hello!")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiCompatClient::new(mock_server.uri(), "test-model");
    let reply = client
        .complete(&[Message::system("sys"), Message::user("hi")])
        .await
        .expect("completion");

    assert_eq!(reply, "Hello!");
}

#[tokio::test]
async fn request_body_carries_messages_and_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(move |req: &Request| {
            let body: serde_json::Value = req.body_json().expect("json body");
            assert_eq!(body["model"], "test-model");
            assert_eq!(body["messages"][0]["role"], "system");
            assert_eq!(body["messages"][1]["content"], "hi");
            assert_eq!(body["max_tokens"], 4000);
            assert_eq!(body["top_k"], 40);
            ResponseTemplate::new(200).set_body_json(completion_json("ok"))
        })
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiCompatClient::new(mock_server.uri(), "test-model");
    client
        .complete(&[Message::system("sys"), Message::user("hi")])
        .await
        .expect("completion");
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error": "bad request"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiCompatClient::new(mock_server.uri(), "test-model");
    let err = client
        .complete(&[Message::user("hi")])
        .await
        .expect_err("should fail");

    match err {
        CompletionError::Api { status, .. } => assert_eq!(status, 400),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_content_field_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant"}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiCompatClient::new(mock_server.uri(), "test-model");
    let err = client
        .complete(&[Message::user("hi")])
        .await
        .expect_err("should fail");

    assert!(matches!(err, CompletionError::MalformedResponse(_)));
}

#[tokio::test]
async fn transient_server_errors_are_retried() {
    let mock_server = MockServer::start().await;
    let request_count = Arc::new(AtomicUsize::new(0));
    let counter = request_count.clone();

    // Fails twice with 503, then succeeds
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(move |_req: &Request| {
            let count = counter.fetch_add(1, Ordering::SeqCst);
            if count < 2 {
                ResponseTemplate::new(503).set_body_string(r#"{"error": "unavailable"}"#)
            } else {
                ResponseTemplate::new(200).set_body_json(completion_json("recovered"))
            }
        })
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = OpenAiCompatClient::new(mock_server.uri(), "test-model");
    let reply = client
        .complete(&[Message::user("hi")])
        .await
        .expect("completion after retries");

    assert_eq!(reply, "recovered");
    assert_eq!(request_count.load(Ordering::SeqCst), 3);
}
