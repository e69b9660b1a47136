//! Assistant completion exchange tests
//!
//! Drives the completion client against a mock HTTP server and checks the
//! session retry semantics around it.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clubmate::config::AssistantConfig;
use clubmate::services::assistant::ChatSession;
use clubmate::services::CompletionClient;
use clubmate::utils::errors::AssistantError;

fn config_for(server: &MockServer) -> AssistantConfig {
    AssistantConfig {
        api_url: server.uri(),
        api_key: "test-key".to_string(),
        model: "gemini-1.5-flash".to_string(),
        timeout_seconds: 5,
    }
}

fn completion_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [{ "text": text }]
                }
            }
        ]
    })
}

#[tokio::test]
async fn successful_exchange_returns_text_and_extends_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "The Hack Day agenda starts with team formation at 10:00.",
        )))
        .mount(&server)
        .await;

    let client = CompletionClient::new(config_for(&server)).unwrap();
    let mut session = ChatSession::new("grounding".to_string());

    let reply = client
        .generate(session.request_contents("What is the Hack Day agenda?"))
        .await
        .unwrap();
    session.record_exchange("What is the Hack Day agenda?", &reply);

    assert!(reply.contains("team formation"));
    assert_eq!(session.history.len(), 2);
}

#[tokio::test]
async fn server_error_maps_to_request_failed_and_preserves_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;

    let client = CompletionClient::new(config_for(&server)).unwrap();
    let mut session = ChatSession::new("grounding".to_string());
    session.record_exchange("earlier question", "earlier answer");

    let result = client.generate(session.request_contents("retry me")).await;
    assert!(matches!(result, Err(AssistantError::RequestFailed(_))));

    // The failed turn was never recorded; the session can retry as-is.
    assert_eq!(session.history.len(), 2);
}

#[tokio::test]
async fn empty_candidates_map_to_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = CompletionClient::new(config_for(&server)).unwrap();
    let session = ChatSession::new("grounding".to_string());

    let result = client.generate(session.request_contents("anything")).await;
    assert!(matches!(result, Err(AssistantError::InvalidResponse(_))));
}

#[tokio::test]
async fn grounding_is_sent_as_first_turn_of_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
        .mount(&server)
        .await;

    let client = CompletionClient::new(config_for(&server)).unwrap();
    let mut session = ChatSession::new("only answer event questions".to_string());

    for question in ["first", "second"] {
        let contents = session.request_contents(question);
        assert_eq!(contents[0].parts[0].text, "only answer event questions");
        let reply = client.generate(contents).await.unwrap();
        session.record_exchange(question, &reply);
    }

    assert_eq!(session.history.len(), 4);
}
