//! Chat endpoint integration tests
//!
//! Tests for the chat endpoint:
//! - POST /chat and POST /api/chat - question relay to the provider
//! - Request validation (method, missing question) with no provider call
//! - Provider response shapes, status forwarding and transport failures

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{constants, server_for, test_config, test_data, ChatTestHarness};

#[tokio::test]
async fn test_batch_generation_is_marker_stripped() {
    let harness = ChatTestHarness::new().await;
    harness
        .inference
        .mock_batch_generation("User: hi\nAssistant: Hello there!")
        .await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json, json!({ "answer": "Hello there!" }));
}

#[tokio::test]
async fn test_single_generation_without_marker() {
    let harness = ChatTestHarness::new().await;
    harness.inference.mock_single_generation("Hello there!").await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["answer"], "Hello there!");
}

#[tokio::test]
async fn test_api_chat_alias() {
    let harness = ChatTestHarness::new().await;
    harness
        .inference
        .mock_batch_generation("Assistant: from alias")
        .await;

    let response = harness
        .server
        .post("/api/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["answer"], "from alias");
}

#[tokio::test]
async fn test_outbound_request_shape() {
    let harness = ChatTestHarness::new().await;
    harness.inference.mock_batch_generation("Assistant: ok").await;

    harness
        .server
        .post("/chat")
        .json(&test_data::question_with_history("What is Gensyn?"))
        .await
        .assert_status_ok();

    let requests = harness.inference.generation_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].headers["authorization"].to_str().unwrap(),
        format!("Bearer {}", constants::TEST_HF_API_KEY)
    );

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["parameters"],
        json!({
            "max_new_tokens": 400,
            "temperature": 0.75,
            "repetition_penalty": 1.08
        })
    );

    let inputs = body["inputs"].as_str().unwrap();
    assert!(inputs.contains("What is Gensyn?"));
    assert!(inputs.contains("User: Q1\nAssistant: A1"));
    assert!(inputs.ends_with("User: What is Gensyn?\nAssistant:"));
}

#[tokio::test]
async fn test_echoed_prompt_is_stripped() {
    let harness = ChatTestHarness::new().await;
    // Echo the prompt the way text-generation endpoints do by default
    let prompt = chat_relay::chat::build_prompt(
        &[
            chat_relay::chat::ChatTurn::user("Q1"),
            chat_relay::chat::ChatTurn::assistant("A1"),
        ],
        "Q2",
    );
    harness
        .inference
        .mock_batch_generation(&format!("{} A2\n", prompt))
        .await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::question_with_history("Q2"))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["answer"], "A2");
}

#[tokio::test]
async fn test_non_post_methods_are_rejected() {
    let harness = ChatTestHarness::new().await;
    harness.inference.expect_no_generation().await;

    for response in [
        harness.server.get("/chat").await,
        harness.server.put("/chat").json(&test_data::simple_question("hi")).await,
        harness.server.delete("/api/chat").await,
    ] {
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        let json: Value = response.json();
        assert_eq!(json, json!({ "error": "Method not allowed" }));
    }

    assert!(harness.inference.generation_requests().await.is_empty());
}

#[tokio::test]
async fn test_missing_question_is_rejected() {
    let harness = ChatTestHarness::new().await;
    harness.inference.expect_no_generation().await;

    for body in [
        json!({}),
        json!({ "question": "" }),
        json!({ "question": null, "sessionHistory": [] }),
        json!({ "sessionHistory": [{ "role": "user", "text": "hi" }] }),
    ] {
        let response = harness.server.post("/chat").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let json: Value = response.json();
        assert_eq!(json, json!({ "error": "Missing question" }));
    }

    let response = harness.server.post("/chat").text("not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = harness.server.post("/chat").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert!(harness.inference.generation_requests().await.is_empty());
}

#[tokio::test]
async fn test_oversized_body_gets_json_error() {
    let harness = ChatTestHarness::new().await;
    harness.inference.expect_no_generation().await;

    let oversized = "a".repeat(chat_relay::routes::MAX_CHAT_BODY_BYTES + 1);
    let response = harness.server.post("/chat").text(oversized).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let json: Value = response.json();
    assert_eq!(json["error"], "Invalid request body");
    assert!(json["detail"].as_str().is_some());
}

#[tokio::test]
async fn test_upstream_error_status_is_forwarded() {
    let harness = ChatTestHarness::new().await;
    harness.inference.mock_model_loading().await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = response.json();
    assert_eq!(
        json,
        json!({ "error": "AI service error", "detail": "{\"error\":\"loading\"}" })
    );
}

#[tokio::test]
async fn test_upstream_text_error_is_forwarded_verbatim() {
    let harness = ChatTestHarness::new().await;
    harness
        .inference
        .mock_raw(401, "text/plain", "Invalid credentials in Authorization header")
        .await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let json: Value = response.json();
    assert_eq!(json["error"], "AI service error");
    assert_eq!(json["detail"], "Invalid credentials in Authorization header");
}

#[tokio::test]
async fn test_plain_text_generation() {
    let harness = ChatTestHarness::new().await;
    harness
        .inference
        .mock_raw(200, "text/plain", "User: hi\nAssistant:   plain reply  ")
        .await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["answer"], "plain reply");
}

#[tokio::test]
async fn test_unrecognized_success_body_is_stringified() {
    let harness = ChatTestHarness::new().await;
    harness
        .inference
        .mock_json(200, json!({ "warnings": ["no text"] }))
        .await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["answer"], "{\"warnings\":[\"no text\"]}");
}

#[tokio::test]
async fn test_malformed_json_success_body_is_server_error() {
    let harness = ChatTestHarness::new().await;
    harness
        .inference
        .mock_raw(200, "application/json", "{\"generated_text\": ")
        .await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"], "Server error");
    assert!(json["detail"].as_str().is_some());
}

#[tokio::test]
async fn test_malformed_history_is_server_error() {
    let harness = ChatTestHarness::new().await;
    harness.inference.expect_no_generation().await;

    let response = harness
        .server
        .post("/chat")
        .json(&json!({ "question": "hi", "sessionHistory": "not a list" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"], "Server error");
}

#[tokio::test]
async fn test_falsy_history_is_treated_as_empty() {
    let harness = ChatTestHarness::new().await;
    harness.inference.mock_batch_generation("Assistant: fresh start").await;

    for history in [json!(""), json!(false), json!(0)] {
        let response = harness
            .server
            .post("/chat")
            .json(&json!({ "question": "hi", "sessionHistory": history }))
            .await;

        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json["answer"], "fresh start");
    }

    let bodies = harness.inference.generation_bodies().await;
    assert_eq!(bodies.len(), 3);
    for body in bodies {
        let inputs = body["inputs"].as_str().unwrap();
        assert!(inputs.ends_with("helpful assistant.\n\nUser: hi\nAssistant:"));
    }
}

#[tokio::test]
async fn test_unreachable_provider_is_server_error() {
    let server = server_for(test_config(constants::UNREACHABLE_URL));

    let response = server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"], "Server error");
    assert!(!json["detail"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let harness = ChatTestHarness::with_config(|config| {
        config.upstream_timeout_seconds = 1;
    })
    .await;
    harness
        .inference
        .mock_slow_generation("Assistant: too late", Duration::from_secs(3))
        .await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"], "Server error");
}

#[tokio::test]
async fn test_missing_credential_surfaces_as_upstream_error() {
    let harness = ChatTestHarness::with_config(|config| {
        config.inference_api_key = None;
    })
    .await;
    harness
        .inference
        .mock_json(401, json!({ "error": "Authorization header is correct, but the token seems invalid" }))
        .await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::simple_question("hi"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let json: Value = response.json();
    assert_eq!(json["error"], "AI service error");

    let requests = harness.inference.generation_requests().await;
    assert!(!requests[0].headers.contains_key("authorization"));
}
