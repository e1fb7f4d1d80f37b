//! End-to-end controller flows: `update()` drives the state, the real HTTP
//! backend talks to a mock server, and the result is fed back as an action.

use std::sync::Arc;

use helpdesk::api::{AskBackend, HttpBackend};
use helpdesk::core::action::{Action, Effect, update};
use helpdesk::core::reply::{CONNECT_ERROR, EMPTY_QUESTION, NO_ANSWER, QUOTA_WARNING};
use helpdesk::core::state::{App, ChatMessage, Role, Theme};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn app_for(uri: &str) -> App {
    App::new(Arc::new(HttpBackend::new(uri)), Theme::Light)
}

/// Submits `question`, performs the spawned request (if any) and feeds the
/// result back, like the event loop does.
async fn send(app: &mut App, question: &str, platform: &str) {
    let effect = update(
        app,
        Action::Submit {
            question: question.to_string(),
            platform: platform.to_string(),
        },
    );
    if let Effect::SpawnAsk {
        request_id,
        request,
    } = effect
    {
        assert_eq!(app.pending_count(), 1, "placeholder shown while waiting");
        let result = app.backend.ask(&request).await;
        update(app, Action::AskResolved { request_id, result });
    }
}

async fn server_answering(body: serde_json::Value) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;
    mock_server
}

// ============================================================================
// Flows
// ============================================================================

#[tokio::test]
async fn test_dropout_scenario() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(body_json(json!({"question": "What is Dropout?", "platform": "openai"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": [{"content": "Dropout is a regularization technique."}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server.uri());
    send(&mut app, "What is Dropout?", "openai").await;

    assert_eq!(
        app.messages,
        vec![
            ChatMessage::user("What is Dropout?"),
            ChatMessage::bot("Dropout is a regularization technique."),
        ]
    );
}

#[tokio::test]
async fn test_empty_question_never_hits_network() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server.uri());
    send(&mut app, "   ", "segment").await;

    assert_eq!(app.messages, vec![ChatMessage::error(EMPTY_QUESTION)]);
}

#[tokio::test]
async fn test_quota_reply_is_replaced() {
    let mock_server = server_answering(json!({
        "answer": [{"content": "⚠️ OpenAI API quota exceeded. Please check your plan or try again later."}]
    }))
    .await;

    let mut app = app_for(&mock_server.uri());
    send(&mut app, "hello", "segment").await;

    let last = app.messages.last().unwrap();
    assert_eq!(last.content, QUOTA_WARNING);
    assert_eq!(last.role, Role::Error);
    assert_eq!(app.messages.len(), 2);
}

#[tokio::test]
async fn test_empty_answer_list() {
    let mock_server = server_answering(json!({"answer": []})).await;

    let mut app = app_for(&mock_server.uri());
    send(&mut app, "hello", "segment").await;

    assert_eq!(
        app.messages,
        vec![ChatMessage::user("hello"), ChatMessage::error(NO_ANSWER)]
    );
}

#[tokio::test]
async fn test_absent_answer_list() {
    let mock_server = server_answering(json!({})).await;

    let mut app = app_for(&mock_server.uri());
    send(&mut app, "hello", "segment").await;

    assert_eq!(app.messages.last(), Some(&ChatMessage::error(NO_ANSWER)));
}

#[tokio::test]
async fn test_server_error_renders_connect_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut app = app_for(&mock_server.uri());
    send(&mut app, "hello", "segment").await;

    assert_eq!(
        app.messages,
        vec![ChatMessage::user("hello"), ChatMessage::error(CONNECT_ERROR)]
    );
    assert!(!app.is_loading());
}

#[tokio::test]
async fn test_unreachable_backend_renders_connect_error() {
    let mut app = app_for("http://127.0.0.1:1");
    send(&mut app, "hello", "segment").await;

    assert_eq!(app.messages.last(), Some(&ChatMessage::error(CONNECT_ERROR)));
    assert_eq!(app.pending_count(), 0);
}

#[tokio::test]
async fn test_ui_stays_usable_after_failure() {
    let mock_server = server_answering(json!({"answer": [{"content": "second try works"}]})).await;

    let mut app = app_for("http://127.0.0.1:1");
    send(&mut app, "first", "segment").await;

    // Point at a working backend and try again
    app.backend = Arc::new(HttpBackend::new(mock_server.uri()));
    send(&mut app, "second", "segment").await;

    assert_eq!(
        app.messages,
        vec![
            ChatMessage::user("first"),
            ChatMessage::error(CONNECT_ERROR),
            ChatMessage::user("second"),
            ChatMessage::bot("second try works"),
        ]
    );
}
