//! End-to-end tests: a real server on an ephemeral port, driven over HTTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{ routing::post, Router };
use gemini_exchange::client::{
    ChatController,
    ClientError,
    ExchangeApi,
    HttpExchangeClient,
    SubmitOutcome,
};
use gemini_exchange::exchange::ExchangeService;
use gemini_exchange::llm::chat::gemini::GeminiChatClient;
use gemini_exchange::llm::chat::{ new_client, ChatClient, CompletionResponse, LlmError };
use gemini_exchange::llm::{ LlmConfig, LlmType };
use gemini_exchange::models::chat::Role;
use gemini_exchange::server::api::router;

struct FailingClient;

#[async_trait]
impl ChatClient for FailingClient {
    async fn generate(&self, _prompt: &str) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::MalformedResponse("network unreachable".to_string()))
    }

    fn get_model(&self) -> String {
        "failing".to_string()
    }

    fn get_base_url(&self) -> Option<String> {
        None
    }
}

/// Starts the exchange server and returns the full `/api/content` URL.
async fn spawn_server(chat_client: Arc<dyn ChatClient>, strict_status: bool) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(ExchangeService::new(chat_client), strict_status);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api/content", addr)
}

fn echo_client() -> Arc<dyn ChatClient> {
    let config = LlmConfig {
        llm_type: LlmType::Echo,
        ..Default::default()
    };
    new_client(&config).unwrap()
}

#[tokio::test]
async fn test_prompt_round_trips_through_echo_provider() {
    let url = spawn_server(echo_client(), false).await;
    let client = HttpExchangeClient::new(url).unwrap();

    let reply = client.ask("hello").await.unwrap();
    assert_eq!(reply, "hello");
}

#[tokio::test]
async fn test_raw_wire_format() {
    let url = spawn_server(echo_client(), false).await;

    let resp = reqwest::Client::new()
        .post(&url)
        .json(&serde_json::json!({"questions": "wire"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"response": "wire"}));
}

#[tokio::test]
async fn test_liveness_route() {
    let url = spawn_server(echo_client(), false).await;
    let root = url.trim_end_matches("/api/content");

    let body = reqwest::get(root).await.unwrap().text().await.unwrap();
    assert_eq!(body, "hello world");
}

#[tokio::test]
async fn test_upstream_failure_reaches_chat_as_text() {
    let url = spawn_server(Arc::new(FailingClient), false).await;
    let controller = ChatController::new(Arc::new(HttpExchangeClient::new(url).unwrap()));

    match controller.submit("hello").await {
        SubmitOutcome::Replied(msg) => {
            assert_eq!(msg.role, Role::Assistant);
            assert!(msg.content.contains("network unreachable"), "{}", msg.content);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(!controller.is_busy());
}

#[tokio::test]
async fn test_client_reads_body_of_strict_502() {
    let url = spawn_server(Arc::new(FailingClient), true).await;
    let client = HttpExchangeClient::new(url).unwrap();

    let reply = client.ask("hello").await.unwrap();
    assert!(reply.starts_with("Error: "), "{}", reply);
}

#[tokio::test]
async fn test_session_keeps_submission_order() {
    let url = spawn_server(echo_client(), false).await;
    let controller = ChatController::new(Arc::new(HttpExchangeClient::new(url).unwrap()));

    for text in ["first", "second", "third"] {
        controller.submit(text).await;
    }

    let contents: Vec<(Role, String)> = controller
        .messages()
        .into_iter()
        .skip(1)
        .map(|m| (m.role, m.content))
        .collect();
    assert_eq!(
        contents,
        vec![
            (Role::User, "first".to_string()),
            (Role::Assistant, "first".to_string()),
            (Role::User, "second".to_string()),
            (Role::Assistant, "second".to_string()),
            (Role::User, "third".to_string()),
            (Role::Assistant, "third".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_unreachable_server_is_client_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpExchangeClient::new(format!("http://{}/api/content", addr)).unwrap();
    assert!(client.ask("hello").await.is_err());
}

#[tokio::test]
async fn test_unreachable_gemini_answers_200_with_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);

    let gemini = GeminiChatClient::new(
        "test-key".to_string(),
        None,
        Some(format!("http://{}/v1beta", dead)),
        Some(Duration::from_secs(5))
    ).unwrap();
    let url = spawn_server(Arc::new(gemini), false).await;

    let resp = reqwest::Client::new()
        .post(&url)
        .json(&serde_json::json!({"questions": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    let text = body["response"].as_str().unwrap();
    assert!(text.starts_with("Error: upstream request failed: "), "{}", text);
}

#[tokio::test]
async fn test_null_questions_still_answer_json() {
    let url = spawn_server(echo_client(), false).await;

    let resp = reqwest::Client::new()
        .post(&url)
        .header("content-type", "application/json")
        .body(r#"{"questions":null}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"response": ""}));
}

#[tokio::test]
async fn test_hanging_server_times_out_and_frees_session() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route(
        "/api/content",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "{}"
        })
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let timeout = Duration::from_millis(200);
    let client = HttpExchangeClient::with_timeout(
        format!("http://{}/api/content", addr),
        timeout
    ).unwrap();
    match client.ask("hello").await {
        Err(ClientError::Timeout(t)) => assert_eq!(t, timeout),
        other => panic!("unexpected result: {:?}", other),
    }

    let controller = ChatController::new(Arc::new(client));
    match controller.submit("hello").await {
        SubmitOutcome::Replied(msg) => assert!(msg.content.contains("did not answer"), "{}", msg.content),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(!controller.is_busy());
}
