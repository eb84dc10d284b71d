//! HttpTransport against a loopback axum server.

mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Form, Json, Router};
use realtalk_client::outcome::REQUEST_FAILED;
use realtalk_client::{
    ChatClient, ChatRoom, Endpoints, HttpTransport, Operation, Params, Transport, TransportError,
    User,
};
use serde_json::{json, Value};

async fn authenticate(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    if form.get("username").map(String::as_str) == Some("alice")
        && form.get("password").map(String::as_str) == Some("secret")
    {
        Json(json!({ "success": true }))
    } else {
        Json(json!({
            "success": false,
            "errorCode": "ERROR_INVALID_PASSWORD",
            "errorMessage": "Wrong username or password",
        }))
    }
}

/// Echoes the form back as a single message so the encoding can be checked.
async fn pull_chat(Form(form): Form<Vec<(String, String)>>) -> Json<Value> {
    let names: Vec<_> = form.iter().map(|(name, _)| name.clone()).collect();
    let room = form
        .iter()
        .find(|(name, _)| name == "roomName")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();

    Json(json!({
        "success": true,
        "messages": [{ "body": names.join(","), "sender": room, "timestamp": 42 }],
    }))
}

async fn rejected() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "errorCode": "ERROR_MISSING_PARAM",
            "errorMessage": "roomId is required",
        })),
    )
}

async fn crashed() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

async fn html() -> impl IntoResponse {
    "<html><body>maintenance</body></html>"
}

async fn spawn_server() -> String {
    let router = Router::new()
        .route("/authenticate", post(authenticate))
        .route("/pullChat", post(pull_chat))
        .route("/joinRoom", post(rejected))
        .route("/leaveRoom", post(crashed))
        .route("/userRooms", post(html));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/", addr)
}

fn http_client(base_url: &str) -> ChatClient {
    common::init_tracing();
    let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
    ChatClient::new(Endpoints::new(base_url), Arc::new(transport))
}

#[tokio::test]
async fn form_credentials_reach_the_server() {
    let client = http_client(&spawn_server().await);

    let accepted = client.authenticate(&User::new("r1", "alice", "secret")).await;
    let denied = client.authenticate(&User::new("r1", "alice", "guess")).await;

    assert!(accepted.is_success());
    assert_eq!(denied.error_code(), "ERROR_INVALID_PASSWORD");
    assert_eq!(denied.error_message(), "Wrong username or password");
}

#[tokio::test]
async fn form_fields_keep_order_and_encoding() {
    let client = http_client(&spawn_server().await);
    let room = ChatRoom::new("Caf\u{e9} & Bar", "room-1", "a=b c", 1.5, 2.0);

    let outcome = client.chat_log(&room).await;

    let messages = outcome.payload().unwrap();
    assert_eq!(
        messages[0].body,
        "roomName,roomId,roomDescription,latitude,longitude"
    );
    assert_eq!(messages[0].sender, "Caf\u{e9} & Bar");
}

#[tokio::test]
async fn error_status_with_json_body_is_interpreted() {
    let client = http_client(&spawn_server().await);
    let room = ChatRoom::new("Lobby", "", "", 0.0, 0.0);

    let outcome = client.join_room(&User::new("r1", "alice", "secret"), &room).await;

    assert_eq!(outcome.error_code(), "ERROR_MISSING_PARAM");
    assert_eq!(outcome.error_message(), "roomId is required");
}

#[tokio::test]
async fn error_status_without_json_is_a_transport_error() {
    let base_url = spawn_server().await;
    let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
    let url = Endpoints::new(base_url.as_str()).url_for(Operation::LeaveRoom);

    let err = transport.post_form(&url, &Params::new()).await.unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 500, .. }));
}

#[tokio::test]
async fn html_body_fails_generically() {
    let client = http_client(&spawn_server().await);

    let outcome = client.user_rooms(&User::new("r1", "alice", "secret")).await;

    assert_eq!(outcome.error_code(), REQUEST_FAILED);
}

#[tokio::test]
async fn closed_port_fails_generically() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = http_client(&format!("http://{}/", addr));
    let outcome = client.register(&User::new("r1", "alice", "secret")).await;

    assert_eq!(outcome.error_code(), REQUEST_FAILED);
    assert_eq!(outcome.error_message(), REQUEST_FAILED);
}
