//! End-to-end handshake tests against a loopback WebSocket server.

use futures::{SinkExt, StreamExt};
use registration_channel::{ChannelError, HandshakeController, WebSocketTransport};
use registration_core::{RegistrationOutcome, RegistrationRequest};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// One-shot registration server: accepts a connection, checks the
/// request frame, sends a control frame followed by `reply`.
async fn spawn_server(reply: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        let frame = loop {
            match ws.next().await.unwrap().unwrap() {
                Message::Text(text) => break text,
                _ => continue,
            }
        };
        let request: RegistrationRequest = serde_json::from_str(&frame).unwrap();
        assert_eq!(request.username, "alice1");
        assert_eq!(request.password, "Secret1");

        ws.send(Message::Text("{\"sessionid\":\"abc123\"}".into()))
            .await
            .unwrap();
        ws.send(Message::Text(reply.into())).await.unwrap();

        // Drain until the client closes the channel
        while let Some(Ok(_)) = ws.next().await {}
    });

    format!("ws://{}", addr)
}

fn test_request() -> RegistrationRequest {
    RegistrationRequest {
        username: "alice1".into(),
        password: "Secret1".into(),
    }
}

#[tokio::test]
async fn test_successful_registration_over_websocket() {
    let url = spawn_server("Success: account created").await;

    let mut controller = HandshakeController::new(Duration::from_secs(10));
    let outcome = controller
        .submit(|| WebSocketTransport::connect(&url), &test_request())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RegistrationOutcome::Success("Success: account created".into())
    );
}

#[tokio::test]
async fn test_failed_registration_over_websocket() {
    let url = spawn_server("Failure: username taken").await;

    let mut controller = HandshakeController::new(Duration::from_secs(10));
    let outcome = controller
        .submit(|| WebSocketTransport::connect(&url), &test_request())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        RegistrationOutcome::Failure("Failure: username taken".into())
    );
}

#[tokio::test]
async fn test_connect_refused_surfaces_transport_error() {
    // Bind then drop to get a port with no listener
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("ws://{}", addr);
    let mut controller = HandshakeController::new(Duration::from_secs(10));
    let result = controller
        .submit(|| WebSocketTransport::connect(&url), &test_request())
        .await;

    assert!(matches!(result, Err(ChannelError::Connect(_))));
}
