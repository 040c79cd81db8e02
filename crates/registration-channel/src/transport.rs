//! Transport port and the WebSocket implementation.

use crate::error::ChannelError;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

/// Full-duplex text channel to the registration server.
///
/// Abstracted so the handshake controller can be driven by a scripted
/// transport in tests.
#[async_trait]
pub trait Transport: Send {
    /// Send one text frame.
    async fn send_text(&mut self, payload: &str) -> Result<(), ChannelError>;

    /// Receive the next text frame, or `None` on orderly close.
    async fn next_text(&mut self) -> Result<Option<String>, ChannelError>;

    /// Close the channel. Idempotent.
    async fn close(&mut self) -> Result<(), ChannelError>;
}

/// WebSocket transport for the realtime registration channel.
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketTransport {
    /// Open a channel to the given `ws://host:port` URL.
    pub async fn connect(url: &str) -> Result<Self, ChannelError> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| ChannelError::Connect(e.to_string()))?;
        debug!("Connected to {}", url);
        Ok(Self { stream })
    }
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send_text(&mut self, payload: &str) -> Result<(), ChannelError> {
        self.stream
            .send(Message::Text(payload.to_string()))
            .await
            .map_err(ChannelError::from)
    }

    async fn next_text(&mut self) -> Result<Option<String>, ChannelError> {
        while let Some(frame) = self.stream.next().await {
            match frame? {
                Message::Text(text) => return Ok(Some(text)),
                Message::Close(_) => return Ok(None),
                // Ping/pong and binary frames are transport noise here
                _ => continue,
            }
        }
        Ok(None)
    }

    async fn close(&mut self) -> Result<(), ChannelError> {
        match self.stream.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(ChannelError::WebSocket(e)),
        }
    }
}
