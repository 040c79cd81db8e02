//! Registration channel errors.

use crate::handshake::HandshakeState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Connection closed before a response arrived")]
    ConnectionClosed,

    #[error("Timed out waiting for a response")]
    Timeout,

    #[error("Handshake already in flight (state: {0:?})")]
    InvalidState(HandshakeState),
}
