//! Transient realtime channel for the registration handshake.
//!
//! `HandshakeController` runs the open → send → receive → close cycle
//! over a [`Transport`]; `WebSocketTransport` is the production
//! implementation.

mod error;
mod handshake;
mod transport;

pub use error::ChannelError;
pub use handshake::{HandshakeController, HandshakeState};
pub use transport::{Transport, WebSocketTransport};
