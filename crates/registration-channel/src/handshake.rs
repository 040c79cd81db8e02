//! The registration handshake state machine.
//!
//! One run is one open → send → receive → close cycle: exactly one
//! request goes out, exactly one outcome (or error) comes back, and the
//! channel is never left open past the exchange.

use crate::error::ChannelError;
use crate::transport::Transport;
use registration_core::{RegistrationOutcome, RegistrationRequest, ServerFrame};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// States of one handshake run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    Idle,
    Connecting,
    AwaitingResponse,
    Closed,
}

/// Drives a single registration exchange over a transient channel.
///
/// At most one run is in flight at a time; a run always ends in
/// `Closed`, after which the controller may be reused for the next
/// submission.
pub struct HandshakeController {
    state: HandshakeState,
    response_timeout: Duration,
}

impl HandshakeController {
    pub fn new(response_timeout: Duration) -> Self {
        Self {
            state: HandshakeState::Idle,
            response_timeout,
        }
    }

    /// Current state of the controller.
    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Force the controller to `Closed`.
    ///
    /// Needed only after a run was cancelled mid-flight (its future
    /// dropped); the abandoned transport is torn down with that future.
    pub fn abort(&mut self) {
        self.state = HandshakeState::Closed;
    }

    /// Run one handshake: connect, send the request, classify the first
    /// substantive response, close.
    ///
    /// Callable from `Idle` or from `Closed` (resubmission); a call
    /// while a prior run is still in flight is rejected.
    pub async fn submit<T, C, Fut>(
        &mut self,
        connect: C,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, ChannelError>
    where
        T: Transport,
        C: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ChannelError>>,
    {
        match self.state {
            HandshakeState::Idle | HandshakeState::Closed => {}
            state => return Err(ChannelError::InvalidState(state)),
        }

        self.state = HandshakeState::Connecting;
        debug!("Opening registration channel");

        let result = match connect().await {
            Ok(transport) => self.exchange(transport, request).await,
            Err(e) => Err(e),
        };

        self.state = HandshakeState::Closed;
        debug!("Registration channel closed");
        result
    }

    async fn exchange<T: Transport>(
        &mut self,
        mut transport: T,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, ChannelError> {
        // The sole outbound frame for this run
        let frame = request.to_frame()?;
        transport.send_text(&frame).await?;
        self.state = HandshakeState::AwaitingResponse;
        debug!("Request sent, awaiting response");

        match timeout(self.response_timeout, await_terminal(&mut transport)).await {
            Ok(Ok(outcome)) => {
                // Close before handing the outcome back; the line must
                // not stay open past the single intended exchange.
                if let Err(e) = transport.close().await {
                    warn!("Error closing channel: {}", e);
                }
                Ok(outcome)
            }
            Ok(Err(e)) => {
                let _ = transport.close().await;
                Err(e)
            }
            Err(_elapsed) => {
                warn!(
                    "No response within {:?}, abandoning handshake",
                    self.response_timeout
                );
                let _ = transport.close().await;
                Err(ChannelError::Timeout)
            }
        }
    }
}

/// Wait for the first non-control inbound frame.
async fn await_terminal<T: Transport>(
    transport: &mut T,
) -> Result<RegistrationOutcome, ChannelError> {
    loop {
        match transport.next_text().await? {
            None => return Err(ChannelError::ConnectionClosed),
            Some(payload) => match ServerFrame::classify(&payload) {
                ServerFrame::Control => {
                    // Framing metadata; the substantive response is
                    // still to come, keep the channel open.
                    debug!("Ignoring control frame");
                }
                ServerFrame::Terminal(outcome) => return Ok(outcome),
            },
        }
    }
}
