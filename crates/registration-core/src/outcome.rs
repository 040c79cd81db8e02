//! Classification of inbound frames from the registration server.

/// Terminal result of one handshake.
///
/// The message text is the raw server payload in both cases; the server
/// owns the outcome wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Success(String),
    Failure(String),
}

impl RegistrationOutcome {
    /// The user-facing message, regardless of variant.
    pub fn message(&self) -> &str {
        match self {
            RegistrationOutcome::Success(msg) | RegistrationOutcome::Failure(msg) => msg,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RegistrationOutcome::Success(_))
    }
}

/// An inbound frame, classified by its leading character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFrame {
    /// Protocol/framing metadata (leading `{`). Not an outcome; the
    /// channel must stay open past it.
    Control,
    /// The substantive response that ends the handshake.
    Terminal(RegistrationOutcome),
}

impl ServerFrame {
    /// Classify a raw inbound frame.
    ///
    /// Leading `{` marks a control frame; a leading `S` marks success;
    /// anything else, including an empty payload, is a failure.
    pub fn classify(payload: &str) -> Self {
        match payload.chars().next() {
            Some('{') => ServerFrame::Control,
            Some('S') => ServerFrame::Terminal(RegistrationOutcome::Success(payload.to_string())),
            _ => ServerFrame::Terminal(RegistrationOutcome::Failure(payload.to_string())),
        }
    }
}
