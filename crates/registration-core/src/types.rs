//! Domain types for the registration flow.

use serde::{Deserialize, Serialize};

/// Server-issued registration policy.
///
/// Fetched once per session, read-only afterwards. The charsets are the
/// raw allowed-character strings exactly as the server sends them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPolicy {
    /// Host of the realtime registration endpoint.
    pub realtime_host: String,

    /// Port of the realtime registration endpoint.
    pub realtime_port: u16,

    /// Characters permitted in a username.
    pub username_charset: String,

    /// Characters permitted in a password.
    pub password_charset: String,
}

impl RegistrationPolicy {
    /// URL of the realtime registration channel.
    pub fn realtime_url(&self) -> String {
        format!("ws://{}:{}", self.realtime_host, self.realtime_port)
    }
}

/// Candidate credentials for one submission attempt.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            password_confirmation: password_confirmation.into(),
        }
    }
}

/// Result of checking credentials against a policy.
///
/// Errors are collected in a fixed canonical order so output is
/// deterministic regardless of which rules fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Render the violations the way the status area shows them.
    pub fn joined(&self) -> String {
        self.errors.join("\n")
    }
}

/// The single wire message sent per handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
}

impl RegistrationRequest {
    /// Build the request from validated credentials.
    ///
    /// Field-preserving; no escaping beyond JSON serialization, since
    /// validation has already constrained the charset.
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        }
    }

    /// Serialize to the JSON frame sent on the channel.
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
