//! Wire types for the policy endpoint.

use registration_core::RegistrationPolicy;
use serde::Deserialize;

/// Response body of `GET /register/config/`.
///
/// Field names follow the server's settings endpoint verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyResponse {
    #[serde(rename = "URI")]
    pub uri: String,

    #[serde(rename = "REGISTER_PORT")]
    pub register_port: u16,

    #[serde(rename = "USERNAME_CHARACTERS")]
    pub username_characters: String,

    #[serde(rename = "PASSWORD_CHARACTERS")]
    pub password_characters: String,
}

impl From<PolicyResponse> for RegistrationPolicy {
    fn from(response: PolicyResponse) -> Self {
        RegistrationPolicy {
            realtime_host: response.uri,
            realtime_port: response.register_port,
            username_charset: response.username_characters,
            password_charset: response.password_characters,
        }
    }
}
