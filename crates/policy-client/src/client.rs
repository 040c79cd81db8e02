//! HTTP client for the registration policy endpoint.

use crate::error::PolicyError;
use crate::types::PolicyResponse;
use registration_core::RegistrationPolicy;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Client for the server's registration configuration endpoint.
#[derive(Clone)]
pub struct PolicyClient {
    client: Client,
    base_url: String,
}

impl PolicyClient {
    /// Create a new policy client.
    pub fn new(base_url: impl Into<String>) -> Result<Self, PolicyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the registration policy.
    ///
    /// One GET per session, issued at startup; submissions are not
    /// possible until it resolves.
    #[instrument(skip(self))]
    pub async fn fetch_policy(&self) -> Result<RegistrationPolicy, PolicyError> {
        let response = self
            .client
            .get(format!("{}/register/config/", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let msg = response.text().await.unwrap_or_default();
            warn!("Policy fetch failed: {} - {}", status, msg);
            return Err(PolicyError::Unavailable(format!("HTTP {}: {}", status, msg)));
        }

        let body = response.text().await?;
        let policy: PolicyResponse = serde_json::from_str(&body)?;
        let policy = RegistrationPolicy::from(policy);
        debug!(
            "Fetched policy: realtime endpoint {}",
            policy.realtime_url()
        );
        Ok(policy)
    }
}
