//! ZNC web registration client - main entry point.
//!
//! Fetches the registration policy once at startup, then loops:
//! prompt for credentials, validate locally, and run one handshake
//! against the realtime registration endpoint per valid submission.

mod config;
mod error;

use crate::config::Config;
use crate::error::AppResult;
use anyhow::Context;
use policy_client::PolicyClient;
use registration_channel::{ChannelError, HandshakeController, WebSocketTransport};
use registration_core::{validate, Credentials, RegistrationPolicy, RegistrationRequest};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log_level);

    info!("Starting registration client...");

    // The policy is fetched exactly once per session; no submission is
    // possible without it.
    let policy_client = PolicyClient::new(&config.policy_url)?;
    let Some(policy) = load_startup_policy(&policy_client).await else {
        // Already logged and shown to the user
        std::process::exit(1);
    };
    info!("Policy loaded - realtime endpoint {}", policy.realtime_url());

    let mut controller = HandshakeController::new(config.response_timeout);
    let mut input = BufReader::new(tokio::io::stdin());

    loop {
        let Some(credentials) = read_credentials(&mut input).await? else {
            info!("Input closed, exiting");
            return Ok(());
        };

        let result = validate(&credentials, &policy);
        if !result.valid {
            // Rule violations never reach the network
            show_status(&result.joined());
            continue;
        }

        let request = RegistrationRequest::from_credentials(&credentials);
        let url = policy.realtime_url();
        let outcome = controller
            .submit(|| WebSocketTransport::connect(&url), &request)
            .await;

        match outcome {
            Ok(outcome) if outcome.is_success() => {
                println!("{}", outcome.message());
                info!("Registered, navigating to {}", config.home_url);
                println!("Continue to {}", config.home_url);
                return Ok(());
            }
            Ok(outcome) => {
                // The server owns the failure wording; show it verbatim
                // and leave the form open for another attempt.
                show_status(outcome.message());
            }
            Err(ChannelError::Timeout) => {
                warn!("Registration server did not respond in time");
                show_status("The registration server did not respond. Please try again.");
            }
            Err(e) => {
                warn!("Handshake failed: {}", e);
                show_status("Could not reach the registration server. Please try again.");
            }
        }
    }
}

/// Fetch the registration policy at startup.
///
/// On failure the error is logged and the user sees one generic status
/// message; the raw error is not surfaced a second time.
async fn load_startup_policy(client: &PolicyClient) -> Option<RegistrationPolicy> {
    match client.fetch_policy().await {
        Ok(policy) => Some(policy),
        Err(e) => {
            error!("Policy fetch failed: {}", e);
            show_status("Registration is currently unavailable. Please try again later.");
            None
        }
    }
}

/// Prompt for a username, password, and confirmation.
///
/// Returns `None` once stdin is exhausted.
async fn read_credentials(input: &mut BufReader<Stdin>) -> AppResult<Option<Credentials>> {
    let Some(username) = prompt(input, "Username: ").await? else {
        return Ok(None);
    };
    let Some(password) = prompt(input, "Password: ").await? else {
        return Ok(None);
    };
    let Some(confirmation) = prompt(input, "Confirm password: ").await? else {
        return Ok(None);
    };

    Ok(Some(Credentials::new(username, password, confirmation)))
}

async fn prompt(input: &mut BufReader<Stdin>, label: &str) -> AppResult<Option<String>> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// The terminal's stand-in for the form's status area.
fn show_status(status: &str) {
    println!("{}", status);
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_startup_policy_fetch_failure_yields_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/register/config/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = PolicyClient::new(mock_server.uri()).unwrap();
        assert!(load_startup_policy(&client).await.is_none());
    }

    #[tokio::test]
    async fn test_startup_policy_fetch_success() {
        let mock_server = MockServer::start().await;

        let body = serde_json::json!({
            "URI": "127.0.0.1",
            "REGISTER_PORT": 4001,
            "USERNAME_CHARACTERS": "abc_-",
            "PASSWORD_CHARACTERS": "abc",
        });

        Mock::given(method("GET"))
            .and(path("/register/config/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let client = PolicyClient::new(mock_server.uri()).unwrap();
        let policy = load_startup_policy(&client).await.unwrap();
        assert_eq!(policy.realtime_url(), "ws://127.0.0.1:4001");
    }
}
