//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
///
/// All fields have defaults; override via `REGISTER_*` environment
/// variables (e.g. `REGISTER_POLICY_URL`, `REGISTER_RESPONSE_TIMEOUT=30s`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the web app serving the policy endpoint
    #[serde(default = "default_policy_url")]
    pub policy_url: String,

    /// Bounded wait for the server's response on the realtime channel
    #[serde(default = "default_response_timeout", with = "humantime_serde")]
    pub response_timeout: Duration,

    /// Where a successful registration navigates to
    #[serde(default = "default_home_url")]
    pub home_url: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy_url: default_policy_url(),
            response_timeout: default_response_timeout(),
            home_url: default_home_url(),
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_policy_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_response_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_home_url() -> String {
    "/".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("REGISTER")
                    // Single underscore after the prefix; `__` only
                    // separates nested keys.
                    .prefix_separator("_")
                    .separator("__")
                    // Durations like "10s" must stay strings for
                    // humantime_serde to parse them.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.policy_url, "http://127.0.0.1:5000");
        assert_eq!(config.response_timeout, Duration::from_secs(10));
        assert_eq!(config.home_url, "/");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_documented_env_overrides_apply() {
        std::env::set_var("REGISTER_POLICY_URL", "http://policy.test:8080");
        std::env::set_var("REGISTER_RESPONSE_TIMEOUT", "30s");
        std::env::set_var("REGISTER_HOME_URL", "/welcome");

        let config = Config::load().unwrap();

        assert_eq!(config.policy_url, "http://policy.test:8080");
        assert_eq!(config.response_timeout, Duration::from_secs(30));
        assert_eq!(config.home_url, "/welcome");
        // Untouched fields keep their defaults
        assert_eq!(config.log_level, "info");

        std::env::remove_var("REGISTER_POLICY_URL");
        std::env::remove_var("REGISTER_RESPONSE_TIMEOUT");
        std::env::remove_var("REGISTER_HOME_URL");
    }

    #[test]
    fn test_deserialize_with_humantime_duration() {
        let config: Config = serde_json::from_str(
            r#"{"policy_url":"http://example.test","response_timeout":"30s"}"#,
        )
        .unwrap();
        assert_eq!(config.policy_url, "http://example.test");
        assert_eq!(config.response_timeout, Duration::from_secs(30));
        assert_eq!(config.home_url, "/");
    }
}
