//! Policy client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Policy unavailable: {0}")]
    Unavailable(String),
}
