//! HTTP client for server-supplied registration policy.

mod client;
mod error;
mod types;

pub use client::PolicyClient;
pub use error::PolicyError;
pub use types::PolicyResponse;
