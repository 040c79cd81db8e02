//! Pure registration logic: policy types, credential validation,
//! request encoding, and response classification.
//!
//! No I/O lives here; the policy is fetched by `policy-client` and the
//! handshake is driven by `registration-channel`.

mod outcome;
mod types;
mod validate;

pub use outcome::{RegistrationOutcome, ServerFrame};
pub use types::{Credentials, RegistrationPolicy, RegistrationRequest, ValidationResult};
pub use validate::validate;
