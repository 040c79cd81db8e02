//! Credential validation against the server policy.

use crate::types::{Credentials, RegistrationPolicy, ValidationResult};

const MIN_USERNAME_LEN: usize = 6;
const MAX_USERNAME_LEN: usize = 16;
const MIN_PASSWORD_LEN: usize = 6;

/// Check credentials against length and charset rules.
///
/// Every rule is evaluated independently; all violations are collected,
/// in a fixed order: match, username length, password length, username
/// charset, password charset. Pure function, no I/O.
pub fn validate(credentials: &Credentials, policy: &RegistrationPolicy) -> ValidationResult {
    let mut errors = Vec::new();

    if credentials.password != credentials.password_confirmation {
        errors.push("Error: Passwords do not match".to_string());
    }

    let username_len = credentials.username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username_len) {
        errors.push("Error: Username length is not within limits".to_string());
    }

    if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("Error: Password length is not within limits".to_string());
    }

    if !charset_allows(&policy.username_charset, &credentials.username) {
        // Reported once, not per offending character
        errors.push("Error: Invalid character(s) in username".to_string());
    }

    if !charset_allows(&policy.password_charset, &credentials.password) {
        errors.push("Error: Invalid character(s) in password".to_string());
    }

    ValidationResult::from_errors(errors)
}

fn charset_allows(charset: &str, value: &str) -> bool {
    value.chars().all(|c| charset.contains(c))
}
