//! Local input validation
//!
//! Fail-fast checks that run before any network call.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ApiError, ApiResult};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Validate an email address shape
pub fn validate_email(email: &str) -> ApiResult<()> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("invalid email address: {email}")))
    }
}

/// Validate that a password is non-empty
pub fn validate_password(password: &str) -> ApiResult<()> {
    if password.is_empty() {
        Err(ApiError::Validation("password cannot be empty".to_string()))
    } else {
        Ok(())
    }
}

/// Validate a backend endpoint URL
pub fn validate_endpoint(endpoint: &str) -> ApiResult<url::Url> {
    let parsed = url::Url::parse(endpoint)
        .map_err(|err| ApiError::Configuration(format!("invalid endpoint URL: {err}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ApiError::Configuration(format!(
            "endpoint must be http(s), got {}",
            parsed.scheme()
        )));
    }
    Ok(parsed)
}
