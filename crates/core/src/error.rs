//! Client error taxonomy

use thiserror::Error;

/// Standard result type for client operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Client error types
///
/// Every failure the client surfaces is one of these kinds. Callers get a
/// human-readable message via `Display` and a stable machine-readable
/// discriminator via [`ApiError::code`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected before or by the backend
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Authentication missing, expired, or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Backend returned a 5xx status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Request never reached the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Transport reported a CORS-shaped failure. Native transports never
    /// produce this; it exists for browser embeddings of the same client.
    #[error("Request blocked by CORS policy: {0}")]
    Cors(String),

    /// Client-side request timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Backend answered with an HTML document where JSON was expected
    #[error("API returned HTML instead of JSON")]
    BadGateway,

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Anything that fits no other kind
    #[error("Request failed: {0}")]
    Generic(String),
}

impl ApiError {
    /// Create an error from an HTTP status code
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => Self::Validation(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            500..=599 => Self::Server { status, message },
            _ => Self::Generic(message),
        }
    }

    /// Stable discriminator for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::RateLimited(_) => "rate_limited",
            Self::Server { .. } => "server_error",
            Self::Network(_) => "network_error",
            Self::Cors(_) => "cors_error",
            Self::Timeout(_) => "timeout",
            Self::BadGateway => "bad_gateway",
            Self::Configuration(_) => "invalid_configuration",
            Self::Generic(_) => "request_failed",
        }
    }

    /// Check if this error means the session must be re-established
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_taxonomy() {
        assert!(matches!(
            ApiError::from_status(400, "bad".into()),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(401, "no".into()),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from_status(403, "no".into()),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from_status(404, "where".into()),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(429, "slow down".into()),
            ApiError::RateLimited(_)
        ));
        assert!(matches!(
            ApiError::from_status(503, "oops".into()),
            ApiError::Server { status: 503, .. }
        ));
        assert!(matches!(
            ApiError::from_status(418, "teapot".into()),
            ApiError::Generic(_)
        ));
    }

    #[test]
    fn auth_expired_only_for_unauthorized() {
        assert!(ApiError::Unauthorized("expired".into()).is_auth_expired());
        assert!(!ApiError::Forbidden("nope".into()).is_auth_expired());
        assert!(!ApiError::BadGateway.is_auth_expired());
    }
}
