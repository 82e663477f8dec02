//! Response envelope and body normalization
//!
//! The backend replies in several shapes: a structured JSON envelope, the
//! same envelope stringified, an empty body, or a raw HTML error page when
//! the script layer itself fails. [`normalize`] folds all of them into one
//! [`Envelope`] or a classified error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Longest raw-body snippet preserved on unparseable responses
const RAW_SNIPPET_LEN: usize = 200;

/// The normalized response shape every transport call produces
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Error detail carried inside a failed envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Envelope {
    fn invalid_format(raw: &str) -> Self {
        Self {
            success: false,
            error: Some(ErrorBody {
                message: "Invalid response format".to_string(),
                raw: Some(snippet(raw)),
            }),
            ..Self::default()
        }
    }

    /// The message a failed envelope surfaces to callers
    pub fn failure_message(&self) -> String {
        if let Some(error) = &self.error {
            return error.message.clone();
        }
        self.message
            .clone()
            .unwrap_or_else(|| "Request failed".to_string())
    }

    /// Extract typed `data` from a successful envelope; a failed envelope
    /// becomes an error carrying the server's message verbatim.
    pub fn into_data<T: serde::de::DeserializeOwned>(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::Generic(self.failure_message()));
        }
        let data = self.data.unwrap_or(Value::Null);
        serde_json::from_value(data)
            .map_err(|err| ApiError::Generic(format!("unexpected response shape: {err}")))
    }

    /// Require success, discarding any data
    pub fn expect_success(self) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Generic(self.failure_message()))
        }
    }
}

/// Normalize a raw response body into an [`Envelope`]
///
/// - empty or whitespace-only body: an empty (failed) envelope
/// - a JSON object: that envelope, unknown fields ignored
/// - other valid JSON: the value preserved as `data` of a failed
///   envelope, so parsed content is never dropped
/// - HTML document: [`ApiError::BadGateway`]
/// - anything else: a failed envelope with `error.message =
///   "Invalid response format"` and the first 200 chars of the body in
///   `error.raw`
pub fn normalize(body: &str) -> ApiResult<Envelope> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Envelope::default());
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) if value.is_object() => Ok(serde_json::from_value(value)
            .unwrap_or_else(|_| Envelope::invalid_format(trimmed))),
        Ok(value) => Ok(Envelope {
            success: false,
            data: Some(value),
            ..Envelope::default()
        }),
        Err(_) if looks_like_html(trimmed) => Err(ApiError::BadGateway),
        Err(_) => Ok(Envelope::invalid_format(trimmed)),
    }
}

fn looks_like_html(body: &str) -> bool {
    let lower = body.to_ascii_lowercase();
    lower.contains("<html") || lower.starts_with("<!doctype")
}

fn snippet(body: &str) -> String {
    body.chars().take(RAW_SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_json_passes_through() {
        let env = normalize(r#"{"success":true,"data":[1,2,3],"message":"ok"}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(json!([1, 2, 3])));
        assert_eq!(env.message.as_deref(), Some("ok"));
    }

    #[test]
    fn stringified_envelope_with_padding_parses() {
        let env = normalize("  \n{\"success\":true,\"data\":{\"id\":1}}\n  ").unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(json!({"id": 1})));
    }

    #[test]
    fn empty_body_is_an_empty_envelope() {
        let env = normalize("   ").unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert!(env.error.is_none());
    }

    #[test]
    fn html_document_is_bad_gateway() {
        let err = normalize("<!DOCTYPE html><html><body>Error</body></html>").unwrap_err();
        assert!(matches!(err, ApiError::BadGateway));
        let err = normalize("oops <HTML>broken</HTML>").unwrap_err();
        assert!(matches!(err, ApiError::BadGateway));
    }

    #[test]
    fn garbage_becomes_invalid_format_with_snippet() {
        let body = "x".repeat(500);
        let env = normalize(&body).unwrap();
        assert!(!env.success);
        let error = env.error.unwrap();
        assert_eq!(error.message, "Invalid response format");
        assert_eq!(error.raw.unwrap().len(), 200);
    }

    #[test]
    fn non_object_json_is_preserved_as_data() {
        let env = normalize("[1,2]").unwrap();
        assert!(!env.success);
        assert_eq!(env.data, Some(json!([1, 2])));
    }

    #[test]
    fn into_data_surfaces_server_message_verbatim() {
        let env = Envelope {
            success: false,
            message: Some("Invalid credentials".to_string()),
            ..Envelope::default()
        };
        let err = env.into_data::<Value>().unwrap_err();
        assert_eq!(err.to_string(), "Request failed: Invalid credentials");
    }

    #[test]
    fn error_body_message_wins_over_top_level_message() {
        let env = normalize(
            r#"{"success":false,"message":"outer","error":{"message":"inner"}}"#,
        )
        .unwrap();
        assert_eq!(env.failure_message(), "inner");
    }

    #[test]
    fn expect_success_on_failure_carries_message() {
        let env = normalize(r#"{"success":false,"message":"nope"}"#).unwrap();
        let err = env.expect_success().unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
