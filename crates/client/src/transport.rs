//! Transport layer
//!
//! Shapes requests the way the backend class requires: reads are GET with
//! query parameters, writes are `application/x-www-form-urlencoded` POST
//! bodies, and the token travels as a query pair or form field rather
//! than a header. All three are constraints of script backends that
//! cannot answer a CORS preflight, not stylistic choices. Redirects stay
//! enabled because those backends answer a POST with a redirect to a GET
//! of the result; normalization makes both shapes identical.

use causeway_core::{Action, ActionKind, ApiError, ApiResult, Envelope, normalize};
use tracing::{debug, warn};
use url::Url;

/// Thin wrapper over the HTTP client owning request shaping and response
/// normalization. Cheap to clone.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    endpoint: Url,
}

impl Transport {
    pub(crate) fn new(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Get the backend endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Dispatch one action and normalize whatever comes back
    ///
    /// When `action` carries a token, a `token` pair is always present,
    /// empty when none is stored; the backend owns rejection.
    pub async fn send(
        &self,
        action: Action,
        params: &[(String, String)],
        token: Option<&str>,
    ) -> ApiResult<Envelope> {
        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 2);
        pairs.push(("action", action.as_str()));
        for (key, value) in params {
            pairs.push((key.as_str(), value.as_str()));
        }
        if action.requires_token() {
            pairs.push(("token", token.unwrap_or_default()));
        }

        debug!(action = action.as_str(), "dispatching request");
        let request = match action.kind() {
            ActionKind::Read => self.http.get(self.endpoint.clone()).query(&pairs),
            ActionKind::Write => self.http.post(self.endpoint.clone()).form(&pairs),
        };

        let response = request.send().await.map_err(classify_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            let message = match normalize(&body) {
                Ok(envelope) => envelope.failure_message(),
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            let error = ApiError::from_status(status.as_u16(), message);
            warn!(action = action.as_str(), code = error.code(), "request failed");
            return Err(error);
        }

        normalize(&body)
    }
}

/// Classify a transport-level failure into the error taxonomy
fn classify_transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    let text = err.to_string();
    // native transports never report CORS; browser embeddings surface it
    // in the fetch error text
    if text.to_ascii_lowercase().contains("cors") {
        return ApiError::Cors(text);
    }
    if err.is_connect() || err.is_request() {
        return ApiError::Network(text);
    }
    ApiError::Generic(text)
}
