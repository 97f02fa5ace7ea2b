//! Error types for the Sumble SDK.

/// Result type for SDK operations.
pub type SumbleResult<T> = Result<T, SumbleError>;

/// Error types that can occur when calling the Sumble API.
#[derive(Debug, thiserror::Error)]
pub enum SumbleError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-2xx response.
    #[error("Sumble API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream did not answer within the configured timeout.
    #[error("Request to Sumble API timed out")]
    Timeout,

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SumbleError {
    /// Create an API error from a status code and response body.
    ///
    /// JSON error bodies usually carry the human readable text in `detail`,
    /// `error` or `message`; anything else is kept verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["detail", "error", "message"]
                    .iter()
                    .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
            })
            .unwrap_or_else(|| body.to_string());

        Self::Api { status, message }
    }

    /// HTTP status of the upstream response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_plain_text() {
        let err = SumbleError::from_response(502, "Bad Gateway");
        match err {
            SumbleError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_response_detail_field() {
        let err = SumbleError::from_response(402, r#"{"detail": "Insufficient credits"}"#);
        assert_eq!(err.status(), Some(402));
        assert_eq!(
            err.to_string(),
            "Sumble API error (status 402): Insufficient credits"
        );
    }

    #[test]
    fn test_from_response_json_without_known_field() {
        let body = r#"{"code": 7}"#;
        let err = SumbleError::from_response(400, body);
        assert_eq!(err.to_string(), format!("Sumble API error (status 400): {}", body));
    }

    #[test]
    fn test_status_only_for_api_errors() {
        assert_eq!(SumbleError::Timeout.status(), None);
        assert_eq!(SumbleError::Config("x".into()).status(), None);
    }
}
