/// Client error types

use serde::Deserialize;
use thiserror::Error;

/// Errors raised by the client's entity operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, TLS)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// A 2xx body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Reading or writing the persisted token failed
    #[error("Token storage error: {0}")]
    TokenStore(#[from] std::io::Error),

    /// Invalid client configuration
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds a `Status` error from a non-2xx response body
    ///
    /// The server's `{error, message}` body supplies the message; anything
    /// else falls back to the raw text or the status reason.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            error: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.message.or(parsed.error))
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        ClientError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_message_from_error_body() {
        let err = ClientError::from_response(
            StatusCode::NOT_FOUND,
            r#"{"error":"not_found","message":"Product not found: abc"}"#,
        );

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API returned 404: Product not found: abc");
    }

    #[test]
    fn test_status_message_falls_back() {
        let err = ClientError::from_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(
            err,
            ClientError::Status { status: 502, ref message } if message == "upstream down"
        ));

        let err = ClientError::from_response(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(
            err,
            ClientError::Status { status: 401, ref message } if message == "Unauthorized"
        ));
    }

    #[test]
    fn test_non_status_errors_have_no_status() {
        assert_eq!(ClientError::Decode("bad json".to_string()).status(), None);
    }
}
