//! Error types for Firepower API operations.
//!
//! Errors fall into four classes that mirror where a call can fail: building
//! the request, moving bytes over the network, the server answering with a
//! non-success status, and the body not matching the expected schema. Local
//! cancellation and configuration problems have their own variants.

use crate::response::ResponseMeta;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Firepower operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The request could not be built (bad path, options or body)
    #[error("Failed to build request: {0}")]
    RequestBuild(String),

    /// Network or connection failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport gave up waiting for the server
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success status
    #[error("Server returned {}: {message}", .meta.status)]
    RemoteStatus {
        /// Metadata of the failed response
        meta: Box<ResponseMeta>,
        /// Raw response text, or the vendor error summary when one was sent
        message: String,
        /// Decoded vendor error body, if the server sent one
        details: Option<ApiErrorBody>,
    },

    /// The response body did not match the expected schema
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Metadata of the response whose body failed to decode
        meta: Option<Box<ResponseMeta>>,
        /// Decoder message
        message: String,
    },

    /// The caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized result type for Firepower operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the management center on failed requests.
///
/// ```json
/// {"error": {"category": "FRAMEWORK", "severity": "ERROR",
///            "messages": [{"description": "Object not found"}]}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    /// Error details
    pub error: ApiErrorDetail,
}

/// Error detail structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorDetail {
    /// Error category (e.g. `FRAMEWORK`, `VALIDATION`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Severity reported by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Individual messages
    #[serde(default)]
    pub messages: Vec<ApiErrorMessage>,
}

/// A single message inside an [`ApiErrorDetail`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorMessage {
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Vendor message code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiErrorBody {
    /// Join all message descriptions into one line.
    #[must_use]
    pub fn summary(&self) -> String {
        self.error
            .messages
            .iter()
            .filter_map(|message| message.description.as_deref())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RequestBuild(_) => "REQUEST_BUILD_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::RemoteStatus { .. } => "REMOTE_STATUS_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Cancelled => "CANCELLED",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Response metadata attached to the error, if the server answered.
    #[must_use]
    pub fn response_meta(&self) -> Option<&ResponseMeta> {
        match self {
            Self::RemoteStatus { meta, .. } => Some(&**meta),
            Self::Decode { meta, .. } => meta.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of the response that caused the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.response_meta().map(|meta| meta.status)
    }

    /// Returns true when the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RemoteStatus { meta, .. } if meta.status == StatusCode::NOT_FOUND)
    }

    /// Returns true for transport-level failures (connection or timeout).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub fn should_log(&self) -> bool {
        match self {
            Self::Config(_) | Self::Decode { .. } => true,
            Self::RemoteStatus { meta, .. } => meta.status.is_server_error(),
            _ => false,
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_builder() {
            Self::RequestBuild(err.to_string())
        } else if err.is_decode() {
            Self::Decode {
                meta: None,
                message: err.to_string(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::RequestBuild(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            meta: None,
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<uuid::Error> for Error {
    fn from(err: uuid::Error) -> Self {
        Self::Config(format!("Invalid domain UUID: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use url::Url;

    fn meta(status: StatusCode) -> Box<ResponseMeta> {
        Box::new(ResponseMeta::new(
            status,
            Url::parse("https://fmc.example.com/object/hosts").unwrap(),
            HeaderMap::new(),
        ))
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::RequestBuild("x".into()).error_code(),
            "REQUEST_BUILD_ERROR"
        );
        assert_eq!(Error::Transport("x".into()).error_code(), "TRANSPORT_ERROR");
        assert_eq!(Error::Timeout("x".into()).error_code(), "TIMEOUT");
        assert_eq!(
            Error::RemoteStatus {
                meta: meta(StatusCode::BAD_REQUEST),
                message: "bad".into(),
                details: None,
            }
            .error_code(),
            "REMOTE_STATUS_ERROR"
        );
        assert_eq!(
            Error::Decode {
                meta: None,
                message: "x".into()
            }
            .error_code(),
            "DECODE_ERROR"
        );
        assert_eq!(Error::Cancelled.error_code(), "CANCELLED");
        assert_eq!(Error::Config("x".into()).error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_remote_status_display_and_meta() {
        let err = Error::RemoteStatus {
            meta: meta(StatusCode::NOT_FOUND),
            message: "Object not found".into(),
            details: None,
        };

        assert_eq!(err.to_string(), "Server returned 404 Not Found: Object not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(err.is_not_found());
        assert!(!err.should_log());
    }

    #[test]
    fn test_server_errors_are_logged() {
        let err = Error::RemoteStatus {
            meta: meta(StatusCode::INTERNAL_SERVER_ERROR),
            message: "boom".into(),
            details: None,
        };
        assert!(err.should_log());
        assert!(Error::Config("x".into()).should_log());
        assert!(!Error::Cancelled.should_log());
        assert!(!Error::Transport("reset".into()).should_log());
    }

    #[test]
    fn test_transport_errors_have_no_meta() {
        let err = Error::Transport("connection refused".into());
        assert!(err.is_transport());
        assert!(err.response_meta().is_none());
        assert!(err.status().is_none());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_decode_error_keeps_meta() {
        let err = Error::Decode {
            meta: Some(meta(StatusCode::OK)),
            message: "expected value".into(),
        };
        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[test]
    fn test_api_error_body_summary() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error":{"category":"FRAMEWORK","severity":"ERROR",
                "messages":[{"description":"Name already exists"},{"code":"X1"},
                            {"description":"Value is invalid"}]}}"#,
        )
        .unwrap();

        assert_eq!(body.error.category.as_deref(), Some("FRAMEWORK"));
        assert_eq!(body.summary(), "Name already exists; Value is invalid");
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let fmc_err: Error = err.into();
        assert!(matches!(fmc_err, Error::RequestBuild(_)));
    }

    #[test]
    fn test_from_uuid_error() {
        let err = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
        let fmc_err: Error = err.into();
        assert!(matches!(fmc_err, Error::Config(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let fmc_err: Error = err.into();
        assert!(matches!(fmc_err, Error::Decode { meta: None, .. }));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::RemoteStatus {
            meta: meta(StatusCode::CONFLICT),
            message: "dup".into(),
            details: None,
        };
        assert_eq!(err.clone(), err);
    }
}
