//! User-facing error taxonomy.
//!
//! A transport failure is classified exactly once, by the fetch container
//! that issued the request. Everything downstream renders [`ErrorInfo`]
//! as-is.

use serde::{Deserialize, Serialize};

use crate::shared::api_client::ApiFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// No response was received
    Network,
    /// 401: the session is no longer valid
    Auth,
    /// 400: the server rejected the filter combination
    Validation,
    /// 5xx
    Server,
    /// The payload did not have the expected shape
    Data,
    Unknown,
}

impl ErrorKind {
    /// Whether re-issuing the same request can reasonably succeed.
    pub fn is_retriable(self) -> bool {
        matches!(
            self,
            ErrorKind::Network | ErrorKind::Server | ErrorKind::Data | ErrorKind::Unknown
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Auth => "auth",
            ErrorKind::Validation => "validation",
            ErrorKind::Server => "server",
            ErrorKind::Data => "data",
            ErrorKind::Unknown => "unknown",
        }
    }

    fn default_message(self) -> &'static str {
        match self {
            ErrorKind::Network => "Could not reach the server. Check your connection.",
            ErrorKind::Auth => "Your session has expired. Please sign in again.",
            ErrorKind::Validation => "The selected filters are not valid.",
            ErrorKind::Server => "The server failed to process the request.",
            ErrorKind::Data => "The server returned data in an unexpected format.",
            ErrorKind::Unknown => "Failed to load data.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    /// Machine code from the server, or a transport code
    pub code: Option<String>,
    /// HTTP status when a response was received
    pub status: Option<u16>,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            status: None,
        }
    }

    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }
}

pub fn classify_status(status: u16) -> ErrorKind {
    match status {
        401 => ErrorKind::Auth,
        400 => ErrorKind::Validation,
        500..=599 => ErrorKind::Server,
        _ => ErrorKind::Unknown,
    }
}

/// Map a transport failure onto the user-facing taxonomy.
///
/// The server message wins over the generic one, except for `auth`, where
/// the user must always be told to sign in again.
pub fn classify(failure: &ApiFailure) -> ErrorInfo {
    match failure {
        ApiFailure::Http { status, body } => {
            let kind = classify_status(*status);
            let server_message = body.as_ref().and_then(|b| b.message());
            let message = match (kind, server_message) {
                (ErrorKind::Auth, _) | (_, None) => kind.default_message().to_string(),
                (_, Some(message)) => message.to_string(),
            };
            let code = body
                .as_ref()
                .and_then(|b| b.code())
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            ErrorInfo {
                kind,
                message,
                code: Some(code),
                status: Some(*status),
            }
        }
        ApiFailure::Network(_) => ErrorInfo {
            code: Some("NETWORK_ERROR".to_string()),
            ..ErrorInfo::new(ErrorKind::Network, ErrorKind::Network.default_message())
        },
        ApiFailure::Timeout(_) => ErrorInfo {
            code: Some("TIMEOUT".to_string()),
            ..ErrorInfo::new(ErrorKind::Network, ErrorKind::Network.default_message())
        },
        ApiFailure::Decode(_) => ErrorInfo {
            code: Some("INVALID_PAYLOAD".to_string()),
            ..ErrorInfo::new(ErrorKind::Data, ErrorKind::Data.default_message())
        },
        ApiFailure::Request(_) => ErrorInfo {
            code: Some("REQUEST_ERROR".to_string()),
            ..ErrorInfo::new(ErrorKind::Unknown, ErrorKind::Unknown.default_message())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api_error::ApiErrorBody;

    fn http(status: u16, body: Option<&str>) -> ApiFailure {
        ApiFailure::Http {
            status,
            body: body.map(|b| serde_json::from_str::<ApiErrorBody>(b).unwrap()),
        }
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(classify(&http(401, None)).kind, ErrorKind::Auth);
        assert_eq!(classify(&http(400, None)).kind, ErrorKind::Validation);
        assert_eq!(classify(&http(500, None)).kind, ErrorKind::Server);
        assert_eq!(classify(&http(503, None)).kind, ErrorKind::Server);
        assert_eq!(classify(&http(403, None)).kind, ErrorKind::Unknown);
        assert_eq!(classify(&http(404, None)).kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_transport_classification() {
        let network = classify(&ApiFailure::Network("offline".into()));
        assert_eq!(network.kind, ErrorKind::Network);
        assert_eq!(network.code.as_deref(), Some("NETWORK_ERROR"));
        assert_eq!(network.status, None);

        assert_eq!(classify(&ApiFailure::Timeout(10_000)).kind, ErrorKind::Network);
        assert_eq!(classify(&ApiFailure::Decode("eof".into())).kind, ErrorKind::Data);
        assert_eq!(classify(&ApiFailure::Request("bad url".into())).kind, ErrorKind::Unknown);
    }

    #[test]
    fn test_server_message_and_code_are_kept() {
        let info = classify(&http(
            400,
            Some(r#"{"error": {"message": "Start date must be before end date", "code": "VALIDATION_ERROR"}}"#),
        ));
        assert_eq!(info.message, "Start date must be before end date");
        assert_eq!(info.code.as_deref(), Some("VALIDATION_ERROR"));
        assert_eq!(info.status, Some(400));
    }

    #[test]
    fn test_auth_message_is_fixed_and_code_falls_back_to_status() {
        let info = classify(&http(401, Some(r#"{"detail": "Invalid token."}"#)));
        assert_eq!(info.message, ErrorKind::Auth.default_message());
        assert_eq!(info.code.as_deref(), Some("401"));
    }

    #[test]
    fn test_retriable_kinds() {
        assert!(ErrorKind::Network.is_retriable());
        assert!(ErrorKind::Server.is_retriable());
        assert!(!ErrorKind::Auth.is_retriable());
        assert!(!ErrorKind::Validation.is_retriable());
    }
}
