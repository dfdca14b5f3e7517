use serde::{Deserialize, Serialize};

/// Error body returned by the analytics API on non-2xx responses.
///
/// The server is not consistent about the shape: most views answer with
/// `{"error": {"message": "...", "code": "..."}}`, some with a bare
/// `{"error": "..."}` and the authentication layer with `{"detail": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<ApiErrorField>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorField {
    Detailed {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        code: Option<String>,
    },
    Text(String),
}

impl ApiErrorBody {
    /// Human readable message supplied by the server, if any.
    pub fn message(&self) -> Option<&str> {
        match &self.error {
            Some(ApiErrorField::Detailed {
                message: Some(message),
                ..
            }) => Some(message.as_str()),
            Some(ApiErrorField::Text(text)) => Some(text.as_str()),
            _ => self.detail.as_deref(),
        }
        .filter(|m| !m.trim().is_empty())
    }

    /// Machine code supplied by the server, e.g. `VALIDATION_ERROR`.
    pub fn code(&self) -> Option<&str> {
        match &self.error {
            Some(ApiErrorField::Detailed {
                code: Some(code), ..
            }) => Some(code.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detailed_error_body() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"error": {"message": "Start date must be before end date", "code": "VALIDATION_ERROR"}}"#,
        )
        .unwrap();
        assert_eq!(body.message(), Some("Start date must be before end date"));
        assert_eq!(body.code(), Some("VALIDATION_ERROR"));
    }

    #[test]
    fn test_text_and_detail_bodies() {
        let text: ApiErrorBody = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(text.message(), Some("boom"));
        assert_eq!(text.code(), None);

        let detail: ApiErrorBody =
            serde_json::from_str(r#"{"detail": "Authentication credentials were not provided."}"#)
                .unwrap();
        assert_eq!(
            detail.message(),
            Some("Authentication credentials were not provided.")
        );
    }

    #[test]
    fn test_blank_message_is_absent() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error": {"message": "  "}}"#).unwrap();
        assert_eq!(body.message(), None);
        assert_eq!(ApiErrorBody::default().message(), None);
    }
}
