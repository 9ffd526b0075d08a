//! HTTP DTOs for the webhook endpoint.
//!
//! The success body is the [`AssistantResponse`](crate::domain::conversation::AssistantResponse)
//! itself; only failures that prevent a turn from running use these types.

use serde::Serialize;

/// Error response returned when no assistant response could be produced.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_omits_missing_details() {
        let response = ErrorResponse::new("INVALID_JSON", "Body is not JSON");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error_code": "INVALID_JSON", "message": "Body is not JSON"})
        );
    }

    #[test]
    fn error_response_with_details_includes_details() {
        let details = json!({"line": 1});
        let response = ErrorResponse::with_details("INVALID_JSON", "Bad", details.clone());
        assert_eq!(response.details, Some(details));
    }
}
