//! Presentation-facing error payloads.
//!
//! Every failure that reaches a caller outside the core is rendered through
//! [`ErrorResponse`], so only the code, the user-safe message and the
//! structured details of a [`DomainError`] are ever exposed.

use domain::DomainError;
use serde::Serialize;
use serde_json::Value;

/// Error response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        // Hide details for infrastructure errors
        let details = if err.is_internal() {
            tracing::error!(code = err.code(), "{}", err);
            None
        } else {
            err.details()
        };

        Self {
            error: ErrorBody {
                code: err.code().to_string(),
                message: err.user_message(),
                details,
            },
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_code_message_and_details() {
        let response = ErrorResponse::from(DomainError::UserInactive("u1".into()));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            json!({
                "error": {
                    "code": "USER_INACTIVE",
                    "message": "This user is inactive and cannot be modified.",
                    "details": { "userId": "u1" }
                }
            })
        );
    }

    #[test]
    fn internal_errors_drop_details() {
        let response = ErrorResponse::from(DomainError::repository("search", "socket closed"));

        assert_eq!(response.error.code, "REPOSITORY_ERROR");
        assert_eq!(response.error.details, None);
        assert!(!response.error.message.contains("socket"));
    }
}
