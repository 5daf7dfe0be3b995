//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns: transport failures are
//! translated into one of these kinds by [`DomainError::from_transport`]
//! before they leave the data-access layer.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use thiserror::Error;

use crate::constants::{STATUS_BAD_REQUEST, STATUS_CONFLICT, STATUS_NOT_FOUND};

/// Field name mapped to the validation messages reported for it.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No user matches the given identifier
    #[error("User with ID '{0}' not found")]
    UserNotFound(String),

    /// Email is already registered
    #[error("User with email '{0}' already exists")]
    UserAlreadyExists(String),

    /// Entity data failed its invariants
    #[error("Invalid user data: {}", summarize(.0))]
    InvalidUserData(FieldErrors),

    /// Inactive users cannot be modified
    #[error("User with ID '{0}' is inactive")]
    UserInactive(String),

    /// Caller-supplied argument is malformed
    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    /// A cross-field business rule was violated
    #[error("Business rule '{rule}' violated: {message}")]
    BusinessRuleViolation { rule: String, message: String },

    /// The data source failed for a reason with no business meaning
    #[error("Repository error during '{operation}': {message}")]
    Repository { operation: String, message: String },

    /// The data source could not be reached
    #[error("Network error: {0}")]
    Network(String),
}

fn summarize(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    /// Create a validation error for a single argument
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-data error carrying a single field message
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        DomainError::InvalidUserData(errors)
    }

    /// Create a business rule violation
    pub fn business_rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::BusinessRuleViolation {
            rule: rule.into(),
            message: message.into(),
        }
    }

    /// Create a repository error
    pub fn repository(operation: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Repository {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::UserNotFound(_) => "USER_NOT_FOUND",
            DomainError::UserAlreadyExists(_) => "USER_ALREADY_EXISTS",
            DomainError::InvalidUserData(_) => "INVALID_USER_DATA",
            DomainError::UserInactive(_) => "USER_INACTIVE",
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::BusinessRuleViolation { .. } => "BUSINESS_RULE_VIOLATION",
            DomainError::Repository { .. } => "REPOSITORY_ERROR",
            DomainError::Network(_) => "NETWORK_ERROR",
        }
    }

    /// Message that is safe to show to an end user verbatim.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::UserNotFound(_) => "The requested user could not be found.".to_string(),
            DomainError::UserAlreadyExists(email) => {
                format!("A user with email {} is already registered.", email)
            }
            DomainError::InvalidUserData(_) => {
                "The user data is not valid. Please review the highlighted fields.".to_string()
            }
            DomainError::UserInactive(_) => {
                "This user is inactive and cannot be modified.".to_string()
            }
            DomainError::Validation { message, .. } => message.clone(),
            DomainError::BusinessRuleViolation { message, .. } => message.clone(),
            DomainError::Repository { .. } => {
                "The operation could not be completed. Please try again later.".to_string()
            }
            DomainError::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
        }
    }

    /// Structured details for the error, if any.
    pub fn details(&self) -> Option<Value> {
        match self {
            DomainError::UserNotFound(id) | DomainError::UserInactive(id) => {
                Some(json!({ "userId": id }))
            }
            DomainError::UserAlreadyExists(email) => Some(json!({ "email": email })),
            DomainError::InvalidUserData(errors) => Some(json!({ "fieldErrors": errors })),
            DomainError::Validation { field, .. } => Some(json!({ "field": field })),
            DomainError::BusinessRuleViolation { rule, .. } => Some(json!({ "rule": rule })),
            DomainError::Repository { operation, .. } => Some(json!({ "operation": operation })),
            DomainError::Network(_) => None,
        }
    }

    /// True for failures raised while checking caller arguments, before any
    /// repository interaction took place.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, DomainError::Validation { .. })
    }

    /// True for infrastructure failures whose details must stay internal
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Repository { .. } | DomainError::Network(_))
    }

    /// Translate a transport failure into a domain error.
    ///
    /// `subject` names what the request was about (a user id for lookups and
    /// updates, an email for creation) and ends up in the not-found and
    /// conflict variants.
    pub fn from_transport(failure: TransportFailure, operation: &str, subject: &str) -> Self {
        match failure {
            TransportFailure::Connectivity(message) => DomainError::Network(message),
            TransportFailure::Status {
                status,
                message,
                field_errors,
            } => match status {
                STATUS_NOT_FOUND => DomainError::UserNotFound(subject.to_string()),
                STATUS_CONFLICT => DomainError::UserAlreadyExists(subject.to_string()),
                STATUS_BAD_REQUEST => {
                    if field_errors.is_empty() {
                        DomainError::invalid_field("request", message)
                    } else {
                        DomainError::InvalidUserData(field_errors)
                    }
                }
                _ => DomainError::repository(operation, format!("status {}: {}", status, message)),
            },
        }
    }
}

/// Failure reported by the transport collaborator underneath a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// The remote side answered with an error status
    Status {
        status: u16,
        message: String,
        field_errors: FieldErrors,
    },
    /// The remote side could not be reached at all
    Connectivity(String),
}

impl TransportFailure {
    /// Error status without field errors
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        TransportFailure::Status {
            status,
            message: message.into(),
            field_errors: FieldErrors::new(),
        }
    }

    /// Connectivity failure
    pub fn connectivity(message: impl Into<String>) -> Self {
        TransportFailure::Connectivity(message.into())
    }

    /// Attach server-provided field errors to a status failure.
    pub fn with_field_errors(self, errors: FieldErrors) -> Self {
        match self {
            TransportFailure::Status {
                status, message, ..
            } => TransportFailure::Status {
                status,
                message,
                field_errors: errors,
            },
            other => other,
        }
    }

    /// True when the remote side reported a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportFailure::Status { status, .. } if *status == STATUS_NOT_FOUND)
    }
}

/// Map a transport lookup into an optional result.
///
/// A not-found status becomes `Ok(None)`; every other failure goes through
/// [`DomainError::from_transport`].
pub fn lookup_result<T>(
    result: Result<T, TransportFailure>,
    operation: &str,
    subject: &str,
) -> DomainResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(failure) if failure.is_not_found() => Ok(None),
        Err(failure) => Err(DomainError::from_transport(failure, operation, subject)),
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Extension trait for Option -> DomainError conversion
pub trait OptionExt<T> {
    fn ok_or_user_not_found(self, id: &str) -> DomainResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_user_not_found(self, id: &str) -> DomainResult<T> {
        self.ok_or_else(|| DomainError::UserNotFound(id.to_string()))
    }
}
