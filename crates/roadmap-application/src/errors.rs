//! Application layer error types
//!
//! These errors represent application-level failures that are suitable
//! for API/UI consumption. They wrap domain errors with additional context.
//!
//! An unknown roadmap or note id is not an error: commands return `Ok(None)`.

use thiserror::Error;

use roadmap_domain::errors::DomainError;
use roadmap_domain::services::RuleViolation;
use roadmap_domain::value_objects::EntityLevel;

/// Application layer result type
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application layer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    // === Input Errors ===
    /// Malformed id, unknown literal or empty required field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // === Not Found Errors ===
    /// An id below a resolved roadmap does not exist
    #[error("{level} not found: {id}{}", .within.as_ref().map(|p| format!(" (in {p})")).unwrap_or_default())]
    NotFoundNested {
        level: EntityLevel,
        id: String,
        within: Option<String>,
    },

    // === Business Rule Violations ===
    /// Aggregate-wide validation failed; every violation is listed
    #[error("Validation failed: {}", .0.iter().map(|v| v.message.as_str()).collect::<Vec<_>>().join("; "))]
    ValidationFailed(Vec<RuleViolation>),

    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    // === Infrastructure Errors ===
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { level, id, within } => {
                ApplicationError::NotFoundNested { level, id, within }
            }
            DomainError::ValidationFailed { violations } => {
                ApplicationError::ValidationFailed(violations)
            }
            DomainError::ValidationError { field, reason } => {
                ApplicationError::InvalidInput(format!("{field}: {reason}"))
            }
            DomainError::InvalidValue { .. } => ApplicationError::InvalidInput(err.to_string()),
            DomainError::BusinessRuleViolation { rule } => {
                ApplicationError::BusinessRuleViolation(rule)
            }
            DomainError::SerializationFailed { .. }
            | DomainError::DeserializationFailed { .. }
            | DomainError::Repository { .. } => ApplicationError::Persistence(err.to_string()),
        }
    }
}
