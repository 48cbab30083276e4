//! Domain errors for the roadmap aggregate

use thiserror::Error;

use crate::services::RuleViolation;
use crate::value_objects::EntityLevel;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },

    #[error("{level} not found: {id}{}", .within.as_ref().map(|p| format!(" (in {p})")).unwrap_or_default())]
    NotFound {
        level: EntityLevel,
        id: String,
        /// Id of the parent the lookup was scoped to
        within: Option<String>,
    },

    #[error("Roadmap validation failed with {} violation(s): {}", .violations.len(), summarize(.violations))]
    ValidationFailed { violations: Vec<RuleViolation> },

    #[error("Serialization failed: {reason}")]
    SerializationFailed { reason: String },

    #[error("Deserialization failed: {reason}")]
    DeserializationFailed { reason: String },

    #[error("Repository error: {reason}")]
    Repository { reason: String },
}

impl DomainError {
    /// Not-found error for a top-level lookup
    pub fn not_found(level: EntityLevel, id: impl ToString) -> Self {
        Self::NotFound {
            level,
            id: id.to_string(),
            within: None,
        }
    }

    /// Not-found error for a lookup scoped to a parent entity
    pub fn not_found_in(level: EntityLevel, id: impl ToString, parent: impl ToString) -> Self {
        Self::NotFound {
            level,
            id: id.to_string(),
            within: Some(parent.to_string()),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            reason: format!("{field} cannot be empty"),
        }
    }
}

fn summarize(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
