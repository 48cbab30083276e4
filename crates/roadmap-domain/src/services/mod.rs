//! Domain services - stateless business logic that doesn't belong to entities
//!
//! Validation and normalization of the whole roadmap aggregate, split into
//! focused rules.

mod priority_balance;
mod timeframe_ordering;
mod validation;

pub use priority_balance::PriorityBalanceRule;
pub use timeframe_ordering::TimeframeOrderingRule;
pub use validation::{
    RequiredFieldsRule, RoadmapRule, RoadmapValidationService, RuleKind, RuleViolation,
    UniqueInitiativeTitlesRule, ValidationResult,
};
