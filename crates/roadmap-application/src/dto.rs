//! Data Transfer Objects (DTOs) for layer boundary crossing
//!
//! Commands carry plain strings; literals are parsed into value objects at
//! this boundary. Views are read-only projections of the aggregate.

pub mod note;
pub mod roadmap;

// Re-export commonly used DTOs
pub use note::*;
pub use roadmap::*;

use std::str::FromStr;

use roadmap_domain::errors::DomainError;

use crate::errors::{ApplicationError, ApplicationResult};

/// Parse an optional wire literal (`"bug-fix"`, `"in-progress"`, …)
pub(crate) fn parse_literal<T>(value: Option<&str>) -> ApplicationResult<Option<T>>
where
    T: FromStr<Err = DomainError>,
{
    value
        .map(|v| v.parse::<T>().map_err(ApplicationError::from))
        .transpose()
}

/// Parse an id, rejecting blank strings
pub(crate) fn parse_id<T, F>(value: &str, parse: F) -> ApplicationResult<T>
where
    F: FnOnce(&str) -> Result<T, DomainError>,
{
    parse(value).map_err(|_| ApplicationError::InvalidInput(format!("invalid id '{value}'")))
}
