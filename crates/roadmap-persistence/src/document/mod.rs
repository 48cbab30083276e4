//! JSON Document Repository Implementations
//!
//! Repositories persisting aggregates as plain records in one shared
//! [`JsonDocumentStore`]. Records that fail to reconstruct are logged and
//! skipped when listing; looking one up by id reports the failure.

mod note_repository;
mod roadmap_repository;
mod store;

pub use note_repository::DocumentNoteRepository;
pub use roadmap_repository::DocumentRoadmapRepository;
pub use store::{JsonDocumentStore, ROADMAPS, ROADMAP_NOTES};

use serde_json::Value;
use tracing::error;

use roadmap_domain::errors::{DomainError, DomainResult};

/// Reconstruct every record, dropping the ones that fail
fn decode_records<T>(
    collection: &str,
    records: Vec<Value>,
    decode: impl Fn(Value) -> DomainResult<T>,
) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = store::record_id(&record).unwrap_or("<missing>").to_string();
            match decode(record) {
                Ok(entity) => Some(entity),
                Err(e) => {
                    error!(collection, id = %id, error = %e, "Skipping unreadable record");
                    None
                }
            }
        })
        .collect()
}

/// Reconstruct the last record with `id`
///
/// `Ok(None)` only when no record has `id`; a matching record that fails to
/// reconstruct is a `DeserializationFailed` error.
fn decode_by_id<T>(
    collection: &str,
    records: Vec<Value>,
    id: &str,
    decode: impl Fn(Value) -> DomainResult<T>,
) -> DomainResult<Option<T>> {
    let Some(record) = records.into_iter().rev().find(|r| store::record_id(r) == Some(id)) else {
        return Ok(None);
    };
    match decode(record) {
        Ok(entity) => Ok(Some(entity)),
        Err(e) => {
            error!(collection, id, error = %e, "Unreadable record");
            Err(match e {
                DomainError::DeserializationFailed { .. } => e,
                other => DomainError::DeserializationFailed {
                    reason: other.to_string(),
                },
            })
        }
    }
}
