//! Item entity within an Initiative
//!
//! The smallest unit of planned work. Carries a delivery status and weak
//! references to documents that live outside the roadmap (PRDs, stories, …).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::Keyed;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{ItemId, Status};

/// Item entity within an Initiative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    pub(crate) id: ItemId,

    pub(crate) title: String,

    #[serde(default)]
    pub(crate) description: String,

    #[serde(default)]
    pub(crate) status: Status,

    /// Ids of related documents; lookup only, never validated
    #[serde(default)]
    pub(crate) related_entities: Vec<String>,

    /// Free-text notes
    #[serde(default)]
    pub(crate) notes: String,

    #[serde(default = "Utc::now")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub(crate) updated_at: DateTime<Utc>,
}

/// Partial update of an item's text fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl RoadmapItem {
    /// Create a new item with a fresh id
    pub fn create(title: impl Into<String>, description: impl Into<String>, status: Status) -> DomainResult<Self> {
        Self::create_with_id(ItemId::new(), title, description, status)
    }

    /// Create an item with a caller-chosen id (imports, idempotent retries)
    pub fn create_with_id(
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        status: Status,
    ) -> DomainResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::required("item title"));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            title,
            description: description.into(),
            status,
            related_entities: Vec::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update, returning the new item and the changed field names
    pub fn apply(&self, update: &ItemUpdate) -> DomainResult<(Self, Vec<String>)> {
        let mut next = self.clone();
        let mut changed = Vec::new();

        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(DomainError::required("item title"));
            }
            if *title != self.title {
                next.title = title.clone();
                changed.push("title".to_string());
            }
        }
        if let Some(description) = &update.description {
            if *description != self.description {
                next.description = description.clone();
                changed.push("description".to_string());
            }
        }
        if let Some(notes) = &update.notes {
            if *notes != self.notes {
                next.notes = notes.clone();
                changed.push("notes".to_string());
            }
        }

        if !changed.is_empty() {
            next.updated_at = Utc::now();
        }
        Ok((next, changed))
    }

    /// Move to a new status, enforcing the allowed transitions
    pub fn with_status(&self, status: Status) -> DomainResult<Self> {
        if !self.status.can_transition_to(status) {
            return Err(DomainError::BusinessRuleViolation {
                rule: format!(
                    "Item {} cannot move from {} to {}",
                    self.id, self.status, status
                ),
            });
        }
        let mut next = self.clone();
        if next.status != status {
            next.status = status;
            next.updated_at = Utc::now();
        }
        Ok(next)
    }

    /// Record a weak reference; already-present ids are not duplicated
    pub fn with_related_entity(&self, entity_id: &str) -> Self {
        let mut next = self.clone();
        if !next.references(entity_id) {
            next.related_entities.push(entity_id.to_string());
            next.updated_at = Utc::now();
        }
        next
    }

    pub fn without_related_entity(&self, entity_id: &str) -> Self {
        let mut next = self.clone();
        let before = next.related_entities.len();
        next.related_entities.retain(|r| r != entity_id);
        if next.related_entities.len() != before {
            next.updated_at = Utc::now();
        }
        next
    }

    pub fn references(&self, entity_id: &str) -> bool {
        self.related_entities.iter().any(|r| r == entity_id)
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn related_entities(&self) -> &[String] {
        &self.related_entities
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Keyed for RoadmapItem {
    type Key = ItemId;

    fn key(&self) -> &ItemId {
        &self.id
    }
}
