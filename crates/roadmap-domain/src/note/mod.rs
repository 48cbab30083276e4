//! Roadmap Note Aggregate Root
//!
//! Flat aggregate persisted independently of any roadmap
//! - Weak references to roadmap entities by id only
//! - Copy-on-write mutators, same as the roadmap aggregate
//! - No domain events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{Category, NoteId, Priority};

/// Roadmap Note Aggregate Root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapNote {
    id: NoteId,

    #[serde(default)]
    title: String,

    #[serde(default)]
    content: String,

    #[serde(default)]
    category: Category,

    #[serde(default)]
    priority: Priority,

    /// Free-form target window ("Q3", "next release", …)
    #[serde(default)]
    timeline: Option<String>,

    /// Ids of roadmaps, timeframes, initiatives or items this note is about
    #[serde(default)]
    related_entities: Vec<String>,

    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

/// Partial update of a note
///
/// `timeline: Some(None)` clears the timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub timeline: Option<Option<String>>,
}

impl RoadmapNote {
    pub fn create(
        title: impl Into<String>,
        content: impl Into<String>,
        category: Category,
        priority: Priority,
        timeline: Option<String>,
    ) -> DomainResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::required("note title"));
        }
        let now = Utc::now();
        Ok(Self {
            id: NoteId::new(),
            title,
            content: content.into(),
            category,
            priority,
            timeline: timeline.filter(|t| !t.trim().is_empty()),
            related_entities: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&self, update: &NoteUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(DomainError::required("note title"));
            }
            next.title = title.clone();
        }
        if let Some(content) = &update.content {
            next.content = content.clone();
        }
        if let Some(category) = update.category {
            next.category = category;
        }
        if let Some(priority) = update.priority {
            next.priority = priority;
        }
        if let Some(timeline) = &update.timeline {
            next.timeline = timeline.clone().filter(|t| !t.trim().is_empty());
        }

        if next != *self {
            next.updated_at = Utc::now();
        }
        Ok(next)
    }

    /// Link the note to an entity id; linking twice is a no-op
    pub fn link(&self, entity_id: &str) -> DomainResult<Self> {
        let entity_id = entity_id.trim();
        if entity_id.is_empty() {
            return Err(DomainError::required("entity id"));
        }
        let mut next = self.clone();
        if !next.references(entity_id) {
            next.related_entities.push(entity_id.to_string());
            next.updated_at = Utc::now();
        }
        Ok(next)
    }

    pub fn unlink(&self, entity_id: &str) -> Self {
        let entity_id = entity_id.trim();
        let mut next = self.clone();
        let before = next.related_entities.len();
        next.related_entities.retain(|r| r != entity_id);
        if next.related_entities.len() != before {
            next.updated_at = Utc::now();
        }
        next
    }

    pub fn references(&self, entity_id: &str) -> bool {
        let entity_id = entity_id.trim();
        self.related_entities.iter().any(|r| r == entity_id)
    }

    pub fn to_json(&self) -> DomainResult<Value> {
        serde_json::to_value(self).map_err(|e| DomainError::SerializationFailed {
            reason: e.to_string(),
        })
    }

    pub fn from_persistence(record: Value) -> DomainResult<Self> {
        serde_json::from_value(record).map_err(|e| DomainError::DeserializationFailed {
            reason: format!("note record: {e}"),
        })
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn timeline(&self) -> Option<&str> {
        self.timeline.as_deref()
    }

    pub fn related_entities(&self) -> &[String] {
        &self.related_entities
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_note() -> RoadmapNote {
        RoadmapNote::create(
            "Consider caching",
            "Search latency is trending up",
            Category::TechnicalDebt,
            Priority::Medium,
            Some("Q3".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_create_note_requires_title() {
        let result = RoadmapNote::create("  ", "", Category::Feature, Priority::Low, None);
        assert!(matches!(result, Err(DomainError::ValidationError { .. })));
    }

    #[test]
    fn test_apply_update_returns_new_note() {
        let note = create_test_note();
        let updated = note
            .apply(&NoteUpdate {
                priority: Some(Priority::High),
                timeline: Some(None),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(note.priority(), Priority::Medium);
        assert_eq!(note.timeline(), Some("Q3"));
        assert_eq!(updated.priority(), Priority::High);
        assert_eq!(updated.timeline(), None);
        assert_eq!(updated.id(), note.id());
    }

    #[test]
    fn test_link_is_deduplicated() {
        let note = create_test_note().link("item-1").unwrap().link("item-1").unwrap();
        assert_eq!(note.related_entities(), &["item-1".to_string()]);

        let note = note.unlink("item-1").unlink("item-1");
        assert!(note.related_entities().is_empty());
    }

    #[test]
    fn test_unlink_trims_like_link() {
        let note = create_test_note().link(" item-1 ").unwrap();
        assert!(note.references(" item-1"));

        let note = note.unlink("  item-1 ");
        assert!(note.related_entities().is_empty());
    }

    #[test]
    fn test_link_rejects_blank_id() {
        assert!(create_test_note().link(" ").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let note = create_test_note().link("rm-1").unwrap();
        let json = note.to_json().unwrap();
        assert_eq!(json["category"], "technical-debt");
        assert_eq!(json["relatedEntities"][0], "rm-1");

        assert_eq!(RoadmapNote::from_persistence(json).unwrap(), note);
    }

    #[test]
    fn test_from_persistence_defaults() {
        let note = RoadmapNote::from_persistence(serde_json::json!({"id": "n-1", "title": "Bare"})).unwrap();
        assert_eq!(note.category(), Category::Feature);
        assert_eq!(note.priority(), Priority::Medium);
        assert!(note.timeline().is_none());
    }
}
