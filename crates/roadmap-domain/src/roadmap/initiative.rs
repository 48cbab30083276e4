//! Initiative entity within a Timeframe

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{EntityMap, Keyed};
use super::item::RoadmapItem;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{Category, EntityLevel, InitiativeId, ItemId, Priority};

/// A themed body of work scheduled into one timeframe
///
/// All mutators return a new initiative; `self` is never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapInitiative {
    pub(crate) id: InitiativeId,

    pub(crate) title: String,

    #[serde(default)]
    pub(crate) description: String,

    #[serde(default)]
    pub(crate) category: Category,

    #[serde(default)]
    pub(crate) priority: Priority,

    #[serde(default)]
    pub(crate) items: EntityMap<RoadmapItem>,

    #[serde(default = "Utc::now")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub(crate) updated_at: DateTime<Utc>,
}

/// Partial update of an initiative
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitiativeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
}

impl RoadmapInitiative {
    pub fn create(
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        priority: Priority,
    ) -> DomainResult<Self> {
        Self::create_with_id(InitiativeId::new(), title, description, category, priority)
    }

    pub fn create_with_id(
        id: InitiativeId,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        priority: Priority,
    ) -> DomainResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::required("initiative title"));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            title,
            description: description.into(),
            category,
            priority,
            items: EntityMap::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Add an item; an item with the same id is replaced
    pub fn add_item(&self, item: RoadmapItem) -> Self {
        let mut next = self.clone();
        next.items.insert(item);
        next.updated_at = Utc::now();
        next
    }

    /// Replace an existing item
    pub fn update_item(&self, item: RoadmapItem) -> DomainResult<Self> {
        if !self.items.contains(item.id()) {
            return Err(DomainError::not_found_in(EntityLevel::Item, item.id(), &self.id));
        }
        Ok(self.add_item(item))
    }

    pub fn remove_item(&self, item_id: &ItemId) -> DomainResult<Self> {
        let mut next = self.clone();
        next.items
            .remove(item_id)
            .ok_or_else(|| DomainError::not_found_in(EntityLevel::Item, item_id, &self.id))?;
        next.updated_at = Utc::now();
        Ok(next)
    }

    /// Apply a partial update, returning the new initiative and the changed field names
    pub fn apply(&self, update: &InitiativeUpdate) -> DomainResult<(Self, Vec<String>)> {
        let mut next = self.clone();
        let mut changed = Vec::new();

        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(DomainError::required("initiative title"));
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
        if let Some(category) = update.category {
            if category != self.category {
                next.category = category;
                changed.push("category".to_string());
            }
        }
        if let Some(priority) = update.priority {
            if priority != self.priority {
                next.priority = priority;
                changed.push("priority".to_string());
            }
        }

        if !changed.is_empty() {
            next.updated_at = Utc::now();
        }
        Ok((next, changed))
    }

    /// Look up an item, failing with a not-found error scoped to this initiative
    pub fn item(&self, item_id: &ItemId) -> DomainResult<&RoadmapItem> {
        self.items
            .get(item_id)
            .ok_or_else(|| DomainError::not_found_in(EntityLevel::Item, item_id, &self.id))
    }

    pub fn get_item(&self, item_id: &ItemId) -> Option<&RoadmapItem> {
        self.items.get(item_id)
    }

    /// Items in insertion order
    pub fn items(&self) -> Vec<&RoadmapItem> {
        self.items.iter().collect()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Title trimmed and case-folded, used for duplicate detection
    pub fn normalized_title(&self) -> String {
        self.title.trim().to_lowercase()
    }

    pub fn id(&self) -> &InitiativeId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Keyed for RoadmapInitiative {
    type Key = InitiativeId;

    fn key(&self) -> &InitiativeId {
        &self.id
    }
}
