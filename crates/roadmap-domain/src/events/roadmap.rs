//! Roadmap aggregate domain events
//!
//! Every event carries the full id path from the roadmap down to the entity
//! that changed, and value-change events carry both the previous and the
//! current value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DomainEvent, EventMetadata};
use crate::value_objects::{
    Category, InitiativeId, ItemId, Priority, RoadmapId, Status, TimeframeId,
};

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.metadata.event_id
            }

            fn aggregate_id(&self) -> &str {
                self.roadmap_id.as_str()
            }

            fn occurred_at(&self) -> DateTime<Utc> {
                self.metadata.occurred_at
            }

            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

/// Event emitted when a roadmap is created
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapCreated {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub title: String,
    pub version: String,
    pub owner: String,
}

impl RoadmapCreated {
    pub fn new(roadmap_id: RoadmapId, title: String, version: String, owner: String) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            title,
            version,
            owner,
        }
    }
}

domain_event!(RoadmapCreated);

/// Event emitted when roadmap-level metadata changes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapUpdated {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    /// Names of the fields whose value changed
    pub changed_fields: Vec<String>,
}

impl RoadmapUpdated {
    pub fn new(roadmap_id: RoadmapId, changed_fields: Vec<String>) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            changed_fields,
        }
    }
}

domain_event!(RoadmapUpdated);

/// Event emitted when a timeframe is added to a roadmap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeAdded {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub timeframe_id: TimeframeId,
    pub name: String,
    pub order: u32,
}

impl TimeframeAdded {
    pub fn new(roadmap_id: RoadmapId, timeframe_id: TimeframeId, name: String, order: u32) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            timeframe_id,
            name,
            order,
        }
    }
}

domain_event!(TimeframeAdded);

/// Event emitted when a timeframe is renamed or reordered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeUpdated {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub timeframe_id: TimeframeId,
    pub previous_name: String,
    pub name: String,
    pub previous_order: u32,
    pub order: u32,
}

impl TimeframeUpdated {
    pub fn new(
        roadmap_id: RoadmapId,
        timeframe_id: TimeframeId,
        (previous_name, name): (String, String),
        (previous_order, order): (u32, u32),
    ) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            timeframe_id,
            previous_name,
            name,
            previous_order,
            order,
        }
    }
}

domain_event!(TimeframeUpdated);

/// Event emitted when a timeframe and everything beneath it is removed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeRemoved {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub timeframe_id: TimeframeId,
    pub initiative_count: usize,
}

impl TimeframeRemoved {
    pub fn new(roadmap_id: RoadmapId, timeframe_id: TimeframeId, initiative_count: usize) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            timeframe_id,
            initiative_count,
        }
    }
}

domain_event!(TimeframeRemoved);

/// Event emitted when an initiative is added to a timeframe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeAdded {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub timeframe_id: TimeframeId,
    pub initiative_id: InitiativeId,
    pub title: String,
    pub category: Category,
    pub priority: Priority,
}

impl InitiativeAdded {
    pub fn new(
        roadmap_id: RoadmapId,
        timeframe_id: TimeframeId,
        initiative_id: InitiativeId,
        title: String,
        category: Category,
        priority: Priority,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            timeframe_id,
            initiative_id,
            title,
            category,
            priority,
        }
    }
}

domain_event!(InitiativeAdded);

/// Event emitted when initiative title or description changes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeUpdated {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub timeframe_id: TimeframeId,
    pub initiative_id: InitiativeId,
    pub changed_fields: Vec<String>,
}

impl InitiativeUpdated {
    pub fn new(
        roadmap_id: RoadmapId,
        timeframe_id: TimeframeId,
        initiative_id: InitiativeId,
        changed_fields: Vec<String>,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            timeframe_id,
            initiative_id,
            changed_fields,
        }
    }
}

domain_event!(InitiativeUpdated);

/// Event emitted when an initiative is removed from a timeframe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeRemoved {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub timeframe_id: TimeframeId,
    pub initiative_id: InitiativeId,
    pub title: String,
}

impl InitiativeRemoved {
    pub fn new(
        roadmap_id: RoadmapId,
        timeframe_id: TimeframeId,
        initiative_id: InitiativeId,
        title: String,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            timeframe_id,
            initiative_id,
            title,
        }
    }
}

domain_event!(InitiativeRemoved);

/// Event emitted when an initiative moves between timeframes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeMoved {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub initiative_id: InitiativeId,
    pub from_timeframe_id: TimeframeId,
    pub to_timeframe_id: TimeframeId,
}

impl InitiativeMoved {
    pub fn new(
        roadmap_id: RoadmapId,
        initiative_id: InitiativeId,
        from_timeframe_id: TimeframeId,
        to_timeframe_id: TimeframeId,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            initiative_id,
            from_timeframe_id,
            to_timeframe_id,
        }
    }
}

domain_event!(InitiativeMoved);

/// Event emitted when an initiative's priority changes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitiativePriorityChanged {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub timeframe_id: TimeframeId,
    pub initiative_id: InitiativeId,
    pub previous: Priority,
    pub current: Priority,
}

impl InitiativePriorityChanged {
    pub fn new(
        roadmap_id: RoadmapId,
        timeframe_id: TimeframeId,
        initiative_id: InitiativeId,
        previous: Priority,
        current: Priority,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            timeframe_id,
            initiative_id,
            previous,
            current,
        }
    }
}

domain_event!(InitiativePriorityChanged);

/// Event emitted when an initiative's category changes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeCategoryChanged {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    pub timeframe_id: TimeframeId,
    pub initiative_id: InitiativeId,
    pub previous: Category,
    pub current: Category,
}

impl InitiativeCategoryChanged {
    pub fn new(
        roadmap_id: RoadmapId,
        timeframe_id: TimeframeId,
        initiative_id: InitiativeId,
        previous: Category,
        current: Category,
    ) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            timeframe_id,
            initiative_id,
            previous,
            current,
        }
    }
}

domain_event!(InitiativeCategoryChanged);

/// Id path of an item inside a roadmap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ItemPath {
    pub timeframe_id: TimeframeId,
    pub initiative_id: InitiativeId,
    pub item_id: ItemId,
}

/// Event emitted when an item is added to an initiative
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemAdded {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    #[serde(flatten)]
    pub path: ItemPath,
    pub title: String,
    pub status: Status,
}

impl ItemAdded {
    pub fn new(roadmap_id: RoadmapId, path: ItemPath, title: String, status: Status) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            path,
            title,
            status,
        }
    }
}

domain_event!(ItemAdded);

/// Event emitted when item text fields or references change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdated {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    #[serde(flatten)]
    pub path: ItemPath,
    pub changed_fields: Vec<String>,
}

impl ItemUpdated {
    pub fn new(roadmap_id: RoadmapId, path: ItemPath, changed_fields: Vec<String>) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            path,
            changed_fields,
        }
    }
}

domain_event!(ItemUpdated);

/// Event emitted when an item is removed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemRemoved {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    #[serde(flatten)]
    pub path: ItemPath,
    pub title: String,
}

impl ItemRemoved {
    pub fn new(roadmap_id: RoadmapId, path: ItemPath, title: String) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            path,
            title,
        }
    }
}

domain_event!(ItemRemoved);

/// Event emitted when an item's status changes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatusChanged {
    pub metadata: EventMetadata,
    pub roadmap_id: RoadmapId,
    #[serde(flatten)]
    pub path: ItemPath,
    pub previous: Status,
    pub current: Status,
}

impl ItemStatusChanged {
    pub fn new(roadmap_id: RoadmapId, path: ItemPath, previous: Status, current: Status) -> Self {
        Self {
            metadata: EventMetadata::new(),
            roadmap_id,
            path,
            previous,
            current,
        }
    }
}

domain_event!(ItemStatusChanged);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RoadmapEvent;

    fn path() -> ItemPath {
        ItemPath {
            timeframe_id: TimeframeId::new(),
            initiative_id: InitiativeId::new(),
            item_id: ItemId::new(),
        }
    }

    #[test]
    fn test_status_changed_carries_path_and_values() {
        let roadmap_id = RoadmapId::new();
        let p = path();
        let event = ItemStatusChanged::new(
            roadmap_id.clone(),
            p.clone(),
            Status::Planned,
            Status::InProgress,
        );

        assert_eq!(event.aggregate_id(), roadmap_id.as_str());
        assert_eq!(event.path, p);
        assert_eq!(event.previous, Status::Planned);
        assert_eq!(event.current, Status::InProgress);
        assert_eq!(event.event_type(), "ItemStatusChanged");
    }

    #[test]
    fn test_enum_delegates_to_inner_event() {
        let event = InitiativePriorityChanged::new(
            RoadmapId::new(),
            TimeframeId::new(),
            InitiativeId::new(),
            Priority::Low,
            Priority::Critical,
        );
        let id = event.event_id();
        let wrapped: RoadmapEvent = event.into();

        assert_eq!(wrapped.event_type(), "InitiativePriorityChanged");
        assert_eq!(wrapped.event_id(), id);
    }

    #[test]
    fn test_event_serialization() {
        let event: RoadmapEvent = ItemAdded::new(
            RoadmapId::new(),
            path(),
            "Profile hotspots".to_string(),
            Status::Planned,
        )
        .into();

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ItemAdded");
        assert_eq!(json["payload"]["status"], "planned");
        assert!(json["payload"]["itemId"].is_string());

        let back: RoadmapEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
