//! Domain events
//!
//! Events are value records describing a structural change to a roadmap. The
//! aggregate buffers them as it is mutated; the owning service drains them
//! with [`Roadmap::pull_events`](crate::roadmap::Roadmap::pull_events) once the
//! new state has been saved.

pub mod roadmap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use roadmap::*;

/// Common behaviour of every domain event
pub trait DomainEvent: std::fmt::Debug + Send + Sync {
    /// Unique id of this event occurrence
    fn event_id(&self) -> Uuid;

    /// Id of the aggregate the event belongs to
    fn aggregate_id(&self) -> &str;

    fn occurred_at(&self) -> DateTime<Utc>;

    /// Stable event type name used for handler routing
    fn event_type(&self) -> &'static str;
}

/// Metadata shared by all events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Every event the roadmap aggregate can raise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum RoadmapEvent {
    RoadmapCreated(RoadmapCreated),
    RoadmapUpdated(RoadmapUpdated),
    TimeframeAdded(TimeframeAdded),
    TimeframeUpdated(TimeframeUpdated),
    TimeframeRemoved(TimeframeRemoved),
    InitiativeAdded(InitiativeAdded),
    InitiativeUpdated(InitiativeUpdated),
    InitiativeRemoved(InitiativeRemoved),
    InitiativeMoved(InitiativeMoved),
    InitiativePriorityChanged(InitiativePriorityChanged),
    InitiativeCategoryChanged(InitiativeCategoryChanged),
    ItemAdded(ItemAdded),
    ItemUpdated(ItemUpdated),
    ItemRemoved(ItemRemoved),
    ItemStatusChanged(ItemStatusChanged),
}

impl RoadmapEvent {
    fn inner(&self) -> &dyn DomainEvent {
        match self {
            RoadmapEvent::RoadmapCreated(e) => e,
            RoadmapEvent::RoadmapUpdated(e) => e,
            RoadmapEvent::TimeframeAdded(e) => e,
            RoadmapEvent::TimeframeUpdated(e) => e,
            RoadmapEvent::TimeframeRemoved(e) => e,
            RoadmapEvent::InitiativeAdded(e) => e,
            RoadmapEvent::InitiativeUpdated(e) => e,
            RoadmapEvent::InitiativeRemoved(e) => e,
            RoadmapEvent::InitiativeMoved(e) => e,
            RoadmapEvent::InitiativePriorityChanged(e) => e,
            RoadmapEvent::InitiativeCategoryChanged(e) => e,
            RoadmapEvent::ItemAdded(e) => e,
            RoadmapEvent::ItemUpdated(e) => e,
            RoadmapEvent::ItemRemoved(e) => e,
            RoadmapEvent::ItemStatusChanged(e) => e,
        }
    }
}

impl DomainEvent for RoadmapEvent {
    fn event_id(&self) -> Uuid {
        self.inner().event_id()
    }

    fn aggregate_id(&self) -> &str {
        self.inner().aggregate_id()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.inner().occurred_at()
    }

    fn event_type(&self) -> &'static str {
        self.inner().event_type()
    }
}

macro_rules! into_roadmap_event {
    ($($name:ident),* $(,)?) => {
        $(
            impl From<$name> for RoadmapEvent {
                fn from(event: $name) -> Self {
                    RoadmapEvent::$name(event)
                }
            }
        )*
    };
}

into_roadmap_event!(
    RoadmapCreated,
    RoadmapUpdated,
    TimeframeAdded,
    TimeframeUpdated,
    TimeframeRemoved,
    InitiativeAdded,
    InitiativeUpdated,
    InitiativeRemoved,
    InitiativeMoved,
    InitiativePriorityChanged,
    InitiativeCategoryChanged,
    ItemAdded,
    ItemUpdated,
    ItemRemoved,
    ItemStatusChanged,
);
