//! Roadmap-related DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roadmap_domain::events::ItemPath;
use roadmap_domain::roadmap::{Roadmap, RoadmapInitiative, RoadmapItem, RoadmapTimeframe};
use roadmap_domain::value_objects::{Category, Priority, Status, TimeframeId};

// ============================================================================
// Commands
// ============================================================================

/// Command to create a new roadmap
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoadmapCommand {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub version: String,
    pub owner: String,
}

/// Command to update roadmap metadata; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoadmapCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub owner: Option<String>,
}

/// Command to add a timeframe; without `order` it goes last
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTimeframeCommand {
    pub name: String,
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeframeCommand {
    pub name: Option<String>,
    pub order: Option<u32>,
}

/// Command to add an initiative; category and priority are wire literals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddInitiativeCommand {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInitiativeCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

/// Command to add an item; status is a wire literal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemCommand {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
    #[serde(default)]
    pub related_entities: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Initiative listing filter; every set field must match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeFilter {
    pub timeframe_id: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

// ============================================================================
// Results
// ============================================================================

/// A saved roadmap together with the id of the entity a command created
#[derive(Debug, Clone)]
pub struct Created<Id> {
    pub roadmap: Roadmap,
    pub id: Id,
}

// ============================================================================
// Views
// ============================================================================

/// Roadmap summary DTO (list view)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapSummaryDto {
    pub id: String,
    pub title: String,
    pub version: String,
    pub owner: String,
    pub timeframe_count: usize,
    pub initiative_count: usize,
    pub item_count: usize,
    pub updated_at: DateTime<Utc>,
}

impl RoadmapSummaryDto {
    /// Create from domain aggregate
    pub fn from_domain(roadmap: &Roadmap) -> Self {
        Self {
            id: roadmap.id().to_string(),
            title: roadmap.title().to_string(),
            version: roadmap.version().to_string(),
            owner: roadmap.owner().to_string(),
            timeframe_count: roadmap.timeframe_count(),
            initiative_count: roadmap.initiative_count(),
            item_count: roadmap.item_count(),
            updated_at: roadmap.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeView {
    pub id: String,
    pub name: String,
    pub order: u32,
    pub initiative_count: usize,
}

impl TimeframeView {
    pub fn from_domain(timeframe: &RoadmapTimeframe) -> Self {
        Self {
            id: timeframe.id().to_string(),
            name: timeframe.name().to_string(),
            order: timeframe.order(),
            initiative_count: timeframe.initiative_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiativeView {
    pub id: String,
    pub timeframe_id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub item_count: usize,
}

impl InitiativeView {
    pub fn from_domain(timeframe_id: &TimeframeId, initiative: &RoadmapInitiative) -> Self {
        Self {
            id: initiative.id().to_string(),
            timeframe_id: timeframe_id.to_string(),
            title: initiative.title().to_string(),
            description: initiative.description().to_string(),
            category: initiative.category(),
            priority: initiative.priority(),
            item_count: initiative.item_count(),
        }
    }
}

/// Item with its full id path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub roadmap_id: String,
    pub timeframe_id: String,
    pub initiative_id: String,
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub related_entities: Vec<String>,
    pub notes: String,
}

impl ItemView {
    pub fn from_domain(roadmap: &Roadmap, path: &ItemPath, item: &RoadmapItem) -> Self {
        Self {
            roadmap_id: roadmap.id().to_string(),
            timeframe_id: path.timeframe_id.to_string(),
            initiative_id: path.initiative_id.to_string(),
            id: item.id().to_string(),
            title: item.title().to_string(),
            description: item.description().to_string(),
            status: item.status(),
            related_entities: item.related_entities().to_vec(),
            notes: item.notes().to_string(),
        }
    }
}

/// Delivery progress of one roadmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapProgressDto {
    pub roadmap_id: String,
    pub total_items: usize,
    /// Item count per status literal; every status is present
    pub by_status: BTreeMap<String, usize>,
    /// Completed share of non-cancelled items, 0-100
    pub completion_percentage: f32,
}

impl RoadmapProgressDto {
    pub fn from_domain(roadmap: &Roadmap) -> Self {
        let mut by_status: BTreeMap<String, usize> = Status::all()
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut total_items = 0;
        let mut completed = 0;
        let mut cancelled = 0;
        for (_, item) in roadmap.items_with_path() {
            total_items += 1;
            match item.status() {
                Status::Completed => completed += 1,
                Status::Cancelled => cancelled += 1,
                _ => {}
            }
            *by_status.entry(item.status().as_str().to_string()).or_default() += 1;
        }

        let counted = total_items - cancelled;
        let completion_percentage = if counted == 0 {
            0.0
        } else {
            completed as f32 / counted as f32 * 100.0
        };

        Self {
            roadmap_id: roadmap.id().to_string(),
            total_items,
            by_status,
            completion_percentage,
        }
    }
}
