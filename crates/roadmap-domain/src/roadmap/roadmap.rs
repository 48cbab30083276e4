//! Roadmap Aggregate Root
//!
//! Roadmap aggregate with copy-on-write semantics
//! - Owns timeframes, which own initiatives, which own items
//! - Every mutator takes `&self` and returns a new aggregate; the changed
//!   entity and each of its ancestors are fresh values
//! - Structural changes buffer domain events on the returned aggregate
//! - Path lookups fail with a not-found error naming the missing level

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::collection::{EntityMap, Keyed};
use super::initiative::{InitiativeUpdate, RoadmapInitiative};
use super::item::{ItemUpdate, RoadmapItem};
use super::timeframe::{RoadmapTimeframe, TimeframeUpdate};
use crate::errors::{DomainError, DomainResult};
use crate::events::*;
use crate::value_objects::{EntityLevel, InitiativeId, ItemId, RoadmapId, Status, TimeframeId};

// ============================================================================
// Roadmap Aggregate Root
// ============================================================================

/// Roadmap Aggregate Root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    /// Immutable identity
    pub(crate) id: RoadmapId,

    #[serde(default)]
    pub(crate) title: String,

    #[serde(default)]
    pub(crate) description: String,

    #[serde(default)]
    pub(crate) version: String,

    #[serde(default)]
    pub(crate) owner: String,

    /// Timeframes in insertion order
    #[serde(default)]
    pub(crate) timeframes: EntityMap<RoadmapTimeframe>,

    #[serde(default = "Utc::now")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub(crate) updated_at: DateTime<Utc>,

    /// Events raised since the last `pull_events`; never persisted
    #[serde(skip)]
    pub(crate) pending_events: Vec<RoadmapEvent>,
}

/// Partial update of roadmap-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadmapUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub owner: Option<String>,
}

impl Roadmap {
    // ========================================================================
    // Factory Methods
    // ========================================================================

    /// Create a new roadmap, buffering a `RoadmapCreated` event
    pub fn create(
        title: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
        owner: impl Into<String>,
    ) -> DomainResult<Self> {
        let (title, version, owner) = (title.into(), version.into(), owner.into());
        for (field, value) in [("title", &title), ("version", &version), ("owner", &owner)] {
            if value.trim().is_empty() {
                return Err(DomainError::required(field));
            }
        }

        let id = RoadmapId::new();
        let now = Utc::now();
        let event = RoadmapCreated::new(id.clone(), title.clone(), version.clone(), owner.clone());

        Ok(Self {
            id,
            title,
            description: description.into(),
            version,
            owner,
            timeframes: EntityMap::new(),
            created_at: now,
            updated_at: now,
            pending_events: vec![event.into()],
        })
    }

    /// Plain JSON record of the aggregate, children as arrays
    pub fn to_json(&self) -> DomainResult<Value> {
        serde_json::to_value(self).map_err(|e| DomainError::SerializationFailed {
            reason: e.to_string(),
        })
    }

    /// Rebuild an aggregate from a stored record
    ///
    /// Missing optional fields fall back to defaults; the result carries no
    /// pending events. Invariants are not checked here, that is the
    /// validation service's job.
    pub fn from_persistence(record: Value) -> DomainResult<Self> {
        serde_json::from_value(record).map_err(|e| DomainError::DeserializationFailed {
            reason: format!("roadmap record: {e}"),
        })
    }

    // ========================================================================
    // Roadmap Operations
    // ========================================================================

    pub fn update(&self, update: &RoadmapUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        let mut changed = Vec::new();

        let required = [
            ("title", &update.title, &mut next.title),
            ("version", &update.version, &mut next.version),
            ("owner", &update.owner, &mut next.owner),
        ];
        for (field, value, slot) in required {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(DomainError::required(field));
                }
                if value.as_str() != slot.as_str() {
                    *slot = value.clone();
                    changed.push(field.to_string());
                }
            }
        }
        if let Some(description) = &update.description {
            if *description != next.description {
                next.description = description.clone();
                changed.push("description".to_string());
            }
        }

        if !changed.is_empty() {
            next.touch();
            let id = next.id.clone();
            next.record(RoadmapUpdated::new(id, changed));
        }
        Ok(next)
    }

    // ========================================================================
    // Timeframe Operations
    // ========================================================================

    /// Add a timeframe; a timeframe with the same id is replaced
    pub fn add_timeframe(&self, timeframe: RoadmapTimeframe) -> Self {
        let event = TimeframeAdded::new(
            self.id.clone(),
            timeframe.id().clone(),
            timeframe.name().to_string(),
            timeframe.order(),
        );
        let mut next = self.with_timeframe(timeframe);
        next.record(event);
        next
    }

    pub fn update_timeframe(&self, timeframe_id: &TimeframeId, update: &TimeframeUpdate) -> DomainResult<Self> {
        let current = self.timeframe(timeframe_id)?;
        let (updated, changed) = current.apply(update)?;
        if !changed {
            return Ok(self.clone());
        }

        let event = TimeframeUpdated::new(
            self.id.clone(),
            timeframe_id.clone(),
            (current.name().to_string(), updated.name().to_string()),
            (current.order(), updated.order()),
        );
        let mut next = self.with_timeframe(updated);
        // A reordered timeframe takes the requested slot among equal orders
        match event.order.cmp(&event.previous_order) {
            Ordering::Less => next.timeframes.move_to_front(timeframe_id),
            Ordering::Greater => next.timeframes.move_to_back(timeframe_id),
            Ordering::Equal => {}
        }
        next.record(event);
        Ok(next)
    }

    /// Remove a timeframe together with everything it owns
    pub fn remove_timeframe(&self, timeframe_id: &TimeframeId) -> DomainResult<Self> {
        let mut next = self.clone();
        let removed = next
            .timeframes
            .remove(timeframe_id)
            .ok_or_else(|| DomainError::not_found_in(EntityLevel::Timeframe, timeframe_id, &self.id))?;
        next.touch();
        next.record(TimeframeRemoved::new(
            self.id.clone(),
            timeframe_id.clone(),
            removed.initiative_count(),
        ));
        Ok(next)
    }

    // ========================================================================
    // Initiative Operations
    // ========================================================================

    /// Add an initiative to a timeframe; an initiative with the same id is replaced
    pub fn add_initiative(&self, timeframe_id: &TimeframeId, initiative: RoadmapInitiative) -> DomainResult<Self> {
        let timeframe = self.timeframe(timeframe_id)?;
        let event = InitiativeAdded::new(
            self.id.clone(),
            timeframe_id.clone(),
            initiative.id().clone(),
            initiative.title().to_string(),
            initiative.category(),
            initiative.priority(),
        );
        let mut next = self.with_timeframe(timeframe.add_initiative(initiative));
        next.record(event);
        Ok(next)
    }

    /// Update initiative fields
    ///
    /// Raises `InitiativePriorityChanged` / `InitiativeCategoryChanged` for
    /// those fields and `InitiativeUpdated` for title/description changes.
    pub fn update_initiative(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        update: &InitiativeUpdate,
    ) -> DomainResult<Self> {
        let timeframe = self.timeframe(timeframe_id)?;
        let current = timeframe.initiative(initiative_id)?;
        let (updated, changed) = current.apply(update)?;
        if changed.is_empty() {
            return Ok(self.clone());
        }

        let mut events: Vec<RoadmapEvent> = Vec::new();
        if updated.priority() != current.priority() {
            events.push(
                InitiativePriorityChanged::new(
                    self.id.clone(),
                    timeframe_id.clone(),
                    initiative_id.clone(),
                    current.priority(),
                    updated.priority(),
                )
                .into(),
            );
        }
        if updated.category() != current.category() {
            events.push(
                InitiativeCategoryChanged::new(
                    self.id.clone(),
                    timeframe_id.clone(),
                    initiative_id.clone(),
                    current.category(),
                    updated.category(),
                )
                .into(),
            );
        }
        let text_changes: Vec<String> = changed
            .into_iter()
            .filter(|f| f == "title" || f == "description")
            .collect();
        if !text_changes.is_empty() {
            events.push(
                InitiativeUpdated::new(
                    self.id.clone(),
                    timeframe_id.clone(),
                    initiative_id.clone(),
                    text_changes,
                )
                .into(),
            );
        }

        let mut next = self.with_timeframe(timeframe.update_initiative(updated)?);
        next.pending_events.extend(events);
        Ok(next)
    }

    pub fn remove_initiative(&self, timeframe_id: &TimeframeId, initiative_id: &InitiativeId) -> DomainResult<Self> {
        let timeframe = self.timeframe(timeframe_id)?;
        let title = timeframe.initiative(initiative_id)?.title().to_string();
        let mut next = self.with_timeframe(timeframe.remove_initiative(initiative_id)?);
        next.record(InitiativeRemoved::new(
            self.id.clone(),
            timeframe_id.clone(),
            initiative_id.clone(),
            title,
        ));
        Ok(next)
    }

    /// Move an initiative, unchanged, from one timeframe to another
    ///
    /// Both halves land in the one returned aggregate. Moving within the same
    /// timeframe returns an unchanged copy and raises no event.
    pub fn move_initiative(
        &self,
        from: &TimeframeId,
        to: &TimeframeId,
        initiative_id: &InitiativeId,
    ) -> DomainResult<Self> {
        let source = self.timeframe(from)?;
        let target = self.timeframe(to)?;
        let initiative = source.initiative(initiative_id)?.clone();
        if from == to {
            return Ok(self.clone());
        }

        let new_source = source.remove_initiative(initiative_id)?;
        let new_target = target.add_initiative(initiative);
        let mut next = self.with_timeframe(new_source).with_timeframe(new_target);
        next.record(InitiativeMoved::new(
            self.id.clone(),
            initiative_id.clone(),
            from.clone(),
            to.clone(),
        ));
        Ok(next)
    }

    // ========================================================================
    // Item Operations
    // ========================================================================

    /// Add an item; an item with the same id is replaced
    pub fn add_item(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        item: RoadmapItem,
    ) -> DomainResult<Self> {
        self.add_items(timeframe_id, initiative_id, vec![item])
    }

    /// Add several items in one step; either all of them land or none do
    pub fn add_items(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        items: Vec<RoadmapItem>,
    ) -> DomainResult<Self> {
        let events: Vec<RoadmapEvent> = items
            .iter()
            .map(|item| {
                ItemAdded::new(
                    self.id.clone(),
                    ItemPath {
                        timeframe_id: timeframe_id.clone(),
                        initiative_id: initiative_id.clone(),
                        item_id: item.id().clone(),
                    },
                    item.title().to_string(),
                    item.status(),
                )
                .into()
            })
            .collect();

        let mut next = self.with_initiative(timeframe_id, initiative_id, |initiative| {
            Ok(items
                .into_iter()
                .fold(initiative.clone(), |acc, item| acc.add_item(item)))
        })?;
        next.pending_events.extend(events);
        Ok(next)
    }

    pub fn update_item(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        item_id: &ItemId,
        update: &ItemUpdate,
    ) -> DomainResult<Self> {
        let current = self.item(timeframe_id, initiative_id, item_id)?;
        let (updated, changed) = current.apply(update)?;
        if changed.is_empty() {
            return Ok(self.clone());
        }
        let path = ItemPath {
            timeframe_id: timeframe_id.clone(),
            initiative_id: initiative_id.clone(),
            item_id: item_id.clone(),
        };
        let mut next = self.replace_item(timeframe_id, initiative_id, updated)?;
        next.record(ItemUpdated::new(self.id.clone(), path, changed));
        Ok(next)
    }

    /// Change an item's status, raising `ItemStatusChanged` when it differs
    pub fn change_item_status(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        item_id: &ItemId,
        status: Status,
    ) -> DomainResult<Self> {
        let current = self.item(timeframe_id, initiative_id, item_id)?;
        let previous = current.status();
        let updated = current.with_status(status)?;
        if previous == status {
            return Ok(self.clone());
        }
        let path = ItemPath {
            timeframe_id: timeframe_id.clone(),
            initiative_id: initiative_id.clone(),
            item_id: item_id.clone(),
        };
        let mut next = self.replace_item(timeframe_id, initiative_id, updated)?;
        next.record(ItemStatusChanged::new(self.id.clone(), path, previous, status));
        Ok(next)
    }

    pub fn remove_item(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        item_id: &ItemId,
    ) -> DomainResult<Self> {
        let title = self.item(timeframe_id, initiative_id, item_id)?.title().to_string();
        let mut next = self.with_initiative(timeframe_id, initiative_id, |initiative| {
            initiative.remove_item(item_id)
        })?;
        next.record(ItemRemoved::new(
            self.id.clone(),
            ItemPath {
                timeframe_id: timeframe_id.clone(),
                initiative_id: initiative_id.clone(),
                item_id: item_id.clone(),
            },
            title,
        ));
        Ok(next)
    }

    /// Record a weak reference from an item to an external document
    pub fn link_item(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        item_id: &ItemId,
        entity_id: &str,
    ) -> DomainResult<Self> {
        let current = self.item(timeframe_id, initiative_id, item_id)?;
        if current.references(entity_id) {
            return Ok(self.clone());
        }
        let updated = current.with_related_entity(entity_id);
        self.replace_item_with_reference_event(timeframe_id, initiative_id, updated)
    }

    pub fn unlink_item(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        item_id: &ItemId,
        entity_id: &str,
    ) -> DomainResult<Self> {
        let current = self.item(timeframe_id, initiative_id, item_id)?;
        if !current.references(entity_id) {
            return Ok(self.clone());
        }
        let updated = current.without_related_entity(entity_id);
        self.replace_item_with_reference_event(timeframe_id, initiative_id, updated)
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Look up a timeframe, failing with a not-found error scoped to this roadmap
    pub fn timeframe(&self, timeframe_id: &TimeframeId) -> DomainResult<&RoadmapTimeframe> {
        self.timeframes
            .get(timeframe_id)
            .ok_or_else(|| DomainError::not_found_in(EntityLevel::Timeframe, timeframe_id, &self.id))
    }

    pub fn initiative(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
    ) -> DomainResult<&RoadmapInitiative> {
        self.timeframe(timeframe_id)?.initiative(initiative_id)
    }

    pub fn item(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        item_id: &ItemId,
    ) -> DomainResult<&RoadmapItem> {
        self.initiative(timeframe_id, initiative_id)?.item(item_id)
    }

    pub fn get_timeframe(&self, timeframe_id: &TimeframeId) -> Option<&RoadmapTimeframe> {
        self.timeframes.get(timeframe_id)
    }

    /// Find an initiative anywhere in the roadmap
    pub fn locate_initiative(&self, initiative_id: &InitiativeId) -> Option<(&RoadmapTimeframe, &RoadmapInitiative)> {
        self.timeframes.iter().find_map(|tf| {
            tf.get_initiative(initiative_id)
                .map(|initiative| (tf, initiative))
        })
    }

    /// Timeframes in insertion order
    pub fn timeframes(&self) -> Vec<&RoadmapTimeframe> {
        self.timeframes.iter().collect()
    }

    /// Timeframes sorted by `order`, ties kept in insertion order
    pub fn timeframes_in_display_order(&self) -> Vec<&RoadmapTimeframe> {
        let mut timeframes = self.timeframes();
        timeframes.sort_by_key(|tf| tf.order());
        timeframes
    }

    /// Every item with its id path, in display order
    pub fn items_with_path(&self) -> Vec<(ItemPath, &RoadmapItem)> {
        self.timeframes_in_display_order()
            .into_iter()
            .flat_map(|tf| {
                tf.initiatives.iter().flat_map(move |initiative| {
                    initiative.items.iter().map(move |item| {
                        (
                            ItemPath {
                                timeframe_id: tf.id().clone(),
                                initiative_id: initiative.id().clone(),
                                item_id: item.id().clone(),
                            },
                            item,
                        )
                    })
                })
            })
            .collect()
    }

    pub fn timeframe_count(&self) -> usize {
        self.timeframes.len()
    }

    pub fn initiative_count(&self) -> usize {
        self.timeframes.iter().map(|tf| tf.initiative_count()).sum()
    }

    pub fn item_count(&self) -> usize {
        self.timeframes
            .iter()
            .flat_map(|tf| tf.initiatives.iter())
            .map(|initiative| initiative.item_count())
            .sum()
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Events raised since the last drain
    pub fn pending_events(&self) -> &[RoadmapEvent] {
        &self.pending_events
    }

    /// Drain and return buffered events
    pub fn pull_events(&mut self) -> Vec<RoadmapEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> &RoadmapId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ========================================================================
    // Copy-on-write helpers
    // ========================================================================

    fn with_timeframe(&self, timeframe: RoadmapTimeframe) -> Self {
        let mut next = self.clone();
        next.timeframes.insert(timeframe);
        next.touch();
        next
    }

    fn with_initiative<F>(&self, timeframe_id: &TimeframeId, initiative_id: &InitiativeId, change: F) -> DomainResult<Self>
    where
        F: FnOnce(&RoadmapInitiative) -> DomainResult<RoadmapInitiative>,
    {
        let timeframe = self.timeframe(timeframe_id)?;
        let updated = change(timeframe.initiative(initiative_id)?)?;
        Ok(self.with_timeframe(timeframe.update_initiative(updated)?))
    }

    fn replace_item(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        item: RoadmapItem,
    ) -> DomainResult<Self> {
        self.with_initiative(timeframe_id, initiative_id, |initiative| initiative.update_item(item))
    }

    fn replace_item_with_reference_event(
        &self,
        timeframe_id: &TimeframeId,
        initiative_id: &InitiativeId,
        item: RoadmapItem,
    ) -> DomainResult<Self> {
        let path = ItemPath {
            timeframe_id: timeframe_id.clone(),
            initiative_id: initiative_id.clone(),
            item_id: item.key().clone(),
        };
        let mut next = self.replace_item(timeframe_id, initiative_id, item)?;
        next.record(ItemUpdated::new(
            self.id.clone(),
            path,
            vec!["relatedEntities".to_string()],
        ));
        Ok(next)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn record(&mut self, event: impl Into<RoadmapEvent>) {
        self.pending_events.push(event.into());
    }

    /// Rewrite the `order` of buffered timeframe events to the stored order
    pub(crate) fn restate_timeframe_orders(&mut self) {
        for event in &mut self.pending_events {
            let (timeframe_id, order) = match event {
                RoadmapEvent::TimeframeAdded(e) => (&e.timeframe_id, &mut e.order),
                RoadmapEvent::TimeframeUpdated(e) => (&e.timeframe_id, &mut e.order),
                _ => continue,
            };
            if let Some(timeframe) = self.timeframes.get(timeframe_id) {
                *order = timeframe.order();
            }
        }
    }
}

impl PartialEq for Roadmap {
    /// Structural equality; buffered events are not part of the value
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.description == other.description
            && self.version == other.version
            && self.owner == other.owner
            && self.timeframes == other.timeframes
            && self.created_at == other.created_at
            && self.updated_at == other.updated_at
    }
}

impl Keyed for Roadmap {
    type Key = RoadmapId;

    fn key(&self) -> &RoadmapId {
        &self.id
    }
}
