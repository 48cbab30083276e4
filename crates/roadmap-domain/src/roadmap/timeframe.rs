//! Timeframe entity within a Roadmap

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collection::{EntityMap, Keyed};
use super::initiative::RoadmapInitiative;
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{EntityLevel, InitiativeId, TimeframeId};

/// A scheduling bucket (quarter, sprint, "Later", …) holding initiatives
///
/// `order` is the display sequence. It need not be unique; normalization
/// renumbers timeframes to 1..n.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapTimeframe {
    pub(crate) id: TimeframeId,

    pub(crate) name: String,

    #[serde(default)]
    pub(crate) order: u32,

    #[serde(default)]
    pub(crate) initiatives: EntityMap<RoadmapInitiative>,

    #[serde(default = "Utc::now")]
    pub(crate) created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub(crate) updated_at: DateTime<Utc>,
}

/// Partial update of a timeframe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeframeUpdate {
    pub name: Option<String>,
    pub order: Option<u32>,
}

impl RoadmapTimeframe {
    pub fn create(name: impl Into<String>, order: u32) -> DomainResult<Self> {
        Self::create_with_id(TimeframeId::new(), name, order)
    }

    pub fn create_with_id(id: TimeframeId, name: impl Into<String>, order: u32) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::required("timeframe name"));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            name,
            order,
            initiatives: EntityMap::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Add an initiative; an initiative with the same id is replaced
    pub fn add_initiative(&self, initiative: RoadmapInitiative) -> Self {
        let mut next = self.clone();
        next.initiatives.insert(initiative);
        next.updated_at = Utc::now();
        next
    }

    /// Replace an existing initiative
    pub fn update_initiative(&self, initiative: RoadmapInitiative) -> DomainResult<Self> {
        if !self.initiatives.contains(initiative.id()) {
            return Err(DomainError::not_found_in(
                EntityLevel::Initiative,
                initiative.id(),
                &self.id,
            ));
        }
        Ok(self.add_initiative(initiative))
    }

    pub fn remove_initiative(&self, initiative_id: &InitiativeId) -> DomainResult<Self> {
        let mut next = self.clone();
        next.initiatives.remove(initiative_id).ok_or_else(|| {
            DomainError::not_found_in(EntityLevel::Initiative, initiative_id, &self.id)
        })?;
        next.updated_at = Utc::now();
        Ok(next)
    }

    /// Apply a partial update, returning the new timeframe and whether anything changed
    pub fn apply(&self, update: &TimeframeUpdate) -> DomainResult<(Self, bool)> {
        let mut next = self.clone();
        let mut changed = false;

        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(DomainError::required("timeframe name"));
            }
            if *name != self.name {
                next.name = name.clone();
                changed = true;
            }
        }
        if let Some(order) = update.order {
            if order != self.order {
                next.order = order;
                changed = true;
            }
        }

        if changed {
            next.updated_at = Utc::now();
        }
        Ok((next, changed))
    }

    /// Look up an initiative, failing with a not-found error scoped to this timeframe
    pub fn initiative(&self, initiative_id: &InitiativeId) -> DomainResult<&RoadmapInitiative> {
        self.initiatives.get(initiative_id).ok_or_else(|| {
            DomainError::not_found_in(EntityLevel::Initiative, initiative_id, &self.id)
        })
    }

    pub fn get_initiative(&self, initiative_id: &InitiativeId) -> Option<&RoadmapInitiative> {
        self.initiatives.get(initiative_id)
    }

    /// Initiatives in display order
    pub fn initiatives(&self) -> Vec<&RoadmapInitiative> {
        self.initiatives.iter().collect()
    }

    pub fn initiative_count(&self) -> usize {
        self.initiatives.len()
    }

    pub fn id(&self) -> &TimeframeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Keyed for RoadmapTimeframe {
    type Key = TimeframeId;

    fn key(&self) -> &TimeframeId {
        &self.id
    }
}
