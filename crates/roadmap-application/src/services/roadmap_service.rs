//! Roadmap Command Service
//!
//! Composite entry point for roadmap writes: roadmap-level commands live
//! here, nested commands are delegated to the per-level services, which all
//! share one [`RoadmapCommitter`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use roadmap_domain::repositories::RoadmapRepository;
use roadmap_domain::roadmap::{Roadmap, RoadmapUpdate};
use roadmap_domain::services::RoadmapValidationService;
use roadmap_domain::value_objects::RoadmapId;

use super::committer::RoadmapCommitter;
use super::initiative_service::InitiativeService;
use super::item_service::ItemService;
use super::timeframe_service::TimeframeService;
use crate::dto::{parse_id, CreateRoadmapCommand, UpdateRoadmapCommand};
use crate::errors::ApplicationResult;
use crate::events::EventPublisher;

/// Roadmap Command Service
pub struct RoadmapCommandService<R, E>
where
    R: RoadmapRepository,
    E: EventPublisher,
{
    committer: Arc<RoadmapCommitter<R, E>>,
    timeframes: TimeframeService<R, E>,
    initiatives: InitiativeService<R, E>,
    items: ItemService<R, E>,
}

impl<R, E> RoadmapCommandService<R, E>
where
    R: RoadmapRepository,
    E: EventPublisher,
{
    /// Create a new RoadmapCommandService with injected dependencies
    pub fn new(repository: Arc<R>, events: Arc<E>) -> Self {
        Self::from_committer(Arc::new(RoadmapCommitter::new(repository, events)))
    }

    /// Same as [`new`](Self::new) with a custom rule set
    pub fn with_validator(repository: Arc<R>, events: Arc<E>, validator: RoadmapValidationService) -> Self {
        Self::from_committer(Arc::new(RoadmapCommitter::with_validator(
            repository, events, validator,
        )))
    }

    fn from_committer(committer: Arc<RoadmapCommitter<R, E>>) -> Self {
        Self {
            timeframes: TimeframeService::new(Arc::clone(&committer)),
            initiatives: InitiativeService::new(Arc::clone(&committer)),
            items: ItemService::new(Arc::clone(&committer)),
            committer,
        }
    }

    pub fn timeframes(&self) -> &TimeframeService<R, E> {
        &self.timeframes
    }

    pub fn initiatives(&self) -> &InitiativeService<R, E> {
        &self.initiatives
    }

    pub fn items(&self) -> &ItemService<R, E> {
        &self.items
    }

    /// Create and save a new, empty roadmap
    pub async fn create(&self, cmd: CreateRoadmapCommand) -> ApplicationResult<Roadmap> {
        let roadmap = Roadmap::create(cmd.title, cmd.description, cmd.version, cmd.owner)?;
        let saved = self.committer.commit(roadmap).await?;
        info!(roadmap_id = %saved.id(), owner = saved.owner(), "Created roadmap");
        Ok(saved)
    }

    pub async fn update(&self, roadmap_id: &str, cmd: UpdateRoadmapCommand) -> ApplicationResult<Option<Roadmap>> {
        let update = RoadmapUpdate {
            title: cmd.title,
            description: cmd.description,
            version: cmd.version,
            owner: cmd.owner,
        };
        self.committer
            .modify(roadmap_id, |roadmap| roadmap.update(&update))
            .await
    }

    /// Delete a roadmap; `false` when there was nothing to delete
    pub async fn delete(&self, roadmap_id: &str) -> ApplicationResult<bool> {
        let id = parse_id(roadmap_id, RoadmapId::from_string)?;
        let deleted = self.committer.repository().delete(&id).await?;
        if deleted {
            info!(roadmap_id, "Deleted roadmap");
        } else {
            warn!(roadmap_id, "Delete requested for unknown roadmap");
        }
        Ok(deleted)
    }

    /// Import a roadmap from its JSON record
    ///
    /// The record goes through the same normalize/validate/save path as every
    /// other write. An existing roadmap with the same id is replaced.
    pub async fn import(&self, record: Value) -> ApplicationResult<Roadmap> {
        let roadmap = Roadmap::from_persistence(record)?;
        let saved = self.committer.commit(roadmap).await?;
        info!(
            roadmap_id = %saved.id(),
            timeframes = saved.timeframe_count(),
            items = saved.item_count(),
            "Imported roadmap"
        );
        Ok(saved)
    }
}
