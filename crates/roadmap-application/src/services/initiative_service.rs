//! Initiative Application Service

use std::sync::Arc;

use tracing::info;

use roadmap_domain::repositories::RoadmapRepository;
use roadmap_domain::roadmap::{InitiativeUpdate, Roadmap, RoadmapInitiative};
use roadmap_domain::value_objects::{Category, InitiativeId, Priority, TimeframeId};

use super::committer::RoadmapCommitter;
use crate::dto::{parse_id, parse_literal, AddInitiativeCommand, Created, UpdateInitiativeCommand};
use crate::errors::ApplicationResult;
use crate::events::EventPublisher;

/// Initiative commands scoped to a roadmap and timeframe
pub struct InitiativeService<R, E>
where
    R: RoadmapRepository,
    E: EventPublisher,
{
    committer: Arc<RoadmapCommitter<R, E>>,
}

impl<R, E> InitiativeService<R, E>
where
    R: RoadmapRepository,
    E: EventPublisher,
{
    pub fn new(committer: Arc<RoadmapCommitter<R, E>>) -> Self {
        Self { committer }
    }

    pub async fn add(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        cmd: AddInitiativeCommand,
    ) -> ApplicationResult<Option<Created<InitiativeId>>> {
        let timeframe_id = parse_id(timeframe_id, TimeframeId::from_string)?;
        let category = parse_literal::<Category>(cmd.category.as_deref())?.unwrap_or_default();
        let priority = parse_literal::<Priority>(cmd.priority.as_deref())?.unwrap_or_default();
        let initiative =
            RoadmapInitiative::create(cmd.title, cmd.description, category, priority)?;
        let id = initiative.id().clone();

        let result = self
            .committer
            .modify(roadmap_id, |roadmap| roadmap.add_initiative(&timeframe_id, initiative))
            .await?;
        if result.is_some() {
            info!(roadmap_id, timeframe_id = %timeframe_id, initiative_id = %id, "Added initiative");
        }
        Ok(result.map(|roadmap| Created { roadmap, id }))
    }

    pub async fn update(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        initiative_id: &str,
        cmd: UpdateInitiativeCommand,
    ) -> ApplicationResult<Option<Roadmap>> {
        let timeframe_id = parse_id(timeframe_id, TimeframeId::from_string)?;
        let initiative_id = parse_id(initiative_id, InitiativeId::from_string)?;
        let update = InitiativeUpdate {
            title: cmd.title,
            description: cmd.description,
            category: parse_literal(cmd.category.as_deref())?,
            priority: parse_literal(cmd.priority.as_deref())?,
        };
        self.committer
            .modify(roadmap_id, |roadmap| {
                roadmap.update_initiative(&timeframe_id, &initiative_id, &update)
            })
            .await
    }

    pub async fn remove(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        initiative_id: &str,
    ) -> ApplicationResult<Option<Roadmap>> {
        let timeframe_id = parse_id(timeframe_id, TimeframeId::from_string)?;
        let initiative_id = parse_id(initiative_id, InitiativeId::from_string)?;
        self.committer
            .modify(roadmap_id, |roadmap| {
                roadmap.remove_initiative(&timeframe_id, &initiative_id)
            })
            .await
    }

    /// Move an initiative between timeframes in a single write
    pub async fn move_initiative(
        &self,
        roadmap_id: &str,
        from_timeframe_id: &str,
        to_timeframe_id: &str,
        initiative_id: &str,
    ) -> ApplicationResult<Option<Roadmap>> {
        let from = parse_id(from_timeframe_id, TimeframeId::from_string)?;
        let to = parse_id(to_timeframe_id, TimeframeId::from_string)?;
        let initiative_id = parse_id(initiative_id, InitiativeId::from_string)?;

        let result = self
            .committer
            .modify(roadmap_id, |roadmap| roadmap.move_initiative(&from, &to, &initiative_id))
            .await?;
        if result.is_some() {
            info!(roadmap_id, initiative_id = %initiative_id, from = %from, to = %to, "Moved initiative");
        }
        Ok(result)
    }
}
