//! Timeframe Application Service

use std::sync::Arc;

use tracing::info;

use roadmap_domain::repositories::RoadmapRepository;
use roadmap_domain::roadmap::{Roadmap, RoadmapTimeframe, TimeframeUpdate};
use roadmap_domain::value_objects::TimeframeId;

use super::committer::RoadmapCommitter;
use crate::dto::{parse_id, AddTimeframeCommand, Created, UpdateTimeframeCommand};
use crate::errors::ApplicationResult;
use crate::events::EventPublisher;

/// Timeframe commands scoped to one roadmap
pub struct TimeframeService<R, E>
where
    R: RoadmapRepository,
    E: EventPublisher,
{
    committer: Arc<RoadmapCommitter<R, E>>,
}

impl<R, E> TimeframeService<R, E>
where
    R: RoadmapRepository,
    E: EventPublisher,
{
    pub fn new(committer: Arc<RoadmapCommitter<R, E>>) -> Self {
        Self { committer }
    }

    /// Add a timeframe; without an explicit order it is placed last
    pub async fn add(
        &self,
        roadmap_id: &str,
        cmd: AddTimeframeCommand,
    ) -> ApplicationResult<Option<Created<TimeframeId>>> {
        let id = TimeframeId::new();
        let new_id = id.clone();
        let result = self
            .committer
            .modify(roadmap_id, move |roadmap| {
                let order = cmd.order.unwrap_or(next_order(roadmap));
                let timeframe = RoadmapTimeframe::create_with_id(id, cmd.name, order)?;
                Ok(roadmap.add_timeframe(timeframe))
            })
            .await?;

        if result.is_some() {
            info!(roadmap_id, timeframe_id = %new_id, "Added timeframe");
        }
        Ok(result.map(|roadmap| Created { roadmap, id: new_id }))
    }

    pub async fn update(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        cmd: UpdateTimeframeCommand,
    ) -> ApplicationResult<Option<Roadmap>> {
        let timeframe_id = parse_id(timeframe_id, TimeframeId::from_string)?;
        let update = TimeframeUpdate {
            name: cmd.name,
            order: cmd.order,
        };
        self.committer
            .modify(roadmap_id, |roadmap| roadmap.update_timeframe(&timeframe_id, &update))
            .await
    }

    /// Remove a timeframe and everything under it
    pub async fn remove(&self, roadmap_id: &str, timeframe_id: &str) -> ApplicationResult<Option<Roadmap>> {
        let timeframe_id = parse_id(timeframe_id, TimeframeId::from_string)?;
        let result = self
            .committer
            .modify(roadmap_id, |roadmap| roadmap.remove_timeframe(&timeframe_id))
            .await?;
        if result.is_some() {
            info!(roadmap_id, timeframe_id = %timeframe_id, "Removed timeframe");
        }
        Ok(result)
    }
}

fn next_order(roadmap: &Roadmap) -> u32 {
    roadmap
        .timeframes()
        .iter()
        .map(|tf| tf.order())
        .max()
        .map_or(1, |max| max + 1)
}
