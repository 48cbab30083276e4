//! Roadmap Query Service
//!
//! Read-only projections over the roadmap repository. Never saves.

use std::sync::Arc;

use tracing::debug;

use roadmap_domain::repositories::RoadmapRepository;
use roadmap_domain::roadmap::Roadmap;
use roadmap_domain::value_objects::{Category, Priority, RoadmapId, Status, TimeframeId};

use crate::dto::{
    parse_id, parse_literal, InitiativeFilter, InitiativeView, ItemView, RoadmapProgressDto,
    RoadmapSummaryDto, TimeframeView,
};
use crate::errors::ApplicationResult;

/// Roadmap Query Service
pub struct RoadmapQueryService<R>
where
    R: RoadmapRepository,
{
    repository: Arc<R>,
}

impl<R> RoadmapQueryService<R>
where
    R: RoadmapRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Get roadmap by ID
    pub async fn get(&self, roadmap_id: &str) -> ApplicationResult<Option<Roadmap>> {
        let id = parse_id(roadmap_id, RoadmapId::from_string)?;
        Ok(self.repository.find_by_id(&id).await?)
    }

    /// Summaries of every roadmap, most recently updated first
    pub async fn list_summaries(&self) -> ApplicationResult<Vec<RoadmapSummaryDto>> {
        let mut summaries: Vec<_> = self
            .repository
            .find_all()
            .await?
            .iter()
            .map(RoadmapSummaryDto::from_domain)
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    pub async fn find_by_owner(&self, owner: &str) -> ApplicationResult<Vec<RoadmapSummaryDto>> {
        let roadmaps = self.repository.find_by_owner(owner).await?;
        Ok(roadmaps.iter().map(RoadmapSummaryDto::from_domain).collect())
    }

    pub async fn find_by_version(&self, version: &str) -> ApplicationResult<Vec<RoadmapSummaryDto>> {
        let roadmaps = self.repository.find_by_version(version).await?;
        Ok(roadmaps.iter().map(RoadmapSummaryDto::from_domain).collect())
    }

    /// Timeframes in display order
    pub async fn list_timeframes(&self, roadmap_id: &str) -> ApplicationResult<Option<Vec<TimeframeView>>> {
        Ok(self.get(roadmap_id).await?.map(|roadmap| {
            roadmap
                .timeframes_in_display_order()
                .into_iter()
                .map(TimeframeView::from_domain)
                .collect()
        }))
    }

    /// Initiatives matching every field set in `filter`
    pub async fn list_initiatives(
        &self,
        roadmap_id: &str,
        filter: InitiativeFilter,
    ) -> ApplicationResult<Option<Vec<InitiativeView>>> {
        let timeframe_id = filter
            .timeframe_id
            .as_deref()
            .map(|id| parse_id(id, TimeframeId::from_string))
            .transpose()?;
        let category: Option<Category> = parse_literal(filter.category.as_deref())?;
        let priority: Option<Priority> = parse_literal(filter.priority.as_deref())?;

        let Some(roadmap) = self.get(roadmap_id).await? else {
            return Ok(None);
        };
        let views = roadmap
            .timeframes_in_display_order()
            .into_iter()
            .filter(|tf| timeframe_id.as_ref().map_or(true, |id| tf.id() == id))
            .flat_map(|tf| {
                tf.initiatives()
                    .into_iter()
                    .map(move |initiative| (tf.id(), initiative))
            })
            .filter(|(_, i)| category.map_or(true, |c| i.category() == c))
            .filter(|(_, i)| priority.map_or(true, |p| i.priority() == p))
            .map(|(tf_id, initiative)| InitiativeView::from_domain(tf_id, initiative))
            .collect();
        Ok(Some(views))
    }

    /// Items of one roadmap, optionally only those with `status`
    pub async fn list_items(
        &self,
        roadmap_id: &str,
        status: Option<&str>,
    ) -> ApplicationResult<Option<Vec<ItemView>>> {
        let status: Option<Status> = parse_literal(status)?;
        Ok(self.get(roadmap_id).await?.map(|roadmap| {
            roadmap
                .items_with_path()
                .into_iter()
                .filter(|(_, item)| status.map_or(true, |s| item.status() == s))
                .map(|(path, item)| ItemView::from_domain(&roadmap, &path, item))
                .collect()
        }))
    }

    /// Items in any roadmap that reference `entity_id`
    pub async fn find_items_referencing(&self, entity_id: &str) -> ApplicationResult<Vec<ItemView>> {
        let roadmaps = self.repository.find_all().await?;
        let views: Vec<ItemView> = roadmaps
            .iter()
            .flat_map(|roadmap| {
                roadmap
                    .items_with_path()
                    .into_iter()
                    .filter(move |(_, item)| item.references(entity_id))
                    .map(move |(path, item)| ItemView::from_domain(roadmap, &path, item))
            })
            .collect();
        debug!(entity_id, matches = views.len(), "Searched item references");
        Ok(views)
    }

    /// Item counts per status and completion percentage
    pub async fn progress(&self, roadmap_id: &str) -> ApplicationResult<Option<RoadmapProgressDto>> {
        Ok(self
            .get(roadmap_id)
            .await?
            .map(|roadmap| RoadmapProgressDto::from_domain(&roadmap)))
    }
}
