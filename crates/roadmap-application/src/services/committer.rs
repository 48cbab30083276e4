//! Load → mutate → validate → persist → dispatch cycle shared by every
//! roadmap command service.

use std::sync::Arc;

use tracing::{debug, info};

use roadmap_domain::errors::DomainResult;
use roadmap_domain::repositories::RoadmapRepository;
use roadmap_domain::roadmap::Roadmap;
use roadmap_domain::services::RoadmapValidationService;
use roadmap_domain::value_objects::RoadmapId;

use crate::dto::parse_id;
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::EventPublisher;

/// Persists roadmaps on behalf of the command services
///
/// Every write goes through [`commit`](Self::commit): the new root is
/// normalized and validated as a whole, saved only when valid, and its
/// buffered events are published after the save returns.
pub struct RoadmapCommitter<R, E>
where
    R: RoadmapRepository,
    E: EventPublisher,
{
    repository: Arc<R>,
    events: Arc<E>,
    validator: RoadmapValidationService,
}

impl<R, E> RoadmapCommitter<R, E>
where
    R: RoadmapRepository,
    E: EventPublisher,
{
    pub fn new(repository: Arc<R>, events: Arc<E>) -> Self {
        Self::with_validator(repository, events, RoadmapValidationService::new())
    }

    pub fn with_validator(repository: Arc<R>, events: Arc<E>, validator: RoadmapValidationService) -> Self {
        Self {
            repository,
            events,
            validator,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Load a roadmap; an unknown id is `Ok(None)`
    pub async fn load(&self, roadmap_id: &str) -> ApplicationResult<Option<Roadmap>> {
        let id = parse_id(roadmap_id, RoadmapId::from_string)?;
        Ok(self.repository.find_by_id(&id).await?)
    }

    /// Normalize, validate, save, then publish the roadmap's buffered events
    pub async fn commit(&self, roadmap: Roadmap) -> ApplicationResult<Roadmap> {
        let mut prepared = self.validator.prepare(&roadmap)?;
        self.repository.save(&prepared).await?;

        let events = prepared.pull_events();
        info!(
            roadmap_id = %prepared.id(),
            events = events.len(),
            "Saved roadmap"
        );
        self.events.publish_all(events).await;
        Ok(prepared)
    }

    /// Apply `change` to the stored roadmap and commit the result
    ///
    /// Returns `Ok(None)` when the roadmap does not exist. Nothing is saved
    /// when `change` fails or the result is invalid.
    pub async fn modify<F>(&self, roadmap_id: &str, change: F) -> ApplicationResult<Option<Roadmap>>
    where
        F: FnOnce(&Roadmap) -> DomainResult<Roadmap> + Send,
    {
        let Some(current) = self.load(roadmap_id).await? else {
            debug!(roadmap_id, "Roadmap not found, nothing to modify");
            return Ok(None);
        };
        let next = change(&current).map_err(ApplicationError::from)?;
        self.commit(next).await.map(Some)
    }
}
