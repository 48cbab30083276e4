//! Item Application Service

use std::sync::Arc;

use tracing::info;

use roadmap_domain::errors::DomainResult;
use roadmap_domain::repositories::RoadmapRepository;
use roadmap_domain::roadmap::{ItemUpdate, Roadmap, RoadmapItem};
use roadmap_domain::value_objects::{InitiativeId, ItemId, Status, TimeframeId};

use super::committer::RoadmapCommitter;
use crate::dto::{parse_id, parse_literal, AddItemCommand, Created, UpdateItemCommand};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::events::EventPublisher;

/// Id path of an item's parent initiative
struct InitiativePath {
    timeframe_id: TimeframeId,
    initiative_id: InitiativeId,
}

impl InitiativePath {
    fn parse(timeframe_id: &str, initiative_id: &str) -> ApplicationResult<Self> {
        Ok(Self {
            timeframe_id: parse_id(timeframe_id, TimeframeId::from_string)?,
            initiative_id: parse_id(initiative_id, InitiativeId::from_string)?,
        })
    }
}

/// Item commands scoped to a roadmap, timeframe and initiative
pub struct ItemService<R, E>
where
    R: RoadmapRepository,
    E: EventPublisher,
{
    committer: Arc<RoadmapCommitter<R, E>>,
}

impl<R, E> ItemService<R, E>
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
        initiative_id: &str,
        cmd: AddItemCommand,
    ) -> ApplicationResult<Option<Created<ItemId>>> {
        let created = self
            .add_bulk(roadmap_id, timeframe_id, initiative_id, vec![cmd])
            .await?;
        Ok(created.and_then(|Created { roadmap, id }| {
            id.into_iter().next().map(|id| Created { roadmap, id })
        }))
    }

    /// Add several items to one initiative in a single write; all or nothing
    pub async fn add_bulk(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        initiative_id: &str,
        cmds: Vec<AddItemCommand>,
    ) -> ApplicationResult<Option<Created<Vec<ItemId>>>> {
        if cmds.is_empty() {
            return Err(ApplicationError::InvalidInput("no items to add".into()));
        }
        let path = InitiativePath::parse(timeframe_id, initiative_id)?;
        let items = cmds
            .into_iter()
            .map(build_item)
            .collect::<ApplicationResult<Vec<_>>>()?;
        let ids: Vec<ItemId> = items.iter().map(|item| item.id().clone()).collect();

        let result = self
            .committer
            .modify(roadmap_id, |roadmap| {
                roadmap.add_items(&path.timeframe_id, &path.initiative_id, items)
            })
            .await?;
        if result.is_some() {
            info!(
                roadmap_id,
                initiative_id = %path.initiative_id,
                count = ids.len(),
                "Added items"
            );
        }
        Ok(result.map(|roadmap| Created { roadmap, id: ids }))
    }

    pub async fn update(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        initiative_id: &str,
        item_id: &str,
        cmd: UpdateItemCommand,
    ) -> ApplicationResult<Option<Roadmap>> {
        let update = ItemUpdate {
            title: cmd.title,
            description: cmd.description,
            notes: cmd.notes,
        };
        self.with_item(roadmap_id, timeframe_id, initiative_id, item_id, |roadmap, tf, init, item| {
            roadmap.update_item(tf, init, item, &update)
        })
        .await
    }

    /// Change an item's status from a wire literal such as `"in-progress"`
    pub async fn change_status(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        initiative_id: &str,
        item_id: &str,
        status: &str,
    ) -> ApplicationResult<Option<Roadmap>> {
        let status: Status = status.parse()?;
        self.with_item(roadmap_id, timeframe_id, initiative_id, item_id, |roadmap, tf, init, item| {
            roadmap.change_item_status(tf, init, item, status)
        })
        .await
    }

    pub async fn remove(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        initiative_id: &str,
        item_id: &str,
    ) -> ApplicationResult<Option<Roadmap>> {
        self.with_item(roadmap_id, timeframe_id, initiative_id, item_id, |roadmap, tf, init, item| {
            roadmap.remove_item(tf, init, item)
        })
        .await
    }

    /// Record a weak reference from the item to an external entity id
    pub async fn link(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        initiative_id: &str,
        item_id: &str,
        entity_id: &str,
    ) -> ApplicationResult<Option<Roadmap>> {
        let entity_id = required_entity_id(entity_id)?;
        self.with_item(roadmap_id, timeframe_id, initiative_id, item_id, |roadmap, tf, init, item| {
            roadmap.link_item(tf, init, item, &entity_id)
        })
        .await
    }

    pub async fn unlink(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        initiative_id: &str,
        item_id: &str,
        entity_id: &str,
    ) -> ApplicationResult<Option<Roadmap>> {
        let entity_id = required_entity_id(entity_id)?;
        self.with_item(roadmap_id, timeframe_id, initiative_id, item_id, |roadmap, tf, init, item| {
            roadmap.unlink_item(tf, init, item, &entity_id)
        })
        .await
    }

    async fn with_item<F>(
        &self,
        roadmap_id: &str,
        timeframe_id: &str,
        initiative_id: &str,
        item_id: &str,
        change: F,
    ) -> ApplicationResult<Option<Roadmap>>
    where
        F: FnOnce(&Roadmap, &TimeframeId, &InitiativeId, &ItemId) -> DomainResult<Roadmap> + Send,
    {
        let path = InitiativePath::parse(timeframe_id, initiative_id)?;
        let item_id = parse_id(item_id, ItemId::from_string)?;
        self.committer
            .modify(roadmap_id, |roadmap| {
                change(roadmap, &path.timeframe_id, &path.initiative_id, &item_id)
            })
            .await
    }
}

fn build_item(cmd: AddItemCommand) -> ApplicationResult<RoadmapItem> {
    let status = parse_literal::<Status>(cmd.status.as_deref())?.unwrap_or_default();
    let item = RoadmapItem::create(cmd.title, cmd.description, status)?;
    let item = cmd
        .related_entities
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .fold(item, |item, entity_id| item.with_related_entity(entity_id));
    match cmd.notes {
        Some(notes) => {
            let (item, _) = item.apply(&ItemUpdate {
                notes: Some(notes),
                ..Default::default()
            })?;
            Ok(item)
        }
        None => Ok(item),
    }
}

fn required_entity_id(entity_id: &str) -> ApplicationResult<String> {
    let entity_id = entity_id.trim();
    if entity_id.is_empty() {
        return Err(ApplicationError::InvalidInput("entity id cannot be empty".into()));
    }
    Ok(entity_id.to_string())
}
