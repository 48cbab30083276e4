//! Roadmap Note Application Service
//!
//! Notes are their own aggregate: they reference roadmap entities by id
//! and are saved independently of any roadmap.

use std::sync::Arc;

use tracing::info;

use roadmap_domain::errors::DomainResult;
use roadmap_domain::note::{NoteUpdate, RoadmapNote};
use roadmap_domain::repositories::RoadmapNoteRepository;
use roadmap_domain::value_objects::{Category, NoteId, Priority};

use crate::dto::{parse_id, parse_literal, CreateNoteCommand, UpdateNoteCommand};
use crate::errors::ApplicationResult;

/// Roadmap Note Application Service
pub struct NoteService<N>
where
    N: RoadmapNoteRepository,
{
    repository: Arc<N>,
}

impl<N> NoteService<N>
where
    N: RoadmapNoteRepository,
{
    pub fn new(repository: Arc<N>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, cmd: CreateNoteCommand) -> ApplicationResult<RoadmapNote> {
        let category = parse_literal::<Category>(cmd.category.as_deref())?.unwrap_or_default();
        let priority = parse_literal::<Priority>(cmd.priority.as_deref())?.unwrap_or_default();
        let note = cmd.related_entities.iter().try_fold(
            RoadmapNote::create(cmd.title, cmd.content, category, priority, cmd.timeline)?,
            |note, entity_id| note.link(entity_id),
        )?;

        self.repository.save(&note).await?;
        info!(note_id = %note.id(), "Created roadmap note");
        Ok(note)
    }

    pub async fn get(&self, note_id: &str) -> ApplicationResult<Option<RoadmapNote>> {
        let id = parse_id(note_id, NoteId::from_string)?;
        Ok(self.repository.find_by_id(&id).await?)
    }

    pub async fn list(&self) -> ApplicationResult<Vec<RoadmapNote>> {
        Ok(self.repository.find_all().await?)
    }

    /// Notes linked to a roadmap, timeframe, initiative or item id
    pub async fn find_by_related_entity(&self, entity_id: &str) -> ApplicationResult<Vec<RoadmapNote>> {
        Ok(self.repository.find_by_related_entity(entity_id).await?)
    }

    pub async fn update(&self, note_id: &str, cmd: UpdateNoteCommand) -> ApplicationResult<Option<RoadmapNote>> {
        let update = NoteUpdate {
            title: cmd.title,
            content: cmd.content,
            category: parse_literal(cmd.category.as_deref())?,
            priority: parse_literal(cmd.priority.as_deref())?,
            timeline: cmd.timeline.map(|t| Some(t).filter(|t| !t.trim().is_empty())),
        };
        self.modify(note_id, |note| note.apply(&update)).await
    }

    pub async fn link(&self, note_id: &str, entity_id: &str) -> ApplicationResult<Option<RoadmapNote>> {
        self.modify(note_id, |note| note.link(entity_id)).await
    }

    pub async fn unlink(&self, note_id: &str, entity_id: &str) -> ApplicationResult<Option<RoadmapNote>> {
        self.modify(note_id, |note| Ok(note.unlink(entity_id))).await
    }

    /// Delete a note; `false` when there was nothing to delete
    pub async fn delete(&self, note_id: &str) -> ApplicationResult<bool> {
        let id = parse_id(note_id, NoteId::from_string)?;
        let deleted = self.repository.delete(&id).await?;
        if deleted {
            info!(note_id, "Deleted roadmap note");
        }
        Ok(deleted)
    }

    async fn modify<F>(&self, note_id: &str, change: F) -> ApplicationResult<Option<RoadmapNote>>
    where
        F: FnOnce(&RoadmapNote) -> DomainResult<RoadmapNote> + Send,
    {
        let Some(current) = self.get(note_id).await? else {
            return Ok(None);
        };
        let next = change(&current)?;
        if next != current {
            self.repository.save(&next).await?;
        }
        Ok(Some(next))
    }
}
