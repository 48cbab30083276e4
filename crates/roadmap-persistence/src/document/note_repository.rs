//! Document-backed Roadmap Note Repository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use roadmap_domain::{
    errors::DomainResult, note::RoadmapNote, repositories::RoadmapNoteRepository,
    value_objects::NoteId,
};

use super::{decode_by_id, decode_records, JsonDocumentStore, ROADMAP_NOTES};

/// Notes stored in the `roadmapNotes` collection of a JSON document
#[derive(Debug, Clone)]
pub struct DocumentNoteRepository {
    store: Arc<JsonDocumentStore>,
}

impl DocumentNoteRepository {
    pub fn new(store: Arc<JsonDocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoadmapNoteRepository for DocumentNoteRepository {
    async fn save(&self, note: &RoadmapNote) -> DomainResult<()> {
        let record = note.to_json()?;
        self.store
            .upsert(ROADMAP_NOTES, note.id().as_str(), record)
            .await?;
        debug!(note_id = %note.id(), "Saved roadmap note document");
        Ok(())
    }

    async fn find_by_id(&self, id: &NoteId) -> DomainResult<Option<RoadmapNote>> {
        let records = self.store.read_collection(ROADMAP_NOTES).await?;
        decode_by_id(
            ROADMAP_NOTES,
            records,
            id.as_str(),
            RoadmapNote::from_persistence,
        )
    }

    async fn find_all(&self) -> DomainResult<Vec<RoadmapNote>> {
        let records = self.store.read_collection(ROADMAP_NOTES).await?;
        Ok(decode_records(ROADMAP_NOTES, records, RoadmapNote::from_persistence))
    }

    async fn delete(&self, id: &NoteId) -> DomainResult<bool> {
        Ok(self.store.remove(ROADMAP_NOTES, id.as_str()).await?)
    }
}
