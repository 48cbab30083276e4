//! In-Memory Roadmap Note Repository Implementation

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use roadmap_domain::{
    errors::DomainResult, note::RoadmapNote, repositories::RoadmapNoteRepository,
    value_objects::NoteId,
};

/// Thread-safe in-memory implementation of RoadmapNoteRepository
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<HashMap<NoteId, RoadmapNote>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.notes.read().len()
    }
}

#[async_trait]
impl RoadmapNoteRepository for InMemoryNoteRepository {
    async fn save(&self, note: &RoadmapNote) -> DomainResult<()> {
        self.notes.write().insert(note.id().clone(), note.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &NoteId) -> DomainResult<Option<RoadmapNote>> {
        Ok(self.notes.read().get(id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<RoadmapNote>> {
        Ok(self.notes.read().values().cloned().collect())
    }

    async fn delete(&self, id: &NoteId) -> DomainResult<bool> {
        Ok(self.notes.write().remove(id).is_some())
    }

    async fn find_by_related_entity(&self, entity_id: &str) -> DomainResult<Vec<RoadmapNote>> {
        Ok(self
            .notes
            .read()
            .values()
            .filter(|n| n.references(entity_id))
            .cloned()
            .collect())
    }
}
