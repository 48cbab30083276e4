//! Repository interfaces for data persistence
//!
//! These interfaces define the contracts for data access.
//! Implementations are provided by the persistence crate; the domain layer
//! defines only the traits.

use async_trait::async_trait;

use crate::{errors::*, note::RoadmapNote, roadmap::Roadmap, value_objects::*};

/// Repository for roadmap aggregates
///
/// `save` is upsert-by-id over the whole aggregate. Lookups of an unknown id
/// return `Ok(None)` rather than an error.
#[async_trait]
pub trait RoadmapRepository: Send + Sync {
    /// Save (insert or replace) a roadmap
    async fn save(&self, roadmap: &Roadmap) -> DomainResult<()>;

    /// Find roadmap by ID
    async fn find_by_id(&self, id: &RoadmapId) -> DomainResult<Option<Roadmap>>;

    /// Find all roadmaps
    async fn find_all(&self) -> DomainResult<Vec<Roadmap>>;

    /// Delete roadmap by ID, returning whether anything was removed
    async fn delete(&self, id: &RoadmapId) -> DomainResult<bool>;

    /// Find roadmaps owned by `owner`
    async fn find_by_owner(&self, owner: &str) -> DomainResult<Vec<Roadmap>> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|r| r.owner() == owner)
            .collect())
    }

    /// Find roadmaps at `version`
    async fn find_by_version(&self, version: &str) -> DomainResult<Vec<Roadmap>> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|r| r.version() == version)
            .collect())
    }

    /// Check if roadmap exists
    async fn exists(&self, id: &RoadmapId) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// Repository for roadmap notes
#[async_trait]
pub trait RoadmapNoteRepository: Send + Sync {
    async fn save(&self, note: &RoadmapNote) -> DomainResult<()>;

    async fn find_by_id(&self, id: &NoteId) -> DomainResult<Option<RoadmapNote>>;

    async fn find_all(&self) -> DomainResult<Vec<RoadmapNote>>;

    async fn delete(&self, id: &NoteId) -> DomainResult<bool>;

    /// Notes linked to the given entity id
    async fn find_by_related_entity(&self, entity_id: &str) -> DomainResult<Vec<RoadmapNote>> {
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .filter(|n| n.references(entity_id))
            .collect())
    }
}
