//! In-Memory Roadmap Repository Implementation

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use roadmap_domain::{
    errors::DomainResult, repositories::RoadmapRepository, roadmap::Roadmap,
    value_objects::RoadmapId,
};

/// Thread-safe in-memory implementation of RoadmapRepository
///
/// Uses RwLock for concurrent read access with exclusive write access.
/// Stored roadmaps never carry pending events.
///
/// # Example
///
/// ```ignore
/// use roadmap_persistence::memory::InMemoryRoadmapRepository;
/// use roadmap_domain::repositories::RoadmapRepository;
/// use std::sync::Arc;
///
/// let repo: Arc<dyn RoadmapRepository> = Arc::new(InMemoryRoadmapRepository::new());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRoadmapRepository {
    roadmaps: RwLock<HashMap<RoadmapId, Roadmap>>,
}

impl InMemoryRoadmapRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial roadmaps (useful for testing)
    pub fn with_roadmaps(roadmaps: Vec<Roadmap>) -> Self {
        let map = roadmaps
            .into_iter()
            .map(|r| (r.id().clone(), without_events(&r)))
            .collect();
        Self {
            roadmaps: RwLock::new(map),
        }
    }

    pub fn count(&self) -> usize {
        self.roadmaps.read().len()
    }

    pub fn clear(&self) {
        self.roadmaps.write().clear();
    }
}

fn without_events(roadmap: &Roadmap) -> Roadmap {
    let mut stored = roadmap.clone();
    stored.pull_events();
    stored
}

#[async_trait]
impl RoadmapRepository for InMemoryRoadmapRepository {
    async fn save(&self, roadmap: &Roadmap) -> DomainResult<()> {
        self.roadmaps
            .write()
            .insert(roadmap.id().clone(), without_events(roadmap));
        Ok(())
    }

    async fn find_by_id(&self, id: &RoadmapId) -> DomainResult<Option<Roadmap>> {
        Ok(self.roadmaps.read().get(id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<Roadmap>> {
        Ok(self.roadmaps.read().values().cloned().collect())
    }

    async fn delete(&self, id: &RoadmapId) -> DomainResult<bool> {
        Ok(self.roadmaps.write().remove(id).is_some())
    }

    async fn exists(&self, id: &RoadmapId) -> DomainResult<bool> {
        Ok(self.roadmaps.read().contains_key(id))
    }
}
