//! Document-backed Roadmap Repository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use roadmap_domain::{
    errors::DomainResult, repositories::RoadmapRepository, roadmap::Roadmap,
    value_objects::RoadmapId,
};

use super::{decode_by_id, decode_records, JsonDocumentStore, ROADMAPS};

/// Roadmaps stored in the `roadmaps` collection of a JSON document
#[derive(Debug, Clone)]
pub struct DocumentRoadmapRepository {
    store: Arc<JsonDocumentStore>,
}

impl DocumentRoadmapRepository {
    pub fn new(store: Arc<JsonDocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoadmapRepository for DocumentRoadmapRepository {
    async fn save(&self, roadmap: &Roadmap) -> DomainResult<()> {
        let record = roadmap.to_json()?;
        self.store
            .upsert(ROADMAPS, roadmap.id().as_str(), record)
            .await?;
        debug!(roadmap_id = %roadmap.id(), "Saved roadmap document");
        Ok(())
    }

    async fn find_by_id(&self, id: &RoadmapId) -> DomainResult<Option<Roadmap>> {
        let records = self.store.read_collection(ROADMAPS).await?;
        decode_by_id(ROADMAPS, records, id.as_str(), Roadmap::from_persistence)
    }

    async fn find_all(&self) -> DomainResult<Vec<Roadmap>> {
        let records = self.store.read_collection(ROADMAPS).await?;
        Ok(decode_records(ROADMAPS, records, Roadmap::from_persistence))
    }

    async fn delete(&self, id: &RoadmapId) -> DomainResult<bool> {
        Ok(self.store.remove(ROADMAPS, id.as_str()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_domain::errors::DomainError;
    use serde_json::json;

    #[tokio::test]
    async fn test_unreadable_record_is_skipped_in_listing_but_reported_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonDocumentStore::new(dir.path().join("roadmap.json")));
        let repo = DocumentRoadmapRepository::new(Arc::clone(&store));

        let roadmap = Roadmap::create("Plan", "", "1.0", "alice").unwrap();
        repo.save(&roadmap).await.unwrap();
        store
            .upsert(ROADMAPS, "broken", json!({"id": "broken", "timeframes": "nope"}))
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), roadmap.id());

        let broken = RoadmapId::from_string("broken").unwrap();
        let err = repo.find_by_id(&broken).await.unwrap_err();
        assert!(matches!(err, DomainError::DeserializationFailed { .. }));

        let absent = RoadmapId::from_string("absent").unwrap();
        assert!(repo.find_by_id(&absent).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_over_non_array_collection_fails_without_data_loss() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonDocumentStore::new(dir.path().join("roadmap.json")));
        let original = r#"{"roadmaps": {"legacy": {"id": "legacy", "title": "Old"}}}"#;
        std::fs::write(store.path(), original).unwrap();
        let repo = DocumentRoadmapRepository::new(Arc::clone(&store));

        let roadmap = Roadmap::create("Plan", "", "1.0", "alice").unwrap();
        let err = repo.save(&roadmap).await.unwrap_err();
        assert!(matches!(err, DomainError::Repository { .. }));
        assert!(repo.find_all().await.is_err());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), original);
    }

    #[tokio::test]
    async fn test_partial_record_is_reconstructed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonDocumentStore::new(dir.path().join("roadmap.json")));
        let repo = DocumentRoadmapRepository::new(Arc::clone(&store));

        store
            .upsert(
                ROADMAPS,
                "legacy",
                json!({
                    "id": "legacy",
                    "title": "Legacy",
                    "timeframes": [{ "id": "t1", "name": "Now" }]
                }),
            )
            .await
            .unwrap();

        let id = RoadmapId::from_string("legacy").unwrap();
        let found = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.title(), "Legacy");
        assert_eq!(found.owner(), "");
        assert_eq!(found.timeframe_count(), 1);
    }
}
