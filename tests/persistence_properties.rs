//! Property tests: roadmaps survive a trip through the JSON document store
//! with identical id sets at every level.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use roadmap_domain::repositories::RoadmapRepository;
use roadmap_domain::roadmap::{Roadmap, RoadmapInitiative, RoadmapItem, RoadmapTimeframe};
use roadmap_domain::value_objects::{Category, Priority, Status};
use roadmap_persistence::{DocumentRoadmapRepository, JsonDocumentStore};

/// Items per initiative, initiatives per timeframe
fn shape_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0usize..4, 0..4), 0..5)
}

fn build_roadmap(shape: &[Vec<usize>]) -> Roadmap {
    let mut roadmap = Roadmap::create("Generated", "", "1.0", "prop").unwrap();
    for (t, initiatives) in shape.iter().enumerate() {
        let timeframe = RoadmapTimeframe::create(format!("T{t}"), t as u32 + 1).unwrap();
        let tf_id = timeframe.id().clone();
        roadmap = roadmap.add_timeframe(timeframe);
        for (i, item_count) in initiatives.iter().enumerate() {
            let initiative =
                RoadmapInitiative::create(format!("I{t}-{i}"), "", Category::Feature, Priority::Medium)
                    .unwrap();
            let init_id = initiative.id().clone();
            roadmap = roadmap.add_initiative(&tf_id, initiative).unwrap();
            let items = (0..*item_count)
                .map(|n| RoadmapItem::create(format!("item {n}"), "", Status::Planned).unwrap())
                .collect();
            roadmap = roadmap.add_items(&tf_id, &init_id, items).unwrap();
        }
    }
    roadmap
}

fn id_sets(roadmap: &Roadmap) -> (BTreeSet<String>, BTreeSet<String>, BTreeSet<String>) {
    let timeframes = roadmap.timeframes();
    let initiatives: Vec<_> = timeframes.iter().flat_map(|tf| tf.initiatives()).collect();
    (
        timeframes.iter().map(|tf| tf.id().to_string()).collect(),
        initiatives.iter().map(|i| i.id().to_string()).collect(),
        roadmap
            .items_with_path()
            .iter()
            .map(|(_, item)| item.id().to_string())
            .collect(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_document_round_trip_keeps_ids(shape in shape_strategy()) {
        let roadmap = build_roadmap(&shape);
        let dir = tempfile::tempdir().unwrap();
        let repo = DocumentRoadmapRepository::new(Arc::new(JsonDocumentStore::new(
            dir.path().join("roadmap.json"),
        )));

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let found = runtime.block_on(async {
            repo.save(&roadmap).await.unwrap();
            repo.find_by_id(roadmap.id()).await.unwrap()
        });

        let found = found.expect("saved roadmap is found");
        prop_assert_eq!(id_sets(&found), id_sets(&roadmap));
        prop_assert_eq!(found, roadmap);
    }
}
