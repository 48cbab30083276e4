//! Unit tests for roadmap-domain through its public API

use roadmap_domain::errors::*;
use roadmap_domain::events::{DomainEvent, RoadmapEvent};
use roadmap_domain::roadmap::*;
use roadmap_domain::services::{RoadmapValidationService, RuleKind};
use roadmap_domain::value_objects::*;

fn planned_roadmap() -> (Roadmap, TimeframeId) {
    let timeframe = RoadmapTimeframe::create("Q3", 1).unwrap();
    let tf_id = timeframe.id().clone();
    let mut roadmap = Roadmap::create("Q3 Plan", "", "1.0", "alice")
        .unwrap()
        .add_timeframe(timeframe);
    roadmap.pull_events();
    (roadmap, tf_id)
}

mod aggregate_tests {
    use super::*;

    #[test]
    fn test_add_then_remove_initiative_restores_set() {
        let (roadmap, tf_id) = planned_roadmap();
        let initiative =
            RoadmapInitiative::create("Perf", "", Category::Enhancement, Priority::High).unwrap();
        let init_id = initiative.id().clone();

        let before = roadmap.timeframe(&tf_id).unwrap().clone();
        let after = roadmap
            .add_initiative(&tf_id, initiative)
            .unwrap()
            .remove_initiative(&tf_id, &init_id)
            .unwrap();
        let restored = after.timeframe(&tf_id).unwrap();

        let ids = |tf: &RoadmapTimeframe| -> Vec<InitiativeId> {
            tf.initiatives().iter().map(|i| i.id().clone()).collect()
        };
        assert_eq!(ids(restored), ids(&before));
        assert!(!std::ptr::eq(restored, roadmap.timeframe(&tf_id).unwrap()));
    }

    #[test]
    fn test_readding_same_id_replaces() {
        let (roadmap, tf_id) = planned_roadmap();
        let id = InitiativeId::from_string("init-1").unwrap();
        let first =
            RoadmapInitiative::create_with_id(id.clone(), "First", "", Category::Feature, Priority::Low)
                .unwrap();
        let second =
            RoadmapInitiative::create_with_id(id.clone(), "Second", "", Category::Feature, Priority::Low)
                .unwrap();

        let roadmap = roadmap
            .add_initiative(&tf_id, first)
            .unwrap()
            .add_initiative(&tf_id, second)
            .unwrap();

        assert_eq!(roadmap.initiative_count(), 1);
        assert_eq!(roadmap.initiative(&tf_id, &id).unwrap().title(), "Second");
    }

    #[test]
    fn test_events_carry_full_path() {
        let (roadmap, tf_id) = planned_roadmap();
        let initiative =
            RoadmapInitiative::create("Perf", "", Category::Enhancement, Priority::High).unwrap();
        let init_id = initiative.id().clone();
        let item = RoadmapItem::create("Profile hotspots", "", Status::Planned).unwrap();
        let item_id = item.id().clone();

        let mut roadmap = roadmap
            .add_initiative(&tf_id, initiative)
            .unwrap()
            .add_item(&tf_id, &init_id, item)
            .unwrap()
            .change_item_status(&tf_id, &init_id, &item_id, Status::Blocked)
            .unwrap();

        let events = roadmap.pull_events();
        assert!(roadmap.pending_events().is_empty());
        assert_eq!(events.len(), 3);
        for event in &events {
            assert_eq!(event.aggregate_id(), roadmap.id().as_str());
        }
        match &events[2] {
            RoadmapEvent::ItemStatusChanged(e) => {
                assert_eq!(e.path.timeframe_id, tf_id);
                assert_eq!(e.path.initiative_id, init_id);
                assert_eq!(e.path.item_id, item_id);
                assert_eq!(e.previous, Status::Planned);
                assert_eq!(e.current, Status::Blocked);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_nested_miss_identifies_level() {
        let (roadmap, tf_id) = planned_roadmap();
        let err = roadmap
            .update_item(
                &tf_id,
                &InitiativeId::from_string("ghost").unwrap(),
                &ItemId::new(),
                &ItemUpdate::default(),
            )
            .unwrap_err();

        match err {
            DomainError::NotFound { level, id, within } => {
                assert_eq!(level, EntityLevel::Initiative);
                assert_eq!(id, "ghost");
                assert_eq!(within.as_deref(), Some(tf_id.as_str()));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}

mod validation_tests {
    use super::*;

    #[test]
    fn test_duplicate_titles_across_timeframes_are_allowed() {
        let (roadmap, tf_id) = planned_roadmap();
        let other = RoadmapTimeframe::create("Q4", 2).unwrap();
        let other_id = other.id().clone();
        let mk = || RoadmapInitiative::create("Search", "", Category::Feature, Priority::Low).unwrap();

        let roadmap = roadmap
            .add_timeframe(other)
            .add_initiative(&tf_id, mk())
            .unwrap()
            .add_initiative(&other_id, mk())
            .unwrap();

        assert!(RoadmapValidationService::new().validate(&roadmap).is_valid);
    }

    #[test]
    fn test_prepare_normalizes_before_validating() {
        let roadmap = Roadmap::create("Plan", "", "1.0", "alice")
            .unwrap()
            .add_timeframe(RoadmapTimeframe::create("Later", 7).unwrap())
            .add_timeframe(RoadmapTimeframe::create("Now", 3).unwrap());

        let service = RoadmapValidationService::new();
        let raw = service.validate(&roadmap);
        assert!(raw.warnings.iter().any(|w| w.rule == RuleKind::TimeframeOrdering));

        let prepared = service.prepare(&roadmap).unwrap();
        let names: Vec<_> = prepared.timeframes().iter().map(|tf| tf.name().to_string()).collect();
        assert_eq!(names, vec!["Now", "Later"]);
        assert!(service.validate(&prepared).warnings.is_empty());
    }
}
