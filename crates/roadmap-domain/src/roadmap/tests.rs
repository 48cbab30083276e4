//! Roadmap module tests
//!
//! Tests for the Roadmap aggregate root, Timeframes, Initiatives, and Items.

use crate::errors::DomainError;
use crate::events::{DomainEvent, RoadmapEvent};
use crate::roadmap::*;
use crate::value_objects::*;

fn create_test_roadmap() -> Roadmap {
    let mut roadmap = Roadmap::create("Product Roadmap", "2025 plan", "1.0", "alice").unwrap();
    roadmap.pull_events();
    roadmap
}

fn timeframe(id: &str, name: &str, order: u32) -> RoadmapTimeframe {
    RoadmapTimeframe::create_with_id(TimeframeId::from_string(id).unwrap(), name, order).unwrap()
}

fn initiative(id: &str, title: &str, priority: Priority) -> RoadmapInitiative {
    RoadmapInitiative::create_with_id(
        InitiativeId::from_string(id).unwrap(),
        title,
        "",
        Category::Feature,
        priority,
    )
    .unwrap()
}

fn item(id: &str, title: &str) -> RoadmapItem {
    RoadmapItem::create_with_id(ItemId::from_string(id).unwrap(), title, "", Status::Planned).unwrap()
}

fn tf_id(id: &str) -> TimeframeId {
    TimeframeId::from_string(id).unwrap()
}

fn init_id(id: &str) -> InitiativeId {
    InitiativeId::from_string(id).unwrap()
}

fn item_id(id: &str) -> ItemId {
    ItemId::from_string(id).unwrap()
}

/// Roadmap with timeframes `a` and `b`, initiative `i1` in `a` holding item `x`
fn populated_roadmap() -> Roadmap {
    let mut roadmap = create_test_roadmap()
        .add_timeframe(timeframe("a", "Q1", 1))
        .add_timeframe(timeframe("b", "Q2", 2))
        .add_initiative(&tf_id("a"), initiative("i1", "Search", Priority::High))
        .unwrap()
        .add_item(&tf_id("a"), &init_id("i1"), item("x", "Index docs"))
        .unwrap();
    roadmap.pull_events();
    roadmap
}

fn event_types(roadmap: &Roadmap) -> Vec<&'static str> {
    roadmap.pending_events().iter().map(|e| e.event_type()).collect()
}

#[test]
fn test_create_roadmap_success() {
    let roadmap = Roadmap::create("Product Roadmap", "desc", "1.0", "alice").unwrap();

    assert_eq!(roadmap.title(), "Product Roadmap");
    assert_eq!(roadmap.version(), "1.0");
    assert_eq!(roadmap.owner(), "alice");
    assert_eq!(roadmap.timeframe_count(), 0);
    assert_eq!(event_types(&roadmap), vec!["RoadmapCreated"]);
}

#[test]
fn test_create_roadmap_requires_title_version_owner() {
    for (title, version, owner, field) in [
        ("", "1.0", "alice", "title"),
        ("Plan", " ", "alice", "version"),
        ("Plan", "1.0", "", "owner"),
    ] {
        match Roadmap::create(title, "", version, owner) {
            Err(DomainError::ValidationError { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected ValidationError for {field}, got {other:?}"),
        }
    }
}

#[test]
fn test_add_timeframe_leaves_original_untouched() {
    let original = create_test_roadmap();
    let updated = original.add_timeframe(timeframe("a", "Q1", 1));

    assert_eq!(original.timeframe_count(), 0);
    assert!(original.pending_events().is_empty());
    assert_eq!(updated.timeframe_count(), 1);
    assert_eq!(event_types(&updated), vec!["TimeframeAdded"]);
}

#[test]
fn test_add_item_copies_only_the_changed_path() {
    let original = populated_roadmap();
    let updated = original
        .add_item(&tf_id("a"), &init_id("i1"), item("y", "Ranking"))
        .unwrap();

    assert_eq!(original.item_count(), 1);
    assert_eq!(updated.item_count(), 2);
    assert_eq!(
        original.timeframe(&tf_id("b")).unwrap(),
        updated.timeframe(&tf_id("b")).unwrap()
    );
    assert_ne!(
        original.timeframe(&tf_id("a")).unwrap(),
        updated.timeframe(&tf_id("a")).unwrap()
    );
}

#[test]
fn test_add_initiative_to_missing_timeframe_fails() {
    let roadmap = populated_roadmap();
    let err = roadmap
        .add_initiative(&tf_id("missing"), initiative("i2", "Other", Priority::Low))
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::NotFound {
            level: EntityLevel::Timeframe,
            id: "missing".to_string(),
            within: Some(roadmap.id().to_string()),
        }
    );
}

#[test]
fn test_remove_missing_item_names_parent_initiative() {
    let roadmap = populated_roadmap();
    let err = roadmap
        .remove_item(&tf_id("a"), &init_id("i1"), &item_id("nope"))
        .unwrap_err();

    assert_eq!(err, DomainError::not_found_in(EntityLevel::Item, "nope", "i1"));
}

#[test]
fn test_remove_timeframe_removes_descendants() {
    let roadmap = populated_roadmap().remove_timeframe(&tf_id("a")).unwrap();

    assert_eq!(roadmap.timeframe_count(), 1);
    assert_eq!(roadmap.initiative_count(), 0);
    assert_eq!(roadmap.item_count(), 0);
    match &roadmap.pending_events()[0] {
        RoadmapEvent::TimeframeRemoved(e) => assert_eq!(e.initiative_count, 1),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_move_initiative_between_timeframes() {
    let original = populated_roadmap();
    let moved = original
        .move_initiative(&tf_id("a"), &tf_id("b"), &init_id("i1"))
        .unwrap();

    assert!(moved.initiative(&tf_id("a"), &init_id("i1")).is_err());
    assert_eq!(
        moved.initiative(&tf_id("b"), &init_id("i1")).unwrap(),
        original.initiative(&tf_id("a"), &init_id("i1")).unwrap()
    );
    assert_eq!(event_types(&moved), vec!["InitiativeMoved"]);

    let err = moved
        .move_initiative(&tf_id("a"), &tf_id("b"), &init_id("i1"))
        .unwrap_err();
    assert_eq!(err, DomainError::not_found_in(EntityLevel::Initiative, "i1", "a"));
}

#[test]
fn test_move_within_same_timeframe_is_noop() {
    let original = populated_roadmap();
    let moved = original
        .move_initiative(&tf_id("a"), &tf_id("a"), &init_id("i1"))
        .unwrap();

    assert_eq!(moved, original);
    assert!(moved.pending_events().is_empty());
}

#[test]
fn test_update_initiative_raises_specific_events() {
    let roadmap = populated_roadmap()
        .update_initiative(
            &tf_id("a"),
            &init_id("i1"),
            &InitiativeUpdate {
                title: Some("Search v2".to_string()),
                priority: Some(Priority::Critical),
                category: Some(Category::Research),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(
        event_types(&roadmap),
        vec![
            "InitiativePriorityChanged",
            "InitiativeCategoryChanged",
            "InitiativeUpdated"
        ]
    );
    let updated = roadmap.initiative(&tf_id("a"), &init_id("i1")).unwrap();
    assert_eq!(updated.title(), "Search v2");
    assert_eq!(updated.item_count(), 1);
}

#[test]
fn test_update_keeps_child_position() {
    let roadmap = populated_roadmap()
        .add_initiative(&tf_id("a"), initiative("i2", "Billing", Priority::Low))
        .unwrap()
        .update_initiative(
            &tf_id("a"),
            &init_id("i1"),
            &InitiativeUpdate {
                description: Some("changed".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let ids: Vec<_> = roadmap
        .timeframe(&tf_id("a"))
        .unwrap()
        .initiatives()
        .iter()
        .map(|i| i.id().as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["i1", "i2"]);
}

#[test]
fn test_change_item_status() {
    let roadmap = populated_roadmap()
        .change_item_status(&tf_id("a"), &init_id("i1"), &item_id("x"), Status::InProgress)
        .unwrap();

    let item = roadmap.item(&tf_id("a"), &init_id("i1"), &item_id("x")).unwrap();
    assert_eq!(item.status(), Status::InProgress);
    assert_eq!(event_types(&roadmap), vec!["ItemStatusChanged"]);
}

#[test]
fn test_change_item_status_rejects_reopen_to_in_progress() {
    let roadmap = populated_roadmap()
        .change_item_status(&tf_id("a"), &init_id("i1"), &item_id("x"), Status::Completed)
        .unwrap();

    let err = roadmap
        .change_item_status(&tf_id("a"), &init_id("i1"), &item_id("x"), Status::InProgress)
        .unwrap_err();
    assert!(matches!(err, DomainError::BusinessRuleViolation { .. }));
}

#[test]
fn test_add_items_is_all_or_nothing() {
    let original = populated_roadmap();

    let err = original
        .add_items(&tf_id("a"), &init_id("missing"), vec![item("y", "Y"), item("z", "Z")])
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert_eq!(original.item_count(), 1);

    let updated = original
        .add_items(&tf_id("a"), &init_id("i1"), vec![item("y", "Y"), item("z", "Z")])
        .unwrap();
    assert_eq!(updated.item_count(), 3);
    assert_eq!(event_types(&updated), vec!["ItemAdded", "ItemAdded"]);
}

#[test]
fn test_link_and_unlink_item_reference() {
    let path = (tf_id("a"), init_id("i1"), item_id("x"));
    let linked = populated_roadmap()
        .link_item(&path.0, &path.1, &path.2, "prd-42")
        .unwrap();
    let linked_twice = linked.link_item(&path.0, &path.1, &path.2, "prd-42").unwrap();

    let item = linked_twice.item(&path.0, &path.1, &path.2).unwrap();
    assert_eq!(item.related_entities(), &["prd-42".to_string()]);

    let unlinked = linked_twice
        .unlink_item(&path.0, &path.1, &path.2, "prd-42")
        .unwrap();
    assert!(unlinked
        .item(&path.0, &path.1, &path.2)
        .unwrap()
        .related_entities()
        .is_empty());
}

#[test]
fn test_update_roadmap_metadata() {
    let roadmap = create_test_roadmap()
        .update(&RoadmapUpdate {
            title: Some("Renamed".to_string()),
            owner: Some("alice".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(roadmap.title(), "Renamed");
    match &roadmap.pending_events()[0] {
        RoadmapEvent::RoadmapUpdated(e) => assert_eq!(e.changed_fields, vec!["title"]),
        other => panic!("unexpected event {other:?}"),
    }

    let err = roadmap
        .update(&RoadmapUpdate {
            version: Some(String::new()),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationError { .. }));
}

#[test]
fn test_update_timeframe_records_previous_values() {
    let roadmap = populated_roadmap()
        .update_timeframe(
            &tf_id("b"),
            &TimeframeUpdate {
                name: Some("Later".to_string()),
                order: Some(9),
            },
        )
        .unwrap();

    match &roadmap.pending_events()[0] {
        RoadmapEvent::TimeframeUpdated(e) => {
            assert_eq!(e.previous_name, "Q2");
            assert_eq!(e.name, "Later");
            assert_eq!(e.previous_order, 2);
            assert_eq!(e.order, 9);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_display_order_sorts_by_order_then_insertion() {
    let roadmap = create_test_roadmap()
        .add_timeframe(timeframe("late", "Later", 5))
        .add_timeframe(timeframe("now", "Now", 1))
        .add_timeframe(timeframe("next", "Next", 5));

    let names: Vec<_> = roadmap
        .timeframes_in_display_order()
        .iter()
        .map(|tf| tf.name())
        .collect();
    assert_eq!(names, vec!["Now", "Later", "Next"]);
}

#[test]
fn test_json_round_trip_drops_events() {
    let roadmap = populated_roadmap();
    let json = roadmap.to_json().unwrap();

    assert!(json["timeframes"].is_array());
    assert_eq!(json["timeframes"][0]["initiatives"][0]["items"][0]["id"], "x");

    let restored = Roadmap::from_persistence(json).unwrap();
    assert_eq!(restored, roadmap);
    assert!(restored.pending_events().is_empty());
}

#[test]
fn test_from_persistence_tolerates_missing_optionals() {
    let json = serde_json::json!({
        "id": "rm-1",
        "title": "Legacy",
        "version": "0.1",
        "owner": "bob",
        "timeframes": [
            { "id": "t1", "name": "Someday", "initiatives": [
                { "id": "i1", "title": "Old work", "items": [ { "id": "x1", "title": "Thing" } ] }
            ] }
        ]
    });

    let roadmap = Roadmap::from_persistence(json).unwrap();
    let item = roadmap.item(&tf_id("t1"), &init_id("i1"), &item_id("x1")).unwrap();
    assert_eq!(item.status(), Status::Planned);
    assert_eq!(roadmap.description(), "");
    assert_eq!(
        roadmap.initiative(&tf_id("t1"), &init_id("i1")).unwrap().priority(),
        Priority::Medium
    );
}

#[test]
fn test_from_persistence_rejects_non_object() {
    let err = Roadmap::from_persistence(serde_json::json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, DomainError::DeserializationFailed { .. }));
}

#[test]
fn test_items_with_path() {
    let roadmap = populated_roadmap();
    let items = roadmap.items_with_path();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].0.timeframe_id.as_str(), "a");
    assert_eq!(items[0].0.initiative_id.as_str(), "i1");
    assert_eq!(items[0].1.title(), "Index docs");
}
