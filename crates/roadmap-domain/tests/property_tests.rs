//! Property-based tests for value objects and the roadmap aggregate
//!
//! These tests verify that value objects keep their wire format and that
//! normalization never changes entity identity or content.

use std::collections::BTreeSet;

use proptest::prelude::*;
use roadmap_domain::roadmap::{Roadmap, RoadmapInitiative, RoadmapTimeframe};
use roadmap_domain::services::RoadmapValidationService;
use roadmap_domain::value_objects::*;

fn any_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::all().to_vec())
}

fn any_priority() -> impl Strategy<Value = Priority> {
    prop::sample::select(Priority::all().to_vec())
}

fn any_status() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::all().to_vec())
}

/// Roadmap with arbitrary timeframe orders and initiative priorities
fn any_roadmap() -> impl Strategy<Value = Roadmap> {
    prop::collection::vec(
        (0u32..6, prop::collection::vec(any_priority(), 0..6)),
        0..5,
    )
    .prop_map(|timeframes| {
        let mut roadmap = Roadmap::create("Plan", "", "1.0", "alice").unwrap();
        for (t, (order, priorities)) in timeframes.into_iter().enumerate() {
            let timeframe = RoadmapTimeframe::create(format!("T{t}"), order).unwrap();
            let tf_id = timeframe.id().clone();
            roadmap = roadmap.add_timeframe(timeframe);
            for (i, priority) in priorities.into_iter().enumerate() {
                let initiative = RoadmapInitiative::create(
                    format!("Initiative {t}-{i}"),
                    "",
                    Category::Feature,
                    priority,
                )
                .unwrap();
                roadmap = roadmap.add_initiative(&tf_id, initiative).unwrap();
            }
        }
        roadmap
    })
}

fn id_set(roadmap: &Roadmap) -> BTreeSet<String> {
    roadmap
        .timeframes()
        .into_iter()
        .flat_map(|tf| {
            std::iter::once(tf.id().to_string())
                .chain(tf.initiatives().into_iter().map(|i| i.id().to_string()))
        })
        .collect()
}

// ============================================================================
// Value Object Property Tests
// ============================================================================

proptest! {
    /// Category literal roundtrip
    #[test]
    fn test_category_literal_roundtrip(category in any_category()) {
        prop_assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        let json = serde_json::to_string(&category).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", category.as_str()));
    }

    /// Priority parsing ignores case and surrounding whitespace
    #[test]
    fn test_priority_parse_is_lenient(priority in any_priority()) {
        let noisy = format!("  {}  ", priority.as_str().to_uppercase());
        prop_assert_eq!(noisy.parse::<Priority>().unwrap(), priority);
    }

    /// Priority ordering agrees with weight
    #[test]
    fn test_priority_order_matches_weight(a in any_priority(), b in any_priority()) {
        prop_assert_eq!(a.cmp(&b), a.weight().cmp(&b.weight()));
    }

    /// Terminal statuses only reopen to planned
    #[test]
    fn test_terminal_status_transitions(from in any_status(), to in any_status()) {
        if from.is_terminal() && from != to {
            prop_assert_eq!(from.can_transition_to(to), to == Status::Planned);
        }
    }

    /// Unknown literals are rejected
    #[test]
    fn test_unknown_status_rejected(s in "[a-z]{1,12}") {
        prop_assume!(Status::all().iter().all(|st| st.as_str() != s));
        prop_assert!(s.parse::<Status>().is_err());
    }
}

// ============================================================================
// Aggregate Property Tests
// ============================================================================

proptest! {
    /// Normalization keeps every id and leaves the input untouched
    #[test]
    fn test_normalize_preserves_ids(roadmap in any_roadmap()) {
        let service = RoadmapValidationService::new();
        let before = roadmap.clone();
        let normalized = service.normalize(&roadmap);

        prop_assert_eq!(id_set(&normalized), id_set(&roadmap));
        prop_assert_eq!(roadmap, before);
    }

    /// Normalized timeframes are numbered 1..n and raise no ordering warnings
    #[test]
    fn test_normalize_orders_timeframes(roadmap in any_roadmap()) {
        let service = RoadmapValidationService::new();
        let normalized = service.normalize(&roadmap);

        let orders: Vec<u32> = normalized.timeframes().iter().map(|tf| tf.order()).collect();
        let expected: Vec<u32> = (1..=normalized.timeframe_count() as u32).collect();
        prop_assert_eq!(orders, expected);
        prop_assert!(service
            .validate(&normalized)
            .warnings
            .iter()
            .all(|w| w.rule != roadmap_domain::services::RuleKind::TimeframeOrdering));
    }

    /// Normalization is idempotent
    #[test]
    fn test_normalize_idempotent(roadmap in any_roadmap()) {
        let service = RoadmapValidationService::new();
        let once = service.normalize(&roadmap);
        let twice = service.normalize(&once);

        let order = |r: &Roadmap| -> Vec<String> {
            r.timeframes()
                .iter()
                .flat_map(|tf| tf.initiatives().into_iter().map(|i| i.id().to_string()))
                .collect()
        };
        prop_assert_eq!(order(&once), order(&twice));
    }

    /// JSON round trip keeps the same ids at every level
    #[test]
    fn test_json_roundtrip_keeps_ids(roadmap in any_roadmap()) {
        let restored = Roadmap::from_persistence(roadmap.to_json().unwrap()).unwrap();
        prop_assert_eq!(id_set(&restored), id_set(&roadmap));
        prop_assert_eq!(restored, roadmap);
    }
}
