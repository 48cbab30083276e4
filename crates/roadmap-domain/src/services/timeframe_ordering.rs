//! Timeframe display ordering

use std::collections::BTreeMap;

use super::validation::{RoadmapRule, RuleKind, RuleViolation, ValidationResult};
use crate::roadmap::Roadmap;

/// Warns on duplicate or gapped `order` values
///
/// Normalization sorts timeframes by `(order, insertion position)` and
/// renumbers them 1..n. Buffered timeframe events are rewritten to carry
/// the renumbered order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeframeOrderingRule;

impl RoadmapRule for TimeframeOrderingRule {
    fn name(&self) -> &'static str {
        "timeframe-ordering"
    }

    fn check(&self, roadmap: &Roadmap, result: &mut ValidationResult) {
        let mut by_order: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        for timeframe in roadmap.timeframes() {
            by_order.entry(timeframe.order()).or_default().push(timeframe.name());
        }

        for (order, names) in by_order.iter().filter(|(_, names)| names.len() > 1) {
            result.add_warning(RuleViolation::new(
                RuleKind::TimeframeOrdering,
                Some(roadmap.id().to_string()),
                format!("Timeframes {} share order {order}", names.join(", ")),
            ));
        }

        let sequential = roadmap
            .timeframes_in_display_order()
            .iter()
            .enumerate()
            .all(|(i, tf)| tf.order() as usize == i + 1);
        if by_order.len() == roadmap.timeframe_count() && !sequential {
            result.add_warning(RuleViolation::new(
                RuleKind::TimeframeOrdering,
                Some(roadmap.id().to_string()),
                "Timeframe orders are not sequential from 1",
            ));
        }
    }

    fn normalize(&self, mut roadmap: Roadmap) -> Roadmap {
        roadmap.timeframes.sort_by(|a, b| a.order().cmp(&b.order()));
        for (position, timeframe) in roadmap.timeframes.values_mut().enumerate() {
            timeframe.order = position as u32 + 1;
        }
        roadmap.restate_timeframe_orders();
        roadmap
    }
}
