//! Priority balance within a timeframe

use super::validation::{RoadmapRule, RuleKind, RuleViolation, ValidationResult};
use crate::roadmap::Roadmap;
use crate::value_objects::Priority;

/// Warns when critical initiatives crowd out everything else in a timeframe
///
/// Normalization orders initiatives by descending priority weight, keeping
/// the existing order among equals.
#[derive(Debug, Clone)]
pub struct PriorityBalanceRule {
    /// Timeframes smaller than this are never flagged
    pub min_initiatives: usize,
    /// Maximum share of critical initiatives before a warning
    pub max_critical_share: f64,
}

impl Default for PriorityBalanceRule {
    fn default() -> Self {
        Self {
            min_initiatives: 4,
            max_critical_share: 0.5,
        }
    }
}

impl RoadmapRule for PriorityBalanceRule {
    fn name(&self) -> &'static str {
        "priority-balance"
    }

    fn check(&self, roadmap: &Roadmap, result: &mut ValidationResult) {
        for timeframe in roadmap.timeframes() {
            let total = timeframe.initiative_count();
            if total < self.min_initiatives {
                continue;
            }
            let critical = timeframe
                .initiatives()
                .iter()
                .filter(|i| i.priority() == Priority::Critical)
                .count();
            if critical as f64 / total as f64 > self.max_critical_share {
                result.add_warning(RuleViolation::new(
                    RuleKind::PriorityBalance,
                    Some(timeframe.id().to_string()),
                    format!(
                        "Timeframe '{}' has {critical} of {total} initiatives marked critical",
                        timeframe.name()
                    ),
                ));
            }
        }
    }

    fn normalize(&self, mut roadmap: Roadmap) -> Roadmap {
        for timeframe in roadmap.timeframes.values_mut() {
            timeframe
                .initiatives
                .sort_by(|a, b| b.priority().weight().cmp(&a.priority().weight()));
        }
        roadmap
    }
}
