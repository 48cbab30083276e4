//! Aggregate-wide validation and normalization
//!
//! Stateless: every call takes the roadmap by reference and returns a result
//! or a new roadmap.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::priority_balance::PriorityBalanceRule;
use super::timeframe_ordering::TimeframeOrderingRule;
use crate::errors::{DomainError, DomainResult};
use crate::roadmap::Roadmap;

/// Which rule produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    RequiredField,
    DuplicateInitiativeTitle,
    PriorityBalance,
    TimeframeOrdering,
}

/// A single failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleViolation {
    pub rule: RuleKind,
    /// Id of the offending entity, when there is one
    pub entity_id: Option<String>,
    pub message: String,
}

impl RuleViolation {
    pub fn new(rule: RuleKind, entity_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            entity_id,
            message: message.into(),
        }
    }
}

/// Validation result for a roadmap
///
/// Errors make the roadmap invalid; warnings are informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<RuleViolation>,
    pub warnings: Vec<RuleViolation>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, violation: RuleViolation) {
        self.is_valid = false;
        self.errors.push(violation);
    }

    pub fn add_warning(&mut self, violation: RuleViolation) {
        self.warnings.push(violation);
    }

    /// Convert to an error carrying every violation, if invalid
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(DomainError::ValidationFailed {
                violations: self.errors,
            })
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// A focused aggregate-wide rule
pub trait RoadmapRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Record violations into `result`
    fn check(&self, roadmap: &Roadmap, result: &mut ValidationResult);

    /// Repair drift this rule knows how to fix; ids and content are untouched
    fn normalize(&self, roadmap: Roadmap) -> Roadmap {
        roadmap
    }
}

/// Title, version and owner are required; so are child names and titles
pub struct RequiredFieldsRule;

impl RoadmapRule for RequiredFieldsRule {
    fn name(&self) -> &'static str {
        "required-fields"
    }

    fn check(&self, roadmap: &Roadmap, result: &mut ValidationResult) {
        let root = Some(roadmap.id().to_string());
        for (field, value) in [
            ("title", roadmap.title()),
            ("version", roadmap.version()),
            ("owner", roadmap.owner()),
        ] {
            if value.trim().is_empty() {
                result.add_error(RuleViolation::new(
                    RuleKind::RequiredField,
                    root.clone(),
                    format!("Roadmap {field} cannot be empty"),
                ));
            }
        }

        for timeframe in roadmap.timeframes() {
            if timeframe.name().trim().is_empty() {
                result.add_error(RuleViolation::new(
                    RuleKind::RequiredField,
                    Some(timeframe.id().to_string()),
                    format!("Timeframe {} has an empty name", timeframe.id()),
                ));
            }
            for initiative in timeframe.initiatives() {
                if initiative.title().trim().is_empty() {
                    result.add_error(RuleViolation::new(
                        RuleKind::RequiredField,
                        Some(initiative.id().to_string()),
                        format!("Initiative {} has an empty title", initiative.id()),
                    ));
                }
                for item in initiative.items() {
                    if item.title().trim().is_empty() {
                        result.add_error(RuleViolation::new(
                            RuleKind::RequiredField,
                            Some(item.id().to_string()),
                            format!("Item {} has an empty title", item.id()),
                        ));
                    }
                }
            }
        }
    }
}

/// No two initiatives in one timeframe may share a trimmed, case-folded title
pub struct UniqueInitiativeTitlesRule;

impl RoadmapRule for UniqueInitiativeTitlesRule {
    fn name(&self) -> &'static str {
        "unique-initiative-titles"
    }

    fn check(&self, roadmap: &Roadmap, result: &mut ValidationResult) {
        for timeframe in roadmap.timeframes() {
            let mut groups: Vec<(String, usize)> = Vec::new();
            let mut index: HashMap<String, usize> = HashMap::new();
            for initiative in timeframe.initiatives() {
                let title = initiative.normalized_title();
                if title.is_empty() {
                    continue;
                }
                match index.get(&title) {
                    Some(&i) => groups[i].1 += 1,
                    None => {
                        index.insert(title.clone(), groups.len());
                        groups.push((title, 1));
                    }
                }
            }

            for (title, count) in groups.into_iter().filter(|(_, count)| *count > 1) {
                result.add_error(RuleViolation::new(
                    RuleKind::DuplicateInitiativeTitle,
                    Some(timeframe.id().to_string()),
                    format!(
                        "Timeframe '{}' has {count} initiatives titled '{title}'",
                        timeframe.name()
                    ),
                ));
            }
        }
    }
}

/// Runs the rule set over a roadmap
pub struct RoadmapValidationService {
    rules: Vec<Box<dyn RoadmapRule>>,
}

impl RoadmapValidationService {
    pub fn new() -> Self {
        Self::with_rules(vec![
            Box::new(RequiredFieldsRule),
            Box::new(UniqueInitiativeTitlesRule),
            Box::new(PriorityBalanceRule::default()),
            Box::new(TimeframeOrderingRule),
        ])
    }

    pub fn with_rules(rules: Vec<Box<dyn RoadmapRule>>) -> Self {
        Self { rules }
    }

    /// Run every rule, collecting all violations
    pub fn validate(&self, roadmap: &Roadmap) -> ValidationResult {
        let mut result = ValidationResult::valid();
        for rule in &self.rules {
            rule.check(roadmap, &mut result);
        }
        result
    }

    /// Apply every rule's repair; never fails and never drops entities
    pub fn normalize(&self, roadmap: &Roadmap) -> Roadmap {
        self.rules
            .iter()
            .fold(roadmap.clone(), |acc, rule| rule.normalize(acc))
    }

    /// Normalize, then validate; the normalized roadmap is returned only when valid
    pub fn prepare(&self, roadmap: &Roadmap) -> DomainResult<Roadmap> {
        let normalized = self.normalize(roadmap);
        self.validate(&normalized).into_result()?;
        Ok(normalized)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for RoadmapValidationService {
    fn default() -> Self {
        Self::new()
    }
}
