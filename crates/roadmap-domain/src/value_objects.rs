//! Value objects representing immutable domain concepts
//!
//! Identifiers are opaque strings: freshly minted ones are UUIDs, but ids read
//! back from a document store are accepted as long as they are non-empty.
//! Category, Priority and Status are closed sets whose kebab-case literals are
//! the wire format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new random identifier
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Create from an existing string, rejecting blank input
            pub fn from_string(s: &str) -> DomainResult<Self> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::InvalidValue {
                        kind: $label,
                        value: s.to_string(),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

entity_id!(
    /// Roadmap aggregate identifier
    RoadmapId,
    "roadmap id"
);
entity_id!(
    /// Timeframe identifier, unique within a roadmap
    TimeframeId,
    "timeframe id"
);
entity_id!(
    /// Initiative identifier, unique within a timeframe
    InitiativeId,
    "initiative id"
);
entity_id!(
    /// Item identifier, unique within an initiative
    ItemId,
    "item id"
);
entity_id!(
    /// Roadmap note identifier
    NoteId,
    "note id"
);

/// Level of the roadmap hierarchy an entity lives at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityLevel {
    Roadmap,
    Timeframe,
    Initiative,
    Item,
    Note,
}

impl fmt::Display for EntityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityLevel::Roadmap => "roadmap",
            EntityLevel::Timeframe => "timeframe",
            EntityLevel::Initiative => "initiative",
            EntityLevel::Item => "item",
            EntityLevel::Note => "note",
        };
        f.write_str(name)
    }
}

/// Kind of work an initiative or note represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Feature,
    Enhancement,
    BugFix,
    TechnicalDebt,
    Research,
    Infrastructure,
}

impl Category {
    /// Every accepted category, in declaration order
    pub fn all() -> &'static [Category] {
        &[
            Category::Feature,
            Category::Enhancement,
            Category::BugFix,
            Category::TechnicalDebt,
            Category::Research,
            Category::Infrastructure,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Feature => "feature",
            Category::Enhancement => "enhancement",
            Category::BugFix => "bug-fix",
            Category::TechnicalDebt => "technical-debt",
            Category::Research => "research",
            Category::Infrastructure => "infrastructure",
        }
    }

    /// Work that end users see directly
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Category::Feature | Category::Enhancement | Category::BugFix
        )
    }

    /// Work that mostly concerns the engineering organisation
    pub fn is_technical(&self) -> bool {
        matches!(
            self,
            Category::TechnicalDebt | Category::Infrastructure | Category::Research
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| DomainError::InvalidValue {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Relative importance of an initiative or note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Every accepted priority, most important first
    pub fn all() -> &'static [Priority] {
        &[
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Numeric weight, higher is more important (critical = 4, low = 1)
    pub fn weight(&self) -> u8 {
        match self {
            Priority::Critical => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn is_high_priority(&self) -> bool {
        matches!(self, Priority::Critical | Priority::High)
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::Critical)
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.weight().cmp(&other.weight())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Priority::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| DomainError::InvalidValue {
                kind: "priority",
                value: s.to_string(),
            })
    }
}

/// Delivery status of a roadmap item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Planned,
    InProgress,
    Completed,
    Blocked,
    Cancelled,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[
            Status::Planned,
            Status::InProgress,
            Status::Completed,
            Status::Blocked,
            Status::Cancelled,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Planned => "planned",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Blocked => "blocked",
            Status::Cancelled => "cancelled",
        }
    }

    /// Work has started and is not finished
    pub fn is_active(&self) -> bool {
        matches!(self, Status::InProgress | Status::Blocked)
    }

    /// No further work is expected
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Status::Blocked)
    }

    /// Whether an item in this status may move to `next`
    ///
    /// Terminal statuses only reopen to `planned`.
    pub fn can_transition_to(&self, next: Status) -> bool {
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return next == Status::Planned;
        }
        true
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Status::all()
            .iter()
            .copied()
            .find(|st| st.as_str() == needle)
            .ok_or_else(|| DomainError::InvalidValue {
                kind: "status",
                value: s.to_string(),
            })
    }
}
