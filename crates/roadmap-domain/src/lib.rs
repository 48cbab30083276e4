//! Roadmap domain layer
//!
//! Pure domain model for product roadmaps:
//! - [`roadmap`]: the Roadmap → Timeframe → Initiative → Item aggregate
//! - [`note`]: free-standing notes weakly linked to roadmap entities
//! - [`events`]: domain events buffered on the aggregate
//! - [`services`]: aggregate-wide validation and normalization
//! - [`repositories`]: persistence ports implemented by infrastructure
//!
//! No I/O happens in this crate.

pub mod errors;
pub mod events;
pub mod note;
pub mod repositories;
pub mod roadmap;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
pub use events::{DomainEvent, RoadmapEvent};
pub use note::{NoteUpdate, RoadmapNote};
pub use repositories::{RoadmapNoteRepository, RoadmapRepository};
pub use roadmap::{
    InitiativeUpdate, ItemUpdate, Roadmap, RoadmapInitiative, RoadmapItem, RoadmapTimeframe,
    RoadmapUpdate, TimeframeUpdate,
};
pub use services::{RoadmapValidationService, RuleKind, RuleViolation, ValidationResult};
pub use value_objects::*;
