//! Roadmap Application Layer
//!
//! The Application Layer implements roadmap use cases by orchestrating the
//! domain aggregate and its validation service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Application Layer                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Services              │ DTOs                 │ Events                   │
//! │  ─────────             │ ────                 │ ──────                   │
//! │  RoadmapCommandService │ CreateRoadmapCommand │ EventPublisher           │
//! │  RoadmapQueryService   │ RoadmapSummaryDto    │ EventDispatcher          │
//! │  NoteService           │ ItemView             │ EventHandler             │
//! └─────────────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ depends on
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Layer                                     │
//! │  Roadmap aggregate, Value Objects, Domain Events, Repository Traits     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Write path
//!
//! Load the roadmap, apply a copy-on-write change, normalize and validate the
//! whole aggregate, save it, then publish the events it buffered. An unknown
//! roadmap id yields `Ok(None)`; an unknown id below it is an error naming the
//! missing level.

pub mod dto;
pub mod errors;
pub mod events;
pub mod services;

// Re-export commonly used types
pub use dto::*;
pub use errors::{ApplicationError, ApplicationResult};
pub use events::{EventDispatcher, EventHandler, EventPublisher};
pub use services::*;
