//! Application layer services
//!
//! These services orchestrate the roadmap aggregate and implement use cases.
//! All services are stateless and use constructor injection for dependencies.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Services                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RoadmapCommandService - Roadmap writes, owns the services   │
//! │    ├ TimeframeService  - Timeframe add/update/remove         │
//! │    ├ InitiativeService - Initiative add/update/remove/move   │
//! │    └ ItemService       - Item add/update/status/links        │
//! │  RoadmapCommitter      - normalize → validate → save → emit  │
//! │  RoadmapQueryService   - Read-only projections               │
//! │  NoteService           - Roadmap note lifecycle              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod committer;
mod initiative_service;
mod item_service;
mod note_service;
mod query_service;
mod roadmap_service;
mod timeframe_service;

pub use committer::RoadmapCommitter;
pub use initiative_service::InitiativeService;
pub use item_service::ItemService;
pub use note_service::NoteService;
pub use query_service::RoadmapQueryService;
pub use roadmap_service::RoadmapCommandService;
pub use timeframe_service::TimeframeService;
