//! Roadmap Persistence Layer
//!
//! Infrastructure layer providing repository implementations for the roadmap
//! and note aggregates defined in `roadmap-domain`.
//!
//! ## Features
//!
//! - **In-Memory Repositories**: Thread-safe in-memory implementations for testing and development
//! - **Document Repositories**: Every collection kept in one JSON document on disk
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Infrastructure Layer                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  memory/                    │  document/                         │
//! │  ─────────                  │  ─────────                         │
//! │  InMemoryRoadmapRepository  │  DocumentRoadmapRepository         │
//! │  InMemoryNoteRepository     │  DocumentNoteRepository            │
//! │                             │  JsonDocumentStore                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ implements
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Domain Layer                               │
//! │  RoadmapRepository, RoadmapNoteRepository                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use roadmap_persistence::{DocumentStoreConfig, JsonDocumentStore, DocumentRoadmapRepository};
//! use std::sync::Arc;
//!
//! let config = DocumentStoreConfig::load()?;
//! let store = Arc::new(JsonDocumentStore::from_config(&config)?);
//! let roadmaps = DocumentRoadmapRepository::new(Arc::clone(&store));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod memory;

pub use config::DocumentStoreConfig;
pub use error::{PersistenceError, PersistenceResult};

// Re-export commonly used types
pub use document::{DocumentNoteRepository, DocumentRoadmapRepository, JsonDocumentStore};
pub use memory::{InMemoryNoteRepository, InMemoryRoadmapRepository};
