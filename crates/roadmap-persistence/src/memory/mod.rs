//! In-Memory Repository Implementations
//!
//! Thread-safe in-memory implementations of domain repository interfaces.
//! Suitable for testing and development.

mod note_repository;
mod roadmap_repository;

pub use note_repository::InMemoryNoteRepository;
pub use roadmap_repository::InMemoryRoadmapRepository;
