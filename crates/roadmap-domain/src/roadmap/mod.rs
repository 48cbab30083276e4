//! Roadmap Aggregate
//!
//! Roadmap aggregate root with nested entities
//! - Roadmap owns Timeframes, Timeframes own Initiatives, Initiatives own Items
//! - Children are addressed by id within their parent
//! - Copy-on-write mutation: the original value is never modified
//! - Domain events buffered on the aggregate until pulled

mod collection;
mod initiative;
mod item;
#[allow(clippy::module_inception)]
mod roadmap;
mod timeframe;
#[cfg(test)]
mod tests;

pub use collection::{EntityMap, Keyed};
pub use initiative::{InitiativeUpdate, RoadmapInitiative};
pub use item::{ItemUpdate, RoadmapItem};
pub use roadmap::{Roadmap, RoadmapUpdate};
pub use timeframe::{RoadmapTimeframe, TimeframeUpdate};
