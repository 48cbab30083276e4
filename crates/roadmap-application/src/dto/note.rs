//! Note-related DTOs

use serde::{Deserialize, Serialize};

/// Command to create a roadmap note
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteCommand {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub timeline: Option<String>,
    #[serde(default)]
    pub related_entities: Vec<String>,
}

/// Command to update a note; an empty `timeline` clears it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteCommand {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub timeline: Option<String>,
}
