//! JSON document store
//!
//! One JSON object on disk, keyed by collection name, each collection an
//! array of plain records:
//!
//! ```json
//! { "roadmaps": [ { "id": "…", … } ], "roadmapNotes": [ … ] }
//! ```
//!
//! Every write reads the whole document, changes one collection in memory and
//! writes the whole document back through a temporary file and a rename. An
//! async mutex serializes writes within one process; nothing coordinates
//! separate processes, where the last writer wins.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::config::DocumentStoreConfig;
use crate::error::{PersistenceError, PersistenceResult};

/// Collection holding roadmap records
pub const ROADMAPS: &str = "roadmaps";
/// Collection holding roadmap note records
pub const ROADMAP_NOTES: &str = "roadmapNotes";

type Document = Map<String, Value>;

/// Whole-document JSON store backing the document repositories
#[derive(Debug)]
pub struct JsonDocumentStore {
    path: PathBuf,
    pretty: bool,
    write_lock: Mutex<()>,
}

impl JsonDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &DocumentStoreConfig) -> PersistenceResult<Self> {
        config.validate()?;
        Ok(Self {
            pretty: config.pretty,
            ..Self::new(config.document_path())
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records of one collection; a missing file or collection is empty,
/// a collection that is not an array is corrupt
    pub async fn read_collection(&self, collection: &str) -> PersistenceResult<Vec<Value>> {
        let mut document = self.read_document().await?;
        take_collection(&mut document, collection, &self.path)
    }

    /// Insert `record` or replace the record with the same id
    pub async fn upsert(&self, collection: &str, id: &str, record: Value) -> PersistenceResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        let mut records = take_collection(&mut document, collection, &self.path)?;

        records.retain(|r| record_id(r) != Some(id));
        records.push(record);
        let count = records.len();
        document.insert(collection.to_string(), Value::Array(records));

        self.write_document(&document).await?;
        debug!(collection, id, records = count, "Upserted record");
        Ok(())
    }

    /// Remove every record with `id`; `false` when none existed
    pub async fn remove(&self, collection: &str, id: &str) -> PersistenceResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        let mut records = take_collection(&mut document, collection, &self.path)?;

        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        if records.len() == before {
            return Ok(false);
        }
        document.insert(collection.to_string(), Value::Array(records));

        self.write_document(&document).await?;
        debug!(collection, id, "Removed record");
        Ok(true)
    }

    async fn read_document(&self) -> PersistenceResult<Document> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };
        if text.trim().is_empty() {
            return Ok(Document::new());
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(PersistenceError::corrupt(&self.path, "top level is not an object")),
            Err(e) => Err(PersistenceError::corrupt(&self.path, e.to_string())),
        }
    }

    async fn write_document(&self, document: &Document) -> PersistenceResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| PersistenceError::io(dir, e))?;
        }

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(document)
        } else {
            serde_json::to_vec(document)
        }
        .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| PersistenceError::io(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PersistenceError::io(&self.path, e))
    }
}

/// Detach a collection's records; anything but an array is corrupt
fn take_collection(document: &mut Document, collection: &str, path: &Path) -> PersistenceResult<Vec<Value>> {
    match document.remove(collection) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(records)) => Ok(records),
        Some(_) => {
            error!(path = %path.display(), collection, "Collection is not an array");
            Err(PersistenceError::corrupt(
                path,
                format!("collection '{collection}' is not an array"),
            ))
        }
    }
}

/// The `id` field of a raw record
pub(crate) fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}
