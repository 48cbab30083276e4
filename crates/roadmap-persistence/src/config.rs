//! Document store configuration
//!
//! Loaded from an optional TOML file, then overridden by `ROADMAP_`-prefixed
//! environment variables (`ROADMAP_DATA_DIR`, `ROADMAP_FILE_NAME`,
//! `ROADMAP_PRETTY`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, PersistenceResult};

const ENV_PREFIX: &str = "ROADMAP";
const DEFAULT_FILE_NAME: &str = "roadmap.json";

/// Where and how the JSON document is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStoreConfig {
    /// Directory holding the document
    pub data_dir: PathBuf,
    /// File name inside `data_dir`
    pub file_name: String,
    /// Pretty-print the document on write
    pub pretty: bool,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            pretty: true,
        }
    }
}

impl DocumentStoreConfig {
    /// Config rooted at `data_dir` with default file name
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load from the environment only
    pub fn load() -> PersistenceResult<Self> {
        Self::build(None)
    }

    /// Load from `path` (if it exists), then the environment
    pub fn load_from(path: &Path) -> PersistenceResult<Self> {
        Self::build(Some(path))
    }

    fn build(path: Option<&Path>) -> PersistenceResult<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())?
            .set_default("file_name", defaults.file_name)?
            .set_default("pretty", defaults.pretty)?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(false));
        }
        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Write this config as TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> PersistenceResult<()> {
        let text = toml::to_string(self).map_err(|e| PersistenceError::Config(e.to_string()))?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;
        }
        std::fs::write(path, text).map_err(|e| PersistenceError::io(path, e))
    }

    fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roadmap")
    }

    /// Full path of the document
    pub fn document_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    pub fn validate(&self) -> PersistenceResult<()> {
        let name = self.file_name.trim();
        if name.is_empty() {
            return Err(PersistenceError::Config("file name cannot be empty".into()));
        }
        if name.contains(['/', '\\']) {
            return Err(PersistenceError::Config(format!(
                "file name '{name}' must not contain path separators"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DocumentStoreConfig::default();
        assert_eq!(config.file_name, "roadmap.json");
        assert!(config.data_dir.ends_with("roadmap"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_file_names() {
        let mut config = DocumentStoreConfig::in_dir("/tmp");
        config.file_name = "  ".into();
        assert!(config.validate().is_err());

        config.file_name = "nested/roadmap.json".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "data_dir = \"/srv/plans\"").unwrap();
        writeln!(file, "file_name = \"plans.json\"").unwrap();
        writeln!(file, "pretty = false").unwrap();

        let config = DocumentStoreConfig::load_from(&path).unwrap();
        assert_eq!(config.document_path(), PathBuf::from("/srv/plans/plans.json"));
        assert!(!config.pretty);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf/store.toml");
        let config = DocumentStoreConfig {
            file_name: "team.json".into(),
            ..DocumentStoreConfig::in_dir(dir.path().join("data"))
        };

        config.save_to(&path).unwrap();
        assert_eq!(DocumentStoreConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocumentStoreConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.file_name, "roadmap.json");
    }
}
