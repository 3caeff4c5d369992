//! Durable key-value storage for board state.
//!
//! The board only needs `get`/`set` of string values. [`FileStore`] keeps all
//! keys in one JSON object on disk and rewrites the file on every `set`.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;

/// Key holding the serialized position map.
pub const POSITIONS_KEY: &str = "positions_vstrips";
/// Key holding the serialized order store.
pub const ORDERS_KEY: &str = "orders_vstrips";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// JSON-file-backed store. Read once at open, written through on `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Utf8PathBuf,
    entries: IndexMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; a file
    /// that is not a JSON object of strings is discarded with a warning.
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let text = std::fs::read_to_string(path.as_std_path())
                .with_context(|| format!("Failed to read store {}", path))?;
            match serde_json::from_str::<IndexMap<String, String>>(&text) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(%path, %err, "store file is not valid, starting empty");
                    IndexMap::new()
                }
            }
        } else {
            IndexMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_str().is_empty() {
                std::fs::create_dir_all(parent.as_std_path())
                    .with_context(|| format!("Failed to create {}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(self.path.as_std_path(), json)
            .with_context(|| format!("Failed to write store {}", self.path))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.write()
    }
}
