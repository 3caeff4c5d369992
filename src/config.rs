//! Runtime configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! JSON config file, `VSTRIPS_*` environment variables, command-line flags.

use std::time::Duration;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::feed::DEFAULT_FEED_URL;
use crate::model::BoardMode;
use crate::view::StackedGeometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: BoardMode,
    /// JSON file holding the persisted lane state.
    pub store_path: Utf8PathBuf,
    /// Airway catalog; without one no strip gets waypoint columns.
    pub catalog_path: Option<Utf8PathBuf>,
    pub feed_url: String,
    /// Saved feed document to use instead of the network.
    pub feed_file: Option<Utf8PathBuf>,
    /// No timeout when unset.
    pub feed_timeout_secs: Option<u64>,
    pub geometry: StackedGeometry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: BoardMode::Oceanic,
            store_path: Utf8PathBuf::from("vstrips_store.json"),
            catalog_path: None,
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_file: None,
            feed_timeout_secs: None,
            geometry: StackedGeometry::default(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `path` (if given), then with the environment.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read config {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path))
    }

    /// Overlay `VSTRIPS_STORE`, `VSTRIPS_CATALOG` and `VSTRIPS_FEED_URL`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(store) = var("VSTRIPS_STORE") {
            self.store_path = Utf8PathBuf::from(store);
        }
        if let Some(catalog) = var("VSTRIPS_CATALOG") {
            self.catalog_path = Some(Utf8PathBuf::from(catalog));
        }
        if let Some(url) = var("VSTRIPS_FEED_URL") {
            self.feed_url = url;
        }
    }

    pub fn feed_timeout(&self) -> Option<Duration> {
        self.feed_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"store_path": "/tmp/board.json", "geometry": {"gap": 2.0}}"#)
                .unwrap();
        assert_eq!(config.store_path, Utf8PathBuf::from("/tmp/board.json"));
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.geometry.gap, 2.0);
        assert_eq!(config.geometry.strip_height, 72.0);
        assert_eq!(config.mode, BoardMode::Oceanic);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "VSTRIPS_CATALOG" => Some("airways.json".to_string()),
            "VSTRIPS_FEED_URL" => Some("http://localhost:8080/feed.json".to_string()),
            _ => None,
        });
        assert_eq!(config.catalog_path, Some(Utf8PathBuf::from("airways.json")));
        assert_eq!(config.feed_url, "http://localhost:8080/feed.json");
        assert_eq!(config.store_path, Utf8PathBuf::from("vstrips_store.json"));
        assert!(config.feed_timeout().is_none());
    }
}
