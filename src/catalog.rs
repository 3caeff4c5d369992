//! Airway reference data: airway identifier → ordered waypoint identifiers.
//!
//! The catalog is read-only once built. On disk it is a single JSON object:
//!
//! ```json
//! { "NATA": ["ETARI", "RESNO", "55N020W"], "UN546": ["DEVOL", "BERUX"] }
//! ```

use anyhow::{Context, Result};
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirwayCatalog {
    airways: IndexMap<String, Vec<String>>,
}

impl AirwayCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(airway, waypoints)` pairs.
    pub fn from_entries<A, W, I>(entries: I) -> Self
    where
        A: Into<String>,
        W: Into<String>,
        I: IntoIterator<Item = (A, Vec<W>)>,
    {
        entries
            .into_iter()
            .map(|(airway, waypoints)| {
                let airway: String = airway.into();
                let waypoints: Vec<String> = waypoints.into_iter().map(Into::into).collect();
                (airway, waypoints)
            })
            .collect()
    }

    /// Parse the JSON object form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse airway catalog JSON")
    }

    /// Load a catalog file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read airway catalog {}", path))?;
        let catalog = Self::from_json_str(&text)
            .with_context(|| format!("Invalid airway catalog {}", path))?;
        tracing::info!(airways = catalog.len(), %path, "loaded airway catalog");
        Ok(catalog)
    }

    /// Waypoints of an airway in catalog-declared direction.
    pub fn waypoints(&self, airway: &str) -> Option<&[String]> {
        self.airways.get(airway).map(Vec::as_slice)
    }

    pub fn contains(&self, airway: &str) -> bool {
        self.airways.contains_key(airway)
    }

    pub fn len(&self) -> usize {
        self.airways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airways.is_empty()
    }

    pub fn airways(&self) -> impl Iterator<Item = &str> {
        self.airways.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Vec<String>)> for AirwayCatalog {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            airways: iter.into_iter().collect(),
        }
    }
}
