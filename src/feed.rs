//! Flight-data feed abstraction.
//!
//! The board never talks to the network directly. It asks a [`FlightFeed`]
//! for the pilot record matching a callsign, so tests and offline sessions
//! can use [`StaticFeed`] while live sessions use [`HttpFeed`] against the
//! VATSIM v3 data document.

use std::time::Duration;

use anyhow::{Context, Result};
use camino::Utf8Path;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FEED_URL: &str = "https://data.vatsim.net/v3/vatsim-data.json";

/// The subset of the data document the board reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub pilots: Vec<PilotRecord>,
}

impl FeedDocument {
    /// Pilot whose callsign equals `callsign` exactly (case-sensitive).
    pub fn find(&self, callsign: &str) -> Option<&PilotRecord> {
        self.pilots.iter().find(|p| p.callsign == callsign)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PilotRecord {
    pub callsign: String,
    #[serde(default)]
    pub transponder: Option<String>,
    #[serde(default)]
    pub flight_plan: Option<FlightPlan>,
}

/// Filed flight plan. Every field may be missing or empty in the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightPlan {
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub arrival: Option<String>,
    #[serde(default)]
    pub aircraft_short: Option<String>,
    #[serde(default)]
    pub altitude: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
}

/// Source of flight-plan snapshots.
pub trait FlightFeed {
    /// Look up a callsign. `Ok(None)` means the feed answered but has no such
    /// pilot; `Err` means the feed could not be consulted at all.
    fn lookup(&mut self, callsign: &str) -> Result<Option<PilotRecord>>;
}

impl<F: FlightFeed + ?Sized> FlightFeed for Box<F> {
    fn lookup(&mut self, callsign: &str) -> Result<Option<PilotRecord>> {
        (**self).lookup(callsign)
    }
}

/// Fetches the whole data document on every lookup.
pub struct HttpFeed {
    client: Client,
    url: String,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<FeedDocument> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("Request to {} failed", self.url))?
            .error_for_status()
            .with_context(|| format!("Feed {} returned an error status", self.url))?;
        response
            .json::<FeedDocument>()
            .with_context(|| format!("Failed to decode feed document from {}", self.url))
    }
}

impl FlightFeed for HttpFeed {
    fn lookup(&mut self, callsign: &str) -> Result<Option<PilotRecord>> {
        let document = self.fetch()?;
        tracing::debug!(pilots = document.pilots.len(), callsign, "fetched feed document");
        Ok(document.find(callsign).cloned())
    }
}

/// In-memory feed, also used for offline sessions.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    document: FeedDocument,
}

impl StaticFeed {
    pub fn new(document: FeedDocument) -> Self {
        Self { document }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let document = serde_json::from_str(json).context("Failed to parse feed document")?;
        Ok(Self::new(document))
    }

    /// Load a saved copy of the data document.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read feed document {}", path))?;
        Self::from_json_str(&text).with_context(|| format!("Invalid feed document {}", path))
    }

    pub fn document(&self) -> &FeedDocument {
        &self.document
    }
}

impl FlightFeed for StaticFeed {
    fn lookup(&mut self, callsign: &str) -> Result<Option<PilotRecord>> {
        Ok(self.document.find(callsign).cloned())
    }
}
