use anyhow::{Result, anyhow};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Placeholder shown wherever feed data is unavailable.
pub const SENTINEL: &str = "----";

/// Callsign → lane name. Stale keys are tolerated.
pub type PositionMap = IndexMap<String, String>;

/// Lane name → callsigns in the order they were last rendered.
pub type OrderMap = IndexMap<String, Vec<String>>;

// ────────────────────────────────────────────────────────────────────────────
// Board mode
// ────────────────────────────────────────────────────────────────────────────

/// A board mode fixes the ordered set of lanes strips can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardMode {
    /// Oceanic tracking: `planned`, `cruise`, `exit`.
    #[default]
    Oceanic,
}

impl BoardMode {
    /// Lane names in display order.
    pub fn lanes(self) -> &'static [&'static str] {
        match self {
            BoardMode::Oceanic => &["planned", "cruise", "exit"],
        }
    }

    /// Lane that unassigned flights fall into.
    pub fn first_lane(self) -> &'static str {
        self.lanes()[0]
    }

    pub fn has_lane(self, lane: &str) -> bool {
        self.lanes().contains(&lane)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoardMode::Oceanic => "oceanic",
        }
    }
}

impl FromStr for BoardMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "oceanic" => Ok(BoardMode::Oceanic),
            other => Err(anyhow!("Unknown board mode: {}", other)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flights
// ────────────────────────────────────────────────────────────────────────────

/// Flight-plan snapshot taken when an oceanic strip is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OceanicFlight {
    pub dep: String,
    pub arr: String,
    pub aircraft: String,
    /// Cruise altitude or flight level as filed, e.g. `"F350"` or `"35000"`.
    pub cruise: String,
    pub squawk: String,
    pub registration: String,
    /// Free-text route; empty when the plan carried none.
    #[serde(default)]
    pub route: String,
}

impl OceanicFlight {
    /// Every field set to [`SENTINEL`], route left empty.
    pub fn placeholder() -> Self {
        Self {
            dep: SENTINEL.to_string(),
            arr: SENTINEL.to_string(),
            aircraft: SENTINEL.to_string(),
            cruise: SENTINEL.to_string(),
            squawk: SENTINEL.to_string(),
            registration: SENTINEL.to_string(),
            route: String::new(),
        }
    }
}

/// What a strip carries, tagged the same way the persisted board data is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StripKind {
    Oceanic(OceanicFlight),
    /// Free-text annotation strip.
    Custom { text: String },
}

/// A strip on the board, keyed by its uppercase callsign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub callsign: String,
    #[serde(flatten)]
    pub kind: StripKind,
}

impl Flight {
    pub fn oceanic(callsign: impl Into<String>, plan: OceanicFlight) -> Self {
        Self {
            callsign: callsign.into(),
            kind: StripKind::Oceanic(plan),
        }
    }

    pub fn custom(callsign: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            callsign: callsign.into(),
            kind: StripKind::Custom { text: text.into() },
        }
    }

    /// `"oceanic"` or `"custom"`.
    pub fn type_tag(&self) -> &'static str {
        match self.kind {
            StripKind::Oceanic(_) => "oceanic",
            StripKind::Custom { .. } => "custom",
        }
    }

    pub fn as_oceanic(&self) -> Option<&OceanicFlight> {
        match &self.kind {
            StripKind::Oceanic(plan) => Some(plan),
            StripKind::Custom { .. } => None,
        }
    }

    /// Route of an oceanic flight; custom strips have none.
    pub fn route(&self) -> &str {
        self.as_oceanic().map(|p| p.route.as_str()).unwrap_or("")
    }
}

/// Trim and uppercase a user-entered callsign.
pub fn normalize_callsign(raw: &str) -> String {
    raw.trim().to_uppercase()
}
