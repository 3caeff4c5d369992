//! Data that drives how a single strip is drawn.

use serde::Serialize;

use crate::catalog::AirwayCatalog;
use crate::model::{Flight, SENTINEL, StripKind};
use crate::waypoints::FixColumns;

/// Background shading picked from the cruise level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StripShade {
    Even,
    Odd,
    Default,
}

impl StripShade {
    /// Shade from the second character of the cruise string (`"F350"` → 3).
    pub fn for_cruise(cruise: &str) -> Self {
        match cruise.chars().nth(1).and_then(|c| c.to_digit(10)) {
            Some(d) if d % 2 == 0 => StripShade::Even,
            Some(_) => StripShade::Odd,
            None => StripShade::Default,
        }
    }
}

/// Cruise level hint shown in the level box: the first three characters.
pub fn cruise_placeholder(cruise: &str) -> String {
    let head: String = cruise.chars().take(3).collect();
    if head.is_empty() {
        SENTINEL.to_string()
    } else {
        head
    }
}

fn or_sentinel(value: &str) -> String {
    if value.is_empty() {
        SENTINEL.to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StripBody {
    Oceanic {
        aircraft: String,
        dep: String,
        arr: String,
        registration: String,
        squawk: String,
        cruise_placeholder: String,
        /// Level typed into the cruise box; empty shows the placeholder.
        level: String,
        shade: StripShade,
        primary_airway: Option<String>,
        fixes: FixColumns,
    },
    Custom {
        text: String,
    },
}

/// A rendered strip: callsign plus the fields and columns it displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripLayout {
    pub callsign: String,
    #[serde(flatten)]
    pub body: StripBody,
}

impl StripLayout {
    /// Lay out `flight`. Oceanic strips need their fix columns; custom strips
    /// ignore `fixes`.
    pub fn for_flight(flight: &Flight, fixes: Option<&FixColumns>) -> Self {
        let body = match &flight.kind {
            StripKind::Oceanic(plan) => StripBody::Oceanic {
                aircraft: or_sentinel(&plan.aircraft),
                dep: or_sentinel(&plan.dep),
                arr: or_sentinel(&plan.arr),
                registration: or_sentinel(&plan.registration),
                squawk: or_sentinel(&plan.squawk),
                cruise_placeholder: cruise_placeholder(&plan.cruise),
                level: fixes.map(|f| f.level().to_string()).unwrap_or_default(),
                shade: StripShade::for_cruise(&plan.cruise),
                primary_airway: fixes.and_then(|f| f.primary_airway().map(str::to_string)),
                fixes: fixes
                    .cloned()
                    .unwrap_or_else(|| FixColumns::for_route("", &AirwayCatalog::new())),
            },
            StripKind::Custom { text } => StripBody::Custom { text: text.clone() },
        };
        Self {
            callsign: flight.callsign.clone(),
            body,
        }
    }
}
