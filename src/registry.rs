//! In-memory registry of every strip on the board, keyed by callsign.
//!
//! Iteration follows insertion order, which is the order unordered strips are
//! appended to a lane.

use anyhow::Result;
use indexmap::IndexMap;

use crate::feed::{FlightFeed, PilotRecord};
use crate::model::{Flight, OceanicFlight, SENTINEL, normalize_callsign};
use crate::route::extract_registration;

/// Prefix of synthetic callsigns given to free-text strips.
pub const CUSTOM_PREFIX: &str = "CUSTOM-";

#[derive(Debug, Clone, Default)]
pub struct FlightRegistry {
    flights: IndexMap<String, Flight>,
}

impl FlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, callsign: &str) -> Option<&Flight> {
        self.flights.get(callsign)
    }

    pub fn contains(&self, callsign: &str) -> bool {
        self.flights.contains_key(callsign)
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Flights in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Flight> {
        self.flights.values()
    }

    pub fn callsigns(&self) -> impl Iterator<Item = &str> {
        self.flights.keys().map(String::as_str)
    }

    /// Insert a flight unless its callsign is taken. Returns whether it was
    /// inserted.
    pub fn insert(&mut self, flight: Flight) -> bool {
        if self.flights.contains_key(&flight.callsign) {
            return false;
        }
        self.flights.insert(flight.callsign.clone(), flight);
        true
    }

    /// Create an oceanic strip from the feed.
    ///
    /// Empty or already-known callsigns are ignored and yield `Ok(None)`. A
    /// feed miss still creates a placeholder flight. A feed failure is
    /// returned as an error and leaves the registry untouched.
    pub fn add_oceanic<F: FlightFeed + ?Sized>(
        &mut self,
        raw_callsign: &str,
        feed: &mut F,
    ) -> Result<Option<String>> {
        let callsign = normalize_callsign(raw_callsign);
        if callsign.is_empty() || self.contains(&callsign) {
            tracing::debug!(%callsign, "ignoring empty or duplicate oceanic add");
            return Ok(None);
        }
        let record = feed.lookup(&callsign)?;
        if record.is_none() {
            tracing::info!(%callsign, "callsign not in feed, creating placeholder strip");
        }
        let flight = Flight::oceanic(callsign.clone(), oceanic_from_record(record.as_ref()));
        // The lookup may have taken a while; the callsign is re-checked here.
        if !self.insert(flight) {
            tracing::debug!(%callsign, "callsign added while lookup was pending");
            return Ok(None);
        }
        Ok(Some(callsign))
    }

    /// Create a free-text strip with a time-based callsign.
    ///
    /// Empty text is ignored. `now_millis` is bumped until the synthetic
    /// callsign is unused.
    pub fn add_custom(&mut self, text: &str, now_millis: i64) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("ignoring empty custom strip");
            return None;
        }
        let mut stamp = now_millis;
        let mut callsign = format!("{CUSTOM_PREFIX}{stamp}");
        while self.contains(&callsign) {
            stamp += 1;
            callsign = format!("{CUSTOM_PREFIX}{stamp}");
        }
        self.insert(Flight::custom(callsign.clone(), text));
        Some(callsign)
    }

    /// Remove a flight, keeping the order of the rest.
    pub fn remove(&mut self, callsign: &str) -> Option<Flight> {
        self.flights.shift_remove(callsign)
    }
}

fn field_or_sentinel(value: Option<&String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => SENTINEL.to_string(),
    }
}

/// Snapshot a pilot record into strip fields.
///
/// A record without a flight plan is treated like a miss: every field is the
/// sentinel.
pub fn oceanic_from_record(record: Option<&PilotRecord>) -> OceanicFlight {
    let Some((pilot, plan)) = record.and_then(|p| p.flight_plan.as_ref().map(|fp| (p, fp)))
    else {
        return OceanicFlight::placeholder();
    };
    OceanicFlight {
        dep: field_or_sentinel(plan.departure.as_ref()),
        arr: field_or_sentinel(plan.arrival.as_ref()),
        aircraft: field_or_sentinel(plan.aircraft_short.as_ref()),
        cruise: field_or_sentinel(plan.altitude.as_ref()),
        squawk: field_or_sentinel(pilot.transponder.as_ref()),
        registration: extract_registration(plan.remarks.as_deref().unwrap_or("")),
        route: plan.route.clone().unwrap_or_default(),
    }
}
