//! Presentation-side board state.
//!
//! [`BoardView`] is what is currently on screen: the callsign sequence shown
//! in each lane. Drag gestures move strips here first; the order store is
//! later synced from it. [`StripGeometry`] answers where a strip sits
//! vertically so pointer positions can be turned into insertion points.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardView {
    lanes: IndexMap<String, Vec<String>>,
}

impl BoardView {
    /// View showing exactly `layout`.
    pub fn from_layout(layout: IndexMap<String, Vec<String>>) -> Self {
        Self { lanes: layout }
    }

    pub fn lanes(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.lanes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Strips shown in `lane`; empty for unknown lanes.
    pub fn lane(&self, lane: &str) -> &[String] {
        self.lanes.get(lane).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_lane(&self, lane: &str) -> bool {
        self.lanes.contains_key(lane)
    }

    /// Lane currently showing `callsign`.
    pub fn lane_of(&self, callsign: &str) -> Option<&str> {
        self.lanes
            .iter()
            .find(|(_, strips)| strips.iter().any(|cs| cs == callsign))
            .map(|(lane, _)| lane.as_str())
    }

    pub fn contains(&self, callsign: &str) -> bool {
        self.lane_of(callsign).is_some()
    }

    /// Take a strip off the board. Returns whether it was shown.
    pub fn remove(&mut self, callsign: &str) -> bool {
        let mut removed = false;
        for strips in self.lanes.values_mut() {
            if let Some(idx) = strips.iter().position(|cs| cs == callsign) {
                strips.remove(idx);
                removed = true;
            }
        }
        removed
    }

    /// Place `callsign` at `index` of `lane`, moving it from wherever it was.
    /// The index is clamped to the lane length. Unknown lanes are refused.
    pub fn insert_at(&mut self, lane: &str, index: usize, callsign: &str) -> bool {
        if !self.has_lane(lane) {
            return false;
        }
        self.remove(callsign);
        let Some(strips) = self.lanes.get_mut(lane) else {
            return false;
        };
        let index = index.min(strips.len());
        strips.insert(index, callsign.to_string());
        true
    }

    /// Place `callsign` in `lane` directly before `before`, or at the end when
    /// `before` is `None` or not in the lane.
    pub fn insert_before(&mut self, lane: &str, callsign: &str, before: Option<&str>) -> bool {
        if !self.has_lane(lane) {
            return false;
        }
        self.remove(callsign);
        let Some(strips) = self.lanes.get_mut(lane) else {
            return false;
        };
        let index = before
            .and_then(|b| strips.iter().position(|cs| cs == b))
            .unwrap_or(strips.len());
        strips.insert(index, callsign.to_string());
        true
    }
}

/// Vertical extent of a strip in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalSpan {
    pub top: f32,
    pub height: f32,
}

impl VerticalSpan {
    pub fn midpoint(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

pub trait StripGeometry {
    /// Where `callsign` is drawn inside `lane`, or `None` if it is not there.
    fn span(&self, view: &BoardView, lane: &str, callsign: &str) -> Option<VerticalSpan>;
}

/// Strips stacked top to bottom below a lane header, all the same height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackedGeometry {
    pub header: f32,
    pub strip_height: f32,
    pub gap: f32,
}

impl Default for StackedGeometry {
    fn default() -> Self {
        Self {
            header: 40.0,
            strip_height: 72.0,
            gap: 8.0,
        }
    }
}

impl StackedGeometry {
    /// Top edge of the strip at `index`.
    pub fn top_of(&self, index: usize) -> f32 {
        self.header + index as f32 * (self.strip_height + self.gap)
    }
}

impl StripGeometry for StackedGeometry {
    fn span(&self, view: &BoardView, lane: &str, callsign: &str) -> Option<VerticalSpan> {
        let index = view.lane(lane).iter().position(|cs| cs == callsign)?;
        Some(VerticalSpan {
            top: self.top_of(index),
            height: self.strip_height,
        })
    }
}
