//! Waypoint column selection for oceanic strips.
//!
//! A strip shows the waypoints of a single *primary airway*: the last
//! catalog airway in its route. The catalog order is flipped when the route
//! joins the airway from its far end, and the number of fix columns is
//! clamped to a fixed band so strips keep a stable width.

use anyhow::{Result, bail};
use serde::Serialize;

use crate::catalog::AirwayCatalog;
use crate::route::{context_waypoints, extract_airways};

pub const MIN_FIX_COLUMNS: usize = 4;
pub const MAX_FIX_COLUMNS: usize = 10;

/// Number of trailing airway waypoints checked against the joining token.
const REVERSAL_WINDOW: usize = 5;

pub const FIX_PLACEHOLDER: &str = "FIX";
/// Label of the single column appended once every fix is filled in.
pub const EXTRA_FIX_LABEL: &str = "WPTX";

/// Last catalog airway referenced by the route.
pub fn primary_airway(route: &str, catalog: &AirwayCatalog) -> Option<String> {
    extract_airways(route, catalog).pop()
}

/// Waypoints of `airway` in the direction the route flies it.
///
/// The catalog entry is copied; if the token before the airway in the route
/// is one of the last few catalog waypoints the route enters from the far
/// end, so the sequence is reversed.
pub fn sequence_waypoints(route: &str, airway: &str, catalog: &AirwayCatalog) -> Vec<String> {
    let mut waypoints = catalog
        .waypoints(airway)
        .map(<[String]>::to_vec)
        .unwrap_or_default();
    if waypoints.len() >= 2 {
        if let Some(before) = context_waypoints(route, airway).before {
            let tail_start = waypoints.len().saturating_sub(REVERSAL_WINDOW);
            if waypoints[tail_start..].contains(&before) {
                waypoints.reverse();
            }
        }
    }
    waypoints
}

/// Columns rendered for `waypoint_count` waypoints.
pub fn fix_column_count(waypoint_count: usize) -> usize {
    waypoint_count.clamp(MIN_FIX_COLUMNS, MAX_FIX_COLUMNS)
}

/// One editable fix column of a strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixColumn {
    pub value: String,
    pub placeholder: String,
}

impl FixColumn {
    fn new(value: impl Into<String>, placeholder: &str) -> Self {
        Self {
            value: value.into(),
            placeholder: placeholder.to_string(),
        }
    }

    pub fn is_filled(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// Fix boxes of one strip: the cruise level entry, the waypoint columns and
/// the one-shot extension column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixColumns {
    primary_airway: Option<String>,
    /// Level typed into the cruise box; empty until entered.
    level: String,
    columns: Vec<FixColumn>,
    initial: usize,
    extended: bool,
}

impl FixColumns {
    /// Build the initial columns for a route.
    ///
    /// Without a primary airway the strip still gets [`MIN_FIX_COLUMNS`]
    /// empty columns.
    pub fn for_route(route: &str, catalog: &AirwayCatalog) -> Self {
        let primary = primary_airway(route, catalog);
        let waypoints = primary
            .as_deref()
            .map(|airway| sequence_waypoints(route, airway, catalog))
            .unwrap_or_default();
        let count = fix_column_count(waypoints.len());
        let columns = (0..count)
            .map(|i| FixColumn::new(waypoints.get(i).cloned().unwrap_or_default(), FIX_PLACEHOLDER))
            .collect();
        Self {
            primary_airway: primary,
            level: String::new(),
            columns,
            initial: count,
            extended: false,
        }
    }

    pub fn primary_airway(&self) -> Option<&str> {
        self.primary_airway.as_deref()
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn columns(&self) -> &[FixColumn] {
        &self.columns
    }

    /// Column values, extension column included.
    pub fn values(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.value.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns laid out when the strip was built.
    pub fn initial_len(&self) -> usize {
        self.initial
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Edit a fix value. Returns `true` when this edit appended the
    /// extension column.
    ///
    /// The extension needs the level box and every initial column filled.
    /// Edits to the extension column never trigger it, and it is appended at
    /// most once per strip.
    pub fn set_fix(&mut self, index: usize, value: &str) -> Result<bool> {
        let Some(column) = self.columns.get_mut(index) else {
            bail!(
                "Fix column {} out of range ({} columns)",
                index,
                self.columns.len()
            );
        };
        column.value = value.to_string();
        if index >= self.initial {
            return Ok(false);
        }
        Ok(self.extend_if_complete())
    }

    /// Type into the cruise level box. Returns `true` when this edit
    /// appended the extension column.
    pub fn set_level(&mut self, value: &str) -> bool {
        self.level = value.to_string();
        self.extend_if_complete()
    }

    fn extend_if_complete(&mut self) -> bool {
        if self.extended
            || self.level.trim().is_empty()
            || !self.columns[..self.initial].iter().all(FixColumn::is_filled)
        {
            return false;
        }
        self.columns.push(FixColumn::new("", EXTRA_FIX_LABEL));
        self.extended = true;
        true
    }
}
