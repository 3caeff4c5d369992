//! Lane assignment and per-lane strip order.
//!
//! Two maps make up the persisted board state:
//!
//! - the position map, callsign → lane;
//! - the order store, lane → callsigns in the order they were last shown.
//!
//! The order store is not maintained move by move. It is re-derived from
//! what the [`BoardView`] currently shows, through an [`OrderSync`]
//! implementation, after every structural or positional change.

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;

use crate::model::{BoardMode, OrderMap, PositionMap};
use crate::registry::FlightRegistry;
use crate::store::{KeyValueStore, ORDERS_KEY, POSITIONS_KEY};
use crate::view::BoardView;

#[derive(Debug, Clone)]
pub struct LaneState {
    mode: BoardMode,
    positions: PositionMap,
    orders: OrderMap,
}

impl LaneState {
    pub fn new(mode: BoardMode) -> Self {
        Self::from_maps(mode, PositionMap::new(), OrderMap::new())
    }

    pub fn from_maps(mode: BoardMode, positions: PositionMap, orders: OrderMap) -> Self {
        Self {
            mode,
            positions,
            orders,
        }
    }

    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    pub fn orders(&self) -> &OrderMap {
        &self.orders
    }

    /// Stored lane of a callsign, if any.
    pub fn position(&self, callsign: &str) -> Option<&str> {
        self.positions.get(callsign).map(String::as_str)
    }

    /// Lane a callsign renders in: its stored lane, or the mode's first lane.
    pub fn effective_lane(&self, callsign: &str) -> &str {
        self.position(callsign)
            .unwrap_or_else(|| self.mode.first_lane())
    }

    /// Record a lane for a callsign that has none yet. Returns whether the
    /// map changed.
    pub fn assign(&mut self, callsign: &str, lane: &str) -> bool {
        if self.positions.contains_key(callsign) {
            return false;
        }
        self.positions.insert(callsign.to_string(), lane.to_string());
        true
    }

    /// Move a callsign to `lane` regardless of its current lane.
    pub fn reassign(&mut self, callsign: &str, lane: &str) {
        self.positions
            .insert(callsign.to_string(), lane.to_string());
    }

    /// Drop a callsign from the position map and every lane's order.
    /// Returns whether anything was removed.
    pub fn forget(&mut self, callsign: &str) -> bool {
        let mut changed = self.positions.shift_remove(callsign).is_some();
        for order in self.orders.values_mut() {
            let before = order.len();
            order.retain(|cs| cs != callsign);
            changed |= order.len() != before;
        }
        changed
    }

    /// Replace the order store wholesale.
    pub fn set_orders(&mut self, orders: OrderMap) {
        self.orders = orders;
    }

    /// Render order of every lane of the mode.
    ///
    /// Stored orders are laid out first, for all lanes, restricted to flights
    /// still in the registry. A callsign listed by several lanes goes to the
    /// first of them in mode order. Flights no stored order mentions are then
    /// appended to their positioned lane in registry order.
    pub fn layout(&self, registry: &FlightRegistry) -> IndexMap<String, Vec<String>> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        let mut layout: IndexMap<String, Vec<String>> = IndexMap::new();
        for &lane in self.mode.lanes() {
            let stored: &[String] = self.orders.get(lane).map(Vec::as_slice).unwrap_or(&[]);
            let strips = stored
                .iter()
                .filter(|cs| registry.contains(cs) && seen.insert(cs.as_str()))
                .cloned()
                .collect();
            layout.insert(lane.to_string(), strips);
        }
        for callsign in registry.callsigns() {
            if !seen.insert(callsign) {
                continue;
            }
            if let Some(strips) = layout.get_mut(self.effective_lane(callsign)) {
                strips.push(callsign.to_string());
            }
        }
        layout
    }

    /// Restore both maps. Absent or unreadable values start empty.
    pub fn load<S: KeyValueStore + ?Sized>(mode: BoardMode, store: &S) -> Self {
        let positions = read_map::<PositionMap, S>(store, POSITIONS_KEY);
        let orders = read_map::<OrderMap, S>(store, ORDERS_KEY);
        tracing::debug!(
            positions = positions.len(),
            lanes = orders.len(),
            "restored lane state"
        );
        Self::from_maps(mode, positions, orders)
    }

    /// Write both maps, replacing whatever the store held.
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let positions = serde_json::to_string(&self.positions)?;
        let orders = serde_json::to_string(&self.orders)?;
        store
            .set(POSITIONS_KEY, positions)
            .context("Failed to persist lane positions")?;
        store
            .set(ORDERS_KEY, orders)
            .context("Failed to persist lane orders")?;
        Ok(())
    }
}

fn read_map<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, %err, "discarding unreadable stored value");
            T::default()
        }
    }
}

/// Strategy that brings the order store up to date after a change.
pub trait OrderSync {
    fn sync(&mut self, lanes: &mut LaneState, view: &BoardView);
}

/// Copies every lane's currently shown sequence into the order store.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotSync;

impl OrderSync for SnapshotSync {
    fn sync(&mut self, lanes: &mut LaneState, view: &BoardView) {
        let orders: OrderMap = lanes
            .mode()
            .lanes()
            .iter()
            .map(|&lane| (lane.to_string(), view.lane(lane).to_vec()))
            .collect();
        lanes.set_orders(orders);
    }
}
