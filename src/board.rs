//! The strip board: registry, lane state, view and drag state in one value.
//!
//! Every mutation returns the [`Effect`]s its caller must carry out. The
//! board itself never touches storage.

use anyhow::{Result, anyhow};
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::AirwayCatalog;
use crate::commands::{Command, Effect};
use crate::drag::{DragController, DragState};
use crate::feed::FlightFeed;
use crate::lanes::{LaneState, OrderSync, SnapshotSync};
use crate::model::{BoardMode, Flight, StripKind};
use crate::registry::FlightRegistry;
use crate::strip::StripLayout;
use crate::view::{BoardView, StackedGeometry};
use crate::waypoints::FixColumns;

/// One lane as displayed, strips in render order.
#[derive(Debug, Clone, Serialize)]
pub struct LaneLayout {
    pub lane: String,
    pub strips: Vec<StripLayout>,
}

pub struct Board {
    catalog: AirwayCatalog,
    registry: FlightRegistry,
    lanes: LaneState,
    view: BoardView,
    fixes: IndexMap<String, FixColumns>,
    drag: DragController,
    geometry: StackedGeometry,
    sync: Box<dyn OrderSync>,
}

impl Board {
    /// Board over restored lane state. The view starts rendered.
    pub fn new(catalog: AirwayCatalog, lanes: LaneState) -> Self {
        let mut board = Self {
            catalog,
            registry: FlightRegistry::new(),
            lanes,
            view: BoardView::default(),
            fixes: IndexMap::new(),
            drag: DragController::new(),
            geometry: StackedGeometry::default(),
            sync: Box::new(SnapshotSync),
        };
        board.render();
        board
    }

    pub fn with_geometry(mut self, geometry: StackedGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Replace how the order store is brought up to date after a change.
    pub fn with_order_sync(mut self, sync: Box<dyn OrderSync>) -> Self {
        self.sync = sync;
        self
    }

    pub fn mode(&self) -> BoardMode {
        self.lanes.mode()
    }

    pub fn catalog(&self) -> &AirwayCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &FlightRegistry {
        &self.registry
    }

    pub fn lanes(&self) -> &LaneState {
        &self.lanes
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn geometry(&self) -> &StackedGeometry {
        &self.geometry
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Fix columns of an oceanic strip.
    pub fn fixes(&self, callsign: &str) -> Option<&FixColumns> {
        self.fixes.get(callsign)
    }

    /// Render order per lane.
    pub fn layout(&self) -> IndexMap<String, Vec<String>> {
        self.lanes.layout(&self.registry)
    }

    /// Rebuild the view from the current layout.
    pub fn render(&mut self) {
        self.view = BoardView::from_layout(self.layout());
    }

    /// Everything the view shows, with per-strip display data.
    pub fn strip_layouts(&self) -> Vec<LaneLayout> {
        self.view
            .lanes()
            .map(|(lane, callsigns)| LaneLayout {
                lane: lane.to_string(),
                strips: callsigns
                    .iter()
                    .filter_map(|cs| self.registry.get(cs))
                    .map(|flight| StripLayout::for_flight(flight, self.fixes.get(&flight.callsign)))
                    .collect(),
            })
            .collect()
    }

    fn sync_orders(&mut self) {
        self.sync.sync(&mut self.lanes, &self.view);
    }

    fn admit(&mut self, flight: Flight) -> Vec<Effect> {
        let callsign = flight.callsign.clone();
        if let StripKind::Oceanic(plan) = &flight.kind {
            self.fixes.insert(
                callsign.clone(),
                FixColumns::for_route(&plan.route, &self.catalog),
            );
        }
        let first = self.mode().first_lane();
        self.lanes.assign(&callsign, first);
        self.sync_orders();
        tracing::info!(%callsign, kind = flight.type_tag(), "strip added");
        vec![Effect::Persist, Effect::Render]
    }

    fn admit_registered(&mut self, callsign: &str) -> Result<Vec<Effect>> {
        let flight = self
            .registry
            .get(callsign)
            .cloned()
            .ok_or_else(|| anyhow!("Strip {} vanished after insert", callsign))?;
        Ok(self.admit(flight))
    }

    /// Add an oceanic strip, looking the callsign up in `feed`.
    ///
    /// Empty and duplicate callsigns are ignored. A feed error aborts the add
    /// and is returned unchanged.
    pub fn add_oceanic<F: FlightFeed + ?Sized>(
        &mut self,
        callsign: &str,
        feed: &mut F,
    ) -> Result<Vec<Effect>> {
        let Some(callsign) = self.registry.add_oceanic(callsign, feed)? else {
            return Ok(Vec::new());
        };
        self.admit_registered(&callsign)
    }

    /// Add a free-text strip stamped with `now_millis`. Empty text is ignored.
    pub fn add_custom(&mut self, text: &str, now_millis: i64) -> Result<Vec<Effect>> {
        let Some(callsign) = self.registry.add_custom(text, now_millis) else {
            return Ok(Vec::new());
        };
        self.admit_registered(&callsign)
    }

    /// Remove a strip everywhere it is referenced. Unknown callsigns are a
    /// no-op.
    pub fn delete_flight(&mut self, callsign: &str) -> Vec<Effect> {
        let in_registry = self.registry.remove(callsign).is_some();
        let in_lanes = self.lanes.forget(callsign);
        let in_view = self.view.remove(callsign);
        self.fixes.shift_remove(callsign);
        self.drag.cancel_if(callsign);
        if !(in_registry || in_lanes || in_view) {
            tracing::debug!(callsign, "delete of unknown strip ignored");
            return Vec::new();
        }
        tracing::info!(callsign, "strip deleted");
        vec![Effect::Persist]
    }

    fn can_move(&self, callsign: &str, lane: &str) -> bool {
        if !self.registry.contains(callsign) || !self.view.contains(callsign) {
            tracing::debug!(callsign, "move of unknown strip ignored");
            return false;
        }
        if !self.mode().has_lane(lane) {
            tracing::debug!(lane, "move into unknown lane ignored");
            return false;
        }
        true
    }

    /// Place a strip at `index` of `lane` (clamped to the lane length).
    pub fn reorder(&mut self, callsign: &str, lane: &str, index: usize) -> Vec<Effect> {
        if !self.can_move(callsign, lane) {
            return Vec::new();
        }
        self.view.insert_at(lane, index, callsign);
        self.lanes.reassign(callsign, lane);
        self.sync_orders();
        tracing::debug!(callsign, lane, index, "strip reordered");
        vec![Effect::Persist]
    }

    /// Move a strip to the end of `lane`.
    pub fn reassign_lane(&mut self, callsign: &str, lane: &str) -> Vec<Effect> {
        self.reorder(callsign, lane, usize::MAX)
    }

    /// Type into a fix column. Asks for a render when the strip grew its
    /// extension column.
    pub fn edit_fix(&mut self, callsign: &str, column: usize, value: &str) -> Result<Vec<Effect>> {
        let fixes = self
            .fixes
            .get_mut(callsign)
            .ok_or_else(|| anyhow!("No oceanic strip {}", callsign))?;
        if fixes.set_fix(column, value)? {
            tracing::debug!(callsign, columns = fixes.len(), "fix columns extended");
            return Ok(vec![Effect::Render]);
        }
        Ok(Vec::new())
    }

    /// Type into the cruise level box of an oceanic strip.
    pub fn edit_level(&mut self, callsign: &str, value: &str) -> Result<Vec<Effect>> {
        let fixes = self
            .fixes
            .get_mut(callsign)
            .ok_or_else(|| anyhow!("No oceanic strip {}", callsign))?;
        if fixes.set_level(value) {
            tracing::debug!(callsign, columns = fixes.len(), "fix columns extended");
            return Ok(vec![Effect::Render]);
        }
        Ok(Vec::new())
    }

    // ── Drag gestures ──────────────────────────────────────────────────────

    /// Pick up a strip. Returns whether a drag started.
    pub fn drag_start(&mut self, callsign: &str) -> bool {
        self.drag.start(&self.view, callsign)
    }

    /// Pointer moved to `y` over `lane`. Returns whether the view changed.
    pub fn drag_over(&mut self, lane: &str, y: f32) -> bool {
        self.drag.drag_over(&mut self.view, &self.geometry, lane, y)
    }

    /// The dragged strip was released over `lane`.
    pub fn drop_on(&mut self, lane: &str) -> Vec<Effect> {
        let Some(callsign) = self.drag.payload().map(str::to_string) else {
            return Vec::new();
        };
        if !self.mode().has_lane(lane) {
            return Vec::new();
        }
        self.lanes.reassign(&callsign, lane);
        self.sync_orders();
        tracing::debug!(%callsign, lane, "strip dropped");
        vec![Effect::Persist]
    }

    /// The drag finished, whether or not it was dropped on a lane. The
    /// current view order is always synced.
    pub fn drag_end(&mut self) -> Vec<Effect> {
        if self.drag.finish().is_none() {
            return Vec::new();
        }
        self.sync_orders();
        vec![Effect::Persist]
    }

    /// Run a command. Only the oceanic add consults `feed`.
    pub fn apply<F: FlightFeed + ?Sized>(
        &mut self,
        command: Command,
        feed: &mut F,
    ) -> Result<Vec<Effect>> {
        match command {
            Command::AddOceanic { callsign } => self.add_oceanic(&callsign, feed),
            Command::AddCustom { text } => self.add_custom(&text, Utc::now().timestamp_millis()),
            Command::DeleteFlight { callsign } => Ok(self.delete_flight(&callsign)),
            Command::Reorder {
                callsign,
                lane,
                index,
            } => Ok(self.reorder(&callsign, &lane, index)),
            Command::ReassignLane { callsign, lane } => Ok(self.reassign_lane(&callsign, &lane)),
            Command::EditFix {
                callsign,
                column,
                value,
            } => self.edit_fix(&callsign, column, &value),
            Command::EditLevel { callsign, value } => self.edit_level(&callsign, &value),
        }
    }
}
