//! Drag-reorder gesture state machine.
//!
//! A drag moves through `Idle → Dragging → Idle`. While dragging, hovering a
//! lane re-inserts the strip live in the [`BoardView`]; nothing is committed
//! to the lane state until the board handles the drop or the drag end.

use crate::view::{BoardView, StripGeometry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// A strip is being dragged; its callsign is the drag payload.
    Dragging { callsign: String },
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Callsign being dragged, if any.
    pub fn payload(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { callsign } => Some(callsign),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.payload().is_some()
    }

    /// Pick up a strip. Refused while another drag is in flight or when the
    /// strip is not on the board.
    pub fn start(&mut self, view: &BoardView, callsign: &str) -> bool {
        if self.is_dragging() || !view.contains(callsign) {
            return false;
        }
        self.state = DragState::Dragging {
            callsign: callsign.to_string(),
        };
        true
    }

    /// Pointer at `y` over `lane`: move the dragged strip to its insertion
    /// point in that lane. Returns whether the view changed.
    pub fn drag_over<G: StripGeometry + ?Sized>(
        &self,
        view: &mut BoardView,
        geometry: &G,
        lane: &str,
        y: f32,
    ) -> bool {
        let Some(dragged) = self.payload() else {
            return false;
        };
        if !view.has_lane(lane) {
            return false;
        }
        let before = insertion_point(view, geometry, lane, y, dragged);
        view.insert_before(lane, dragged, before.as_deref())
    }

    /// Forget the current drag. Returns the callsign that was being dragged.
    pub fn finish(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { callsign } => Some(callsign),
        }
    }

    /// Drop the drag without a gesture, e.g. when its strip is deleted.
    pub fn cancel_if(&mut self, callsign: &str) {
        if self.payload() == Some(callsign) {
            self.state = DragState::Idle;
        }
    }
}

/// Strip in `lane` the dragged strip should be inserted before when the
/// pointer is at `y`, or `None` to append.
///
/// Among the non-dragged strips whose midpoint lies below the pointer, the
/// one closest to the pointer wins.
pub fn insertion_point<G: StripGeometry + ?Sized>(
    view: &BoardView,
    geometry: &G,
    lane: &str,
    y: f32,
    dragged: &str,
) -> Option<String> {
    let mut closest: Option<(f32, &String)> = None;
    for callsign in view.lane(lane).iter().filter(|cs| *cs != dragged) {
        let Some(span) = geometry.span(view, lane, callsign) else {
            continue;
        };
        let offset = y - span.midpoint();
        if offset < 0.0 && closest.is_none_or(|(best, _)| offset > best) {
            closest = Some((offset, callsign));
        }
    }
    closest.map(|(_, callsign)| callsign.clone())
}
