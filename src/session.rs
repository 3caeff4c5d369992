//! A board bound to its storage and flight feed.
//!
//! [`Session`] owns the three collaborators and carries out the effects the
//! board asks for: persisting lane state and re-rendering the view.

use anyhow::Result;

use crate::board::Board;
use crate::catalog::AirwayCatalog;
use crate::commands::{Command, Effect};
use crate::feed::FlightFeed;
use crate::lanes::LaneState;
use crate::model::BoardMode;
use crate::store::KeyValueStore;
use crate::view::StackedGeometry;

pub struct Session<S: KeyValueStore, F: FlightFeed> {
    board: Board,
    store: S,
    feed: F,
}

impl<S: KeyValueStore, F: FlightFeed> Session<S, F> {
    /// Restore lane state from `store` and render an empty board.
    pub fn open(mode: BoardMode, catalog: AirwayCatalog, store: S, feed: F) -> Self {
        let lanes = LaneState::load(mode, &store);
        Self {
            board: Board::new(catalog, lanes),
            store,
            feed,
        }
    }

    pub fn with_geometry(mut self, geometry: StackedGeometry) -> Self {
        self.board = self.board.with_geometry(geometry);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn feed_mut(&mut self) -> &mut F {
        &mut self.feed
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run a command and its effects.
    pub fn execute(&mut self, command: Command) -> Result<Vec<Effect>> {
        let effects = self.board.apply(command, &mut self.feed)?;
        self.run_effects(&effects)?;
        Ok(effects)
    }

    fn run_effects(&mut self, effects: &[Effect]) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::Persist => self.board.lanes().persist(&mut self.store)?,
                Effect::Render => self.board.render(),
            }
        }
        Ok(())
    }

    pub fn add_oceanic(&mut self, callsign: &str) -> Result<Vec<Effect>> {
        self.execute(Command::AddOceanic {
            callsign: callsign.to_string(),
        })
    }

    pub fn add_custom(&mut self, text: &str) -> Result<Vec<Effect>> {
        self.execute(Command::AddCustom {
            text: text.to_string(),
        })
    }

    pub fn delete_flight(&mut self, callsign: &str) -> Result<Vec<Effect>> {
        self.execute(Command::DeleteFlight {
            callsign: callsign.to_string(),
        })
    }

    pub fn drag_start(&mut self, callsign: &str) -> bool {
        self.board.drag_start(callsign)
    }

    pub fn drag_over(&mut self, lane: &str, y: f32) -> bool {
        self.board.drag_over(lane, y)
    }

    pub fn drop_on(&mut self, lane: &str) -> Result<Vec<Effect>> {
        let effects = self.board.drop_on(lane);
        self.run_effects(&effects)?;
        Ok(effects)
    }

    pub fn drag_end(&mut self) -> Result<Vec<Effect>> {
        let effects = self.board.drag_end();
        self.run_effects(&effects)?;
        Ok(effects)
    }
}
