//! Oceanic flight progress strip board.
//!
//! Strips for tracked flights (and free-text notes) live in ordered lanes
//! (`planned`, `cruise`, `exit`) and are reordered by dragging. This crate
//! holds the board logic: lane assignment and order persistence, the drag
//! state machine, and the route parser that picks each strip's waypoint
//! columns from an airway catalog.
//!
//! The binary `vstrips` drives a [`session::Session`] from stdin.

pub mod board;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod drag;
pub mod feed;
pub mod lanes;
pub mod model;
pub mod registry;
pub mod route;
pub mod session;
pub mod store;
pub mod strip;
pub mod view;
pub mod waypoints;
