//!
//! grid_events models a bounded 2D grid where sparse events, each with a set of ticket prices,
//! sit on integer coordinates, and answers "which events are closest to this point" queries.
//!
//! The Grid is a flat dense Vec of cells centered on zero. Nearest queries walk it breadth-first,
//! which yields occupied cells by non-decreasing Manhattan distance, ties being broken by a fixed
//! neighbor order (right, down, left, up).
//!

pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod nearest;
pub mod populate;
pub mod report;

pub use config::SimulationConfig;
pub use error::GridError;
pub use event::Event;
pub use grid::{EventHandle, Grid};
pub use nearest::{nearest, NearestIter};
pub use populate::Populator;
pub use report::{closest_events, EventSummary};
