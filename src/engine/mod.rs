//! Generation engine
//!
//! Cells live in a grow-only [`CellRegistry`]; the simulation state is the
//! sparse [`ActiveSet`] of cells that are on. Each step examines only active
//! cells and their neighbors and reports a [`Delta`] instead of the full
//! board.

mod active;
mod cell;
mod delta;
mod registry;
pub mod replay;
mod simulation;
mod start_set;
pub mod stepper;

pub use active::ActiveSet;
pub use cell::{Bounds, Cell, CellId, CellState, Coord};
pub use delta::{CoordDelta, Delta};
pub use registry::CellRegistry;
pub use simulation::Simulation;
pub use start_set::{coords_to_json, parse_start_set, StartSet};
