//! Conway's Game of Life on a bounded, resizable board.
//!
//! The [`engine`] steps only the cells that can change and reports each
//! generation as a delta; [`playback`] drives it through play, pause, reset,
//! stop and generation jumps. The remaining modules are the terminal front end.

pub mod app;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod help;
pub mod patterns;
pub mod playback;
pub mod settings;
pub mod terminal;

pub use engine::{Bounds, Coord, Delta, Simulation, StartSet};
pub use error::{PlaybackError, SettingsError, StartSetError};
pub use playback::{LifeEvent, LifeObserver, PlaybackController, PlaybackState};
