//! Error types for termlife.

use crate::engine::{Bounds, Coord};
use std::path::PathBuf;
use thiserror::Error;

/// Why a raw start set was rejected. State is never touched on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartSetError {
    /// Input is not a list of `[x, y]` pairs of non-negative integers.
    #[error("invalid start set: {0}")]
    Malformed(String),

    /// A coordinate lies outside the current board.
    #[error("cell [{}, {}] lies outside the {bounds} board", .coord.x, .coord.y)]
    OutOfBounds {
        /// Offending coordinate.
        coord: Coord,
        /// Board it was checked against.
        bounds: Bounds,
    },
}

/// Playback commands that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// A new session needs a non-empty start set.
    #[error("no start set to play")]
    NoStartSet,
}

/// Problems loading user-supplied files.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown pattern `{name}` (available: {available})")]
    UnknownPattern { name: String, available: String },
}
