//! Cell identity, state and the cached adjacency list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A board coordinate. Doubles as the cell's structural key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<[u32; 2]> for Coord {
    fn from([x, y]: [u32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coord> for [u32; 2] {
    fn from(c: Coord) -> Self {
        [c.x, c.y]
    }
}

impl From<(u32, u32)> for Coord {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.x, self.y)
    }
}

/// Board dimensions: cells live in `[0, width) x [0, height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.x < self.width && c.y < self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Off,
    On,
}

impl CellState {
    #[inline]
    pub fn is_on(self) -> bool {
        matches!(self, CellState::On)
    }
}

/// Index of a cell in its registry. Non-owning; only meaningful for the
/// registry that handed it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) u32);

impl CellId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Neighbor list computed for a particular set of bounds.
#[derive(Clone, Debug)]
pub(crate) struct Adjacency {
    pub(crate) bounds: Bounds,
    pub(crate) neighbors: Vec<CellId>,
}

#[derive(Clone, Debug)]
pub struct Cell {
    coord: Coord,
    state: CellState,
    adjacency: Option<Adjacency>,
}

impl Cell {
    pub(crate) fn new(coord: Coord) -> Self {
        Self {
            coord,
            state: CellState::Off,
            adjacency: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Cached neighbors, if they were computed for `bounds`.
    pub(crate) fn neighbors_for(&self, bounds: Bounds) -> Option<&[CellId]> {
        match &self.adjacency {
            Some(adj) if adj.bounds == bounds => Some(&adj.neighbors),
            _ => None,
        }
    }

    pub(crate) fn has_adjacency_for(&self, bounds: Bounds) -> bool {
        self.neighbors_for(bounds).is_some()
    }

    pub(crate) fn set_adjacency(&mut self, adjacency: Adjacency) {
        self.adjacency = Some(adjacency);
    }
}
