//! Owning store of every cell ever enclosed by the board, plus lazy adjacency.
//!
//! The registry only grows. Shrinking the board leaves cells outside the new
//! bounds registered so they are still addressable if the board grows back.

use super::cell::{Adjacency, Bounds, Cell, CellId, CellState, Coord};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct CellRegistry {
    cells: Vec<Cell>,
    index: HashMap<Coord, CellId>,
    bounds: Bounds,
}

impl CellRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(bounds: Bounds) -> Self {
        let mut registry = Self::new();
        registry.resize(bounds);
        registry
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of registered cells, including any outside the current bounds.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn id_of(&self, coord: Coord) -> Option<CellId> {
        self.index.get(&coord).copied()
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    pub fn coord(&self, id: CellId) -> Coord {
        self.cells[id.index()].coord()
    }

    pub fn is_on(&self, id: CellId) -> bool {
        self.cells[id.index()].is_on()
    }

    pub(crate) fn set_state(&mut self, id: CellId, state: CellState) {
        self.cells[id.index()].set_state(state);
    }

    /// Change the board bounds, registering only the newly exposed cells.
    ///
    /// Returns how many cells were created. Cached adjacency is stamped with
    /// the bounds it was computed for, so no cache needs to be touched here.
    pub fn resize(&mut self, bounds: Bounds) -> usize {
        let old = self.bounds;
        self.bounds = bounds;

        let before = self.cells.len();
        // Columns past the old width, full new height.
        self.register_rect(old.width..bounds.width, 0..bounds.height);
        // Rows past the old height under the columns both boards share.
        self.register_rect(0..old.width.min(bounds.width), old.height..bounds.height);
        let created = self.cells.len() - before;

        debug!(%old, new = %bounds, created, total = self.cells.len(), "registry resized");
        created
    }

    fn register_rect(&mut self, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) {
        for x in xs {
            for y in ys.clone() {
                let coord = Coord::new(x, y);
                if !self.index.contains_key(&coord) {
                    let id = CellId(self.cells.len() as u32);
                    self.cells.push(Cell::new(coord));
                    self.index.insert(coord, id);
                }
            }
        }
    }

    /// Make sure `id` has a neighbor list valid for the current bounds.
    pub fn resolve_adjacency(&mut self, id: CellId) {
        let bounds = self.bounds;
        if self.cells[id.index()].has_adjacency_for(bounds) {
            return;
        }
        let neighbors = self.compute_neighbors(self.coord(id));
        self.cells[id.index()].set_adjacency(Adjacency { bounds, neighbors });
    }

    /// Neighbors of `id` in the current bounds, resolving them on first use.
    pub fn neighbors_of(&mut self, id: CellId) -> &[CellId] {
        self.resolve_adjacency(id);
        self.cached_neighbors(id)
    }

    /// Previously resolved neighbors. Panics if `resolve_adjacency` has not
    /// been called for the current bounds.
    pub(crate) fn cached_neighbors(&self, id: CellId) -> &[CellId] {
        match self.cells[id.index()].neighbors_for(self.bounds) {
            Some(neighbors) => neighbors,
            None => panic!("adjacency of cell {} read before it was resolved", self.coord(id)),
        }
    }

    pub(crate) fn live_neighbors(&self, id: CellId) -> usize {
        self.cached_neighbors(id)
            .iter()
            .filter(|&&n| self.is_on(n))
            .count()
    }

    fn compute_neighbors(&self, at: Coord) -> Vec<CellId> {
        let b = self.bounds;
        let mut out = Vec::with_capacity(8);
        if b.width == 0 || b.height == 0 {
            return out;
        }
        let x0 = at.x.saturating_sub(1);
        let x1 = (at.x + 1).min(b.width - 1);
        let y0 = at.y.saturating_sub(1);
        let y1 = (at.y + 1).min(b.height - 1);
        for x in x0..=x1 {
            for y in y0..=y1 {
                let c = Coord::new(x, y);
                if c == at {
                    continue;
                }
                match self.index.get(&c) {
                    Some(&id) => out.push(id),
                    None => panic!("no cell registered at {c} while resolving neighbors of {at}"),
                }
            }
        }
        out
    }
}
