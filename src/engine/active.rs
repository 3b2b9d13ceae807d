//! Sparse list of the cells that are currently on.

use super::cell::CellId;
use super::registry::CellRegistry;

/// Invariant: a cell is listed here iff its state is on. Order carries no
/// meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSet {
    cells: Vec<CellId>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().copied()
    }

    pub fn as_slice(&self) -> &[CellId] {
        &self.cells
    }

    /// Append a cell that was just switched on.
    pub(crate) fn push(&mut self, id: CellId) {
        debug_assert!(!self.cells.contains(&id), "cell {id:?} already active");
        self.cells.push(id);
    }

    /// Drop every member that is no longer on. One linear pass.
    pub(crate) fn prune(&mut self, registry: &CellRegistry) {
        self.cells.retain(|&id| registry.is_on(id));
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cell::{Bounds, CellState, Coord};

    #[test]
    fn prune_keeps_only_on_cells() {
        let mut reg = CellRegistry::with_bounds(Bounds::new(10, 10));
        let mut active = ActiveSet::new();
        let mut expected = Vec::new();
        for x in 0..10 {
            let id = reg.id_of(Coord::new(x, 9)).unwrap();
            reg.set_state(id, CellState::On);
            active.push(id);
            if x % 2 == 0 {
                expected.push(id);
            }
        }
        for x in (1..10).step_by(2) {
            let id = reg.id_of(Coord::new(x, 9)).unwrap();
            reg.set_state(id, CellState::Off);
        }

        active.prune(&reg);
        assert_eq!(active.as_slice(), expected.as_slice());
    }

    #[test]
    fn prune_of_empty_set_is_noop() {
        let reg = CellRegistry::with_bounds(Bounds::new(2, 2));
        let mut active = ActiveSet::new();
        active.prune(&reg);
        assert!(active.is_empty());
    }
}
