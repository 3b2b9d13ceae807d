use super::cell::{CellId, Coord};
use super::registry::CellRegistry;
use std::collections::HashSet;

/// Cells switched on and off by one step, one jump or one reseed.
/// The two lists never share a cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delta {
    pub turned_on: Vec<CellId>,
    pub turned_off: Vec<CellId>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.turned_on.is_empty() && self.turned_off.is_empty()
    }

    /// Minimal change taking `before` to `after`; cells present in both are
    /// left out.
    pub fn between(before: &[CellId], after: &[CellId]) -> Self {
        let before_set: HashSet<CellId> = before.iter().copied().collect();
        let after_set: HashSet<CellId> = after.iter().copied().collect();
        Self {
            turned_on: after.iter().copied().filter(|id| !before_set.contains(id)).collect(),
            turned_off: before.iter().copied().filter(|id| !after_set.contains(id)).collect(),
        }
    }

    /// Resolve to coordinates for publication.
    pub fn to_coords(&self, registry: &CellRegistry) -> CoordDelta {
        CoordDelta {
            turned_on: self.turned_on.iter().map(|&id| registry.coord(id)).collect(),
            turned_off: self.turned_off.iter().map(|&id| registry.coord(id)).collect(),
        }
    }
}

/// A [`Delta`] expressed in board coordinates, as handed to observers.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CoordDelta {
    pub turned_on: Vec<Coord>,
    pub turned_off: Vec<Coord>,
}
