//! One generation transition over the active cells and their neighbors.

use super::active::ActiveSet;
use super::cell::{CellId, CellState};
use super::delta::Delta;
use super::registry::CellRegistry;
use std::collections::HashSet;

/// What the rule says should happen to a cell with `live` on-neighbors.
#[inline]
fn transition(state: CellState, live: usize) -> Option<CellState> {
    match (state, live) {
        (CellState::Off, 3) => Some(CellState::On),
        (CellState::On, 2) | (CellState::On, 3) => None,
        (CellState::On, _) => Some(CellState::Off),
        (CellState::Off, _) => None,
    }
}

/// Advance `active` by one generation and return what changed.
///
/// Only active cells and their neighbors are examined, each at most once.
/// All counts are taken against the state before the step; mutations are
/// applied after the scan.
pub fn step(registry: &mut CellRegistry, active: &mut ActiveSet) -> Delta {
    let mut delta = Delta::default();
    if active.is_empty() {
        return delta;
    }

    let mut checked: HashSet<CellId> = HashSet::with_capacity(active.len() * 9);
    for cell in active.iter() {
        evaluate(registry, cell, &mut checked, &mut delta);
        let count = registry.cached_neighbors(cell).len();
        for i in 0..count {
            let neighbor = registry.cached_neighbors(cell)[i];
            evaluate(registry, neighbor, &mut checked, &mut delta);
        }
    }

    for &id in &delta.turned_off {
        registry.set_state(id, CellState::Off);
    }
    for &id in &delta.turned_on {
        registry.set_state(id, CellState::On);
        active.push(id);
    }
    active.prune(registry);
    delta
}

fn evaluate(
    registry: &mut CellRegistry,
    id: CellId,
    checked: &mut HashSet<CellId>,
    delta: &mut Delta,
) {
    // Adjacency is resolved even for checked cells: callers walk it next.
    registry.resolve_adjacency(id);
    if !checked.insert(id) {
        return;
    }
    let state = registry.cell(id).state();
    match transition(state, registry.live_neighbors(id)) {
        Some(CellState::On) => delta.turned_on.push(id),
        Some(CellState::Off) => delta.turned_off.push(id),
        None => {}
    }
}
