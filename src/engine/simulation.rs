//! Process-owned simulation state: registry, active set, generation counter
//! and the stored start set.

use super::active::ActiveSet;
use super::cell::{Bounds, CellId, CellState, Coord};
use super::delta::Delta;
use super::registry::CellRegistry;
use super::start_set::{coords_to_json, StartSet};
use super::stepper;
use crate::error::StartSetError;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct Simulation {
    registry: CellRegistry,
    active: ActiveSet,
    generation: u64,
    start_set: Option<StartSet>,
}

impl Simulation {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            registry: CellRegistry::with_bounds(bounds),
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.registry.bounds()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    pub fn start_set(&self) -> Option<&StartSet> {
        self.start_set.as_ref()
    }

    pub fn set_start_set(&mut self, start_set: Option<StartSet>) {
        self.start_set = start_set;
    }

    /// Whether the stored start set has at least one cell.
    pub fn has_start_set(&self) -> bool {
        self.start_set.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Active cells as coordinates, ordered by row then column.
    pub fn active_coords(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self.active.iter().map(|id| self.registry.coord(id)).collect();
        coords.sort_by_key(|c| (c.y, c.x));
        coords
    }

    /// Current generation in start-set format.
    pub fn export_active(&self) -> String {
        coords_to_json(&self.active_coords())
    }

    /// Grow the registry for new bounds. The caller resets playback. A stored
    /// start set that no longer fits is dropped and the reason returned.
    pub(crate) fn resize(&mut self, bounds: Bounds) -> Result<(), StartSetError> {
        self.registry.resize(bounds);
        if let Some(start) = &self.start_set {
            if let Err(e) = start.fits(bounds) {
                warn!(%bounds, error = %e, "dropping start set after resize");
                self.start_set = None;
                return Err(e);
            }
        }
        Ok(())
    }

    /// One generation forward.
    pub(crate) fn step(&mut self) -> Delta {
        let delta = stepper::step(&mut self.registry, &mut self.active);
        self.generation += 1;
        debug!(
            generation = self.generation,
            on = delta.turned_on.len(),
            off = delta.turned_off.len(),
            active = self.active.len(),
            "stepped"
        );
        delta
    }

    /// Switch every active cell off and return generation 0 with an empty
    /// board.
    pub(crate) fn clear(&mut self) -> Delta {
        let turned_off: Vec<CellId> = self.active.iter().collect();
        for &id in &turned_off {
            self.registry.set_state(id, CellState::Off);
        }
        self.active.clear();
        self.generation = 0;
        Delta { turned_on: Vec::new(), turned_off }
    }

    /// Replace the board with the stored start set at generation 0. The delta
    /// is the minimal change from what was on before.
    pub(crate) fn reseed(&mut self) -> Delta {
        let before: Vec<CellId> = self.active.iter().collect();
        self.clear();
        if let Some(start) = &self.start_set {
            for &coord in start.coords() {
                let id = match self.registry.id_of(coord) {
                    Some(id) => id,
                    None => panic!("start set cell {coord} is not registered"),
                };
                self.registry.set_state(id, CellState::On);
                self.active.push(id);
            }
        }
        Delta::between(&before, self.active.as_slice())
    }

    pub(crate) fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }
}
