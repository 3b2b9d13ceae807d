//! Jumping straight to a target generation.

use super::cell::CellId;
use super::delta::Delta;
use super::simulation::Simulation;
use tracing::debug;

/// Outcome of a jump.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Replay {
    /// Change relative to what was on before the jump.
    pub delta: Delta,
    /// The board went extinct or reached a fixed point on the way, so every
    /// later generation looks the same.
    pub settled: bool,
}

/// Re-derive generation `target` from the stored start set and return the
/// change relative to what is on right now.
///
/// Stepping is silent: only the consolidated delta leaves this function.
/// Stepping stops early once the board is extinct or at a fixed point; the
/// counter still lands on `target`.
pub fn generation_delta(sim: &mut Simulation, target: u64) -> Replay {
    let before: Vec<CellId> = sim.active().iter().collect();
    sim.reseed();

    let mut settled = false;
    while sim.generation() < target {
        if sim.active().is_empty() || sim.step().is_empty() {
            settled = true;
            break;
        }
    }
    let reached = sim.generation();
    sim.set_generation(target);

    let delta = Delta::between(&before, sim.active().as_slice());
    debug!(
        target,
        reached,
        settled,
        on = delta.turned_on.len(),
        off = delta.turned_off.len(),
        "replayed"
    );
    Replay { delta, settled }
}
