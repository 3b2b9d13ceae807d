//! Built-in start sets and random boards.

use crate::engine::{Bounds, Coord};
use rand::prelude::*;

pub struct Pattern {
    pub name: &'static str,
    /// Offsets from the pattern's top-left corner, as (x, y).
    pub cells: &'static [(u32, u32)],
}

impl Pattern {
    /// Width and height of the pattern's bounding box.
    pub fn extent(&self) -> (u32, u32) {
        let w = self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let h = self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        (w, h)
    }

    /// Coordinates of the pattern centered on a board of `bounds`. Cells may
    /// fall outside a board that is too small; validation rejects those.
    pub fn centered(&self, bounds: Bounds) -> Vec<Coord> {
        let (w, h) = self.extent();
        let ox = bounds.width.saturating_sub(w) / 2;
        let oy = bounds.height.saturating_sub(h) / 2;
        self.cells
            .iter()
            .map(|&(x, y)| Coord::new(ox + x, oy + y))
            .collect()
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        // Ten in a row; grows into a pentadecathlon given room.
        name: "line",
        cells: &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0), (7, 0), (8, 0), (9, 0)],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    let name = name.to_lowercase();
    PATTERNS.iter().find(|p| p.name == name)
}

pub fn names() -> Vec<&'static str> {
    PATTERNS.iter().map(|p| p.name).collect()
}

/// Each in-bounds cell is on with probability `density`.
pub fn random(bounds: Bounds, density: f64, rng: &mut StdRng) -> Vec<Coord> {
    let density = density.clamp(0.0, 1.0);
    let mut cells = Vec::new();
    for y in 0..bounds.height {
        for x in 0..bounds.width {
            if rng.gen_bool(density) {
                cells.push(Coord::new(x, y));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find("Glider").map(|p| p.name), Some("glider"));
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn centered_glider() {
        let cells = find("glider").unwrap().centered(Bounds::new(9, 9));
        assert!(cells.contains(&Coord::new(4, 3)));
        assert!(cells.iter().all(|&c| Bounds::new(9, 9).contains(c)));
    }

    #[test]
    fn random_is_reproducible() {
        let b = Bounds::new(20, 10);
        let a = random(b, 0.3, &mut StdRng::seed_from_u64(7));
        let c = random(b, 0.3, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, c);
        assert!(random(b, 0.0, &mut StdRng::seed_from_u64(7)).is_empty());
        assert_eq!(random(b, 1.0, &mut StdRng::seed_from_u64(7)).len(), 200);
    }
}
