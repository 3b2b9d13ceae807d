//! Validation of externally supplied start sets.
//!
//! The accepted format is a JSON list of `[x, y]` pairs, 0-indexed, for
//! example `[[0,9],[1,9],[2,9]]`. Blank input means "no start set".

use super::cell::{Bounds, Coord};
use crate::error::StartSetError;
use serde::Serialize;
use std::collections::HashSet;

/// Validated start set: in-bounds coordinates without duplicates, in input
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StartSet(Vec<Coord>);

impl StartSet {
    /// Validate already-typed coordinates against `bounds`.
    pub fn from_coords<I>(coords: I, bounds: Bounds) -> Result<Self, StartSetError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut seen = HashSet::new();
        let mut cells = Vec::new();
        for coord in coords {
            if !bounds.contains(coord) {
                return Err(StartSetError::OutOfBounds { coord, bounds });
            }
            if seen.insert(coord) {
                cells.push(coord);
            }
        }
        Ok(Self(cells))
    }

    pub fn coords(&self) -> &[Coord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fits(&self, bounds: Bounds) -> Result<(), StartSetError> {
        match self.0.iter().find(|&&c| !bounds.contains(c)) {
            Some(&coord) => Err(StartSetError::OutOfBounds { coord, bounds }),
            None => Ok(()),
        }
    }

    pub fn to_json(&self) -> String {
        coords_to_json(&self.0)
    }
}

/// Parse and validate raw start-set text. `Ok(None)` for blank input.
pub fn parse_start_set(raw: &str, bounds: Bounds) -> Result<Option<StartSet>, StartSetError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let coords: Vec<Coord> =
        serde_json::from_str(raw).map_err(|e| StartSetError::Malformed(e.to_string()))?;
    StartSet::from_coords(coords, bounds).map(Some)
}

/// Serialize coordinates in the same format `parse_start_set` accepts.
pub fn coords_to_json(coords: &[Coord]) -> String {
    // A Vec of two-element arrays cannot fail to serialize.
    serde_json::to_string(coords).unwrap_or_else(|_| String::from("[]"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN: Bounds = Bounds::new(10, 10);

    #[test]
    fn blank_input_is_no_start_set() {
        assert_eq!(parse_start_set("", TEN), Ok(None));
        assert_eq!(parse_start_set("   \n", TEN), Ok(None));
    }

    #[test]
    fn parses_coordinate_list() {
        let set = parse_start_set("[[0,9], [1,9], [2, 9]]", TEN).unwrap().unwrap();
        assert_eq!(
            set.coords(),
            &[Coord::new(0, 9), Coord::new(1, 9), Coord::new(2, 9)]
        );
    }

    #[test]
    fn duplicates_are_collapsed() {
        let set = parse_start_set("[[1,1],[2,2],[1,1]]", TEN).unwrap().unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn malformed_input_is_rejected() {
        for raw in ["not json", "[[1,2],", "[[1]]", "[[1,2,3]]", "[[-1,0]]", "{\"x\":1}", "[[1.5,2]]"] {
            assert!(
                matches!(parse_start_set(raw, TEN), Err(StartSetError::Malformed(_))),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let err = parse_start_set("[[0,0],[10,3]]", TEN).unwrap_err();
        assert_eq!(
            err,
            StartSetError::OutOfBounds { coord: Coord::new(10, 3), bounds: TEN }
        );
    }

    #[test]
    fn export_reparses() {
        let set = parse_start_set("[[3,4],[5,6]]", TEN).unwrap().unwrap();
        assert_eq!(set.to_json(), "[[3,4],[5,6]]");
        assert_eq!(parse_start_set(&set.to_json(), TEN).unwrap(), Some(set));
    }
}
