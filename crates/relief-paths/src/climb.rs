//! Elevation step rules and the canonical heightmap queries.
//!
//! A climber can step to an adjacent cell at most one elevation unit higher
//! than the current one; drops of any size are fine. [`Ascent`] encodes that
//! rule directly. [`Descent`] is its mirror for searching backward from the
//! summit: a reverse step is legal when the forward step it corresponds to
//! would have been.

use relief_core::{Elevation, ElevationGrid, HeightMap, Point};

use crate::SearchRange;
use crate::searchrange::SearchError;
use crate::traits::StepRule;

/// Forward climbing rule: `to` may be at most one unit higher than `from`.
pub struct Ascent<'a> {
    grid: &'a ElevationGrid,
}

impl<'a> Ascent<'a> {
    pub fn new(grid: &'a ElevationGrid) -> Self {
        Self { grid }
    }
}

impl StepRule for Ascent<'_> {
    fn can_step(&self, from: Point, to: Point) -> bool {
        match (self.grid.at(from), self.grid.at(to)) {
            (Some(a), Some(b)) => a.rise(b) <= 1,
            _ => false,
        }
    }
}

/// Reverse climbing rule: `to` may be at most one unit *lower* than `from`.
pub struct Descent<'a> {
    grid: &'a ElevationGrid,
}

impl<'a> Descent<'a> {
    pub fn new(grid: &'a ElevationGrid) -> Self {
        Self { grid }
    }
}

impl StepRule for Descent<'_> {
    fn can_step(&self, from: Point, to: Point) -> bool {
        match (self.grid.at(from), self.grid.at(to)) {
            (Some(a), Some(b)) => a.rise(b) >= -1,
            _ => false,
        }
    }
}

/// Fewest steps from the map's start to its summit under the climbing rule.
pub fn shortest_ascent(map: &HeightMap) -> Result<i32, SearchError> {
    let mut sr = SearchRange::new(map.grid.bounds())?;
    sr.distance_to(&Ascent::new(&map.grid), map.start, map.summit)
}

/// Fewest steps from the summit down to any lowest-elevation cell.
///
/// Searches backward from the summit under [`Descent`], so one traversal
/// covers every candidate trailhead.
pub fn shortest_descent_to_lowest(map: &HeightMap) -> Result<i32, SearchError> {
    let grid = &map.grid;
    let mut sr = SearchRange::new(grid.bounds())?;
    sr.distance_to_match(&Descent::new(grid), map.summit, |p| {
        grid.at(p) == Some(Elevation::LOWEST)
    })
}
