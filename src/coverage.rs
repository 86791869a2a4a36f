//! Coverage grid over the projection space.
//!
//! The coverage grid is much finer than the decomposition and is used only
//! to produce cell identifiers. Region and adjacency estimates track the set
//! of cells the motion tree has reached as a proxy for "have we been here
//! before".

use crate::core::Bounds;

/// A uniform grid overlaid on the projection space.
#[derive(Clone, Debug)]
pub struct CoverageGrid {
    lows: Vec<f64>,
    highs: Vec<f64>,
    length: usize,
}

impl CoverageGrid {
    /// Create a grid with `length` cells per dimension over the given
    /// bounds. `length` is clamped to at least one cell.
    pub fn new(bounds: &Bounds, length: usize) -> Self {
        Self {
            lows: bounds.lows.clone(),
            highs: bounds.highs.clone(),
            length: length.max(1),
        }
    }

    /// Cells per dimension.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Map projected coordinates to a cell identifier.
    ///
    /// Coordinates outside the bounds are clamped to the boundary cells, so
    /// every state maps to some cell.
    pub fn cell_of(&self, coords: &[f64]) -> u64 {
        debug_assert_eq!(coords.len(), self.lows.len());
        let mut id: u64 = 0;
        for (axis, &x) in coords.iter().enumerate() {
            let extent = self.highs[axis] - self.lows[axis];
            let frac = (x - self.lows[axis]) / extent;
            let cell = ((frac * self.length as f64).floor() as i64)
                .clamp(0, self.length as i64 - 1) as u64;
            id = id * self.length as u64 + cell;
        }
        id
    }
}
