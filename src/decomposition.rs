//! Uniform grid decomposition over a bounded projection space.

use crate::core::Bounds;
use crate::space::Decomposition;
use rand::rngs::SmallRng;
use rand::Rng;

/// A [`Decomposition`] that partitions the projection space into a uniform
/// grid of `length` cells per dimension.
///
/// States are related to the projection space by two caller-supplied
/// closures: `project` maps a state to projection coordinates, and `lift`
/// builds a full state from projection coordinates (sampling any remaining
/// state dimensions from the given RNG). For low-dimensional state types the
/// two are typically trivial copies.
pub struct GridDecomposition<P, L> {
    bounds: Bounds,
    length: usize,
    cell_volume: f64,
    project_fn: P,
    lift_fn: L,
}

impl<P, L> GridDecomposition<P, L> {
    /// Create a grid decomposition with `length` cells per dimension.
    /// `length` is clamped to at least one cell.
    pub fn new(bounds: Bounds, length: usize, project_fn: P, lift_fn: L) -> Self {
        let length = length.max(1);
        let cell_volume = bounds.volume() / (length.pow(bounds.dims() as u32) as f64);
        Self {
            bounds,
            length,
            cell_volume,
            project_fn,
            lift_fn,
        }
    }

    /// Cells per dimension.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Per-axis cell index of a region.
    fn cell_coords(&self, mut region: usize) -> Vec<usize> {
        let dims = self.bounds.dims();
        let mut coords = vec![0; dims];
        for axis in (0..dims).rev() {
            coords[axis] = region % self.length;
            region /= self.length;
        }
        coords
    }

    /// Region index of per-axis cell indices.
    fn region_of_cells(&self, cells: &[usize]) -> usize {
        cells.iter().fold(0, |id, &c| id * self.length + c)
    }

    fn cell_of_axis(&self, axis: usize, x: f64) -> usize {
        let frac = (x - self.bounds.lows[axis]) / self.bounds.extent(axis);
        ((frac * self.length as f64).floor() as i64).clamp(0, self.length as i64 - 1) as usize
    }
}

impl<S, P, L> Decomposition<S> for GridDecomposition<P, L>
where
    P: Fn(&S, &mut Vec<f64>),
    L: Fn(&[f64], &mut SmallRng) -> S,
{
    fn num_regions(&self) -> usize {
        self.length.pow(self.bounds.dims() as u32)
    }

    fn locate_region(&self, state: &S) -> usize {
        let mut coords = Vec::with_capacity(self.bounds.dims());
        (self.project_fn)(state, &mut coords);
        let cells: Vec<usize> = coords
            .iter()
            .enumerate()
            .map(|(axis, &x)| self.cell_of_axis(axis, x))
            .collect();
        self.region_of_cells(&cells)
    }

    fn neighbors(&self, region: usize, out: &mut Vec<usize>) {
        out.clear();
        let cells = self.cell_coords(region);
        let dims = self.bounds.dims();

        // Moore neighborhood: every cell differing by at most one step per
        // axis, excluding the cell itself.
        let mut offsets = vec![-1i64; dims];
        loop {
            if offsets.iter().any(|&o| o != 0) {
                let neighbor: Option<Vec<usize>> = cells
                    .iter()
                    .zip(&offsets)
                    .map(|(&c, &o)| {
                        let v = c as i64 + o;
                        (v >= 0 && v < self.length as i64).then_some(v as usize)
                    })
                    .collect();
                if let Some(neighbor) = neighbor {
                    out.push(self.region_of_cells(&neighbor));
                }
            }
            // Advance the offset vector like an odometer over {-1, 0, 1}.
            let mut axis = 0;
            loop {
                if axis == dims {
                    return;
                }
                offsets[axis] += 1;
                if offsets[axis] <= 1 {
                    break;
                }
                offsets[axis] = -1;
                axis += 1;
            }
        }
    }

    fn region_volume(&self, _region: usize) -> f64 {
        self.cell_volume
    }

    fn project(&self, state: &S, coords: &mut Vec<f64>) {
        (self.project_fn)(state, coords);
    }

    fn project_bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn sample_from_region(&self, region: usize, rng: &mut SmallRng) -> Option<S> {
        let cells = self.cell_coords(region);
        let coords: Vec<f64> = cells
            .iter()
            .enumerate()
            .map(|(axis, &c)| {
                let width = self.bounds.extent(axis) / self.length as f64;
                let low = self.bounds.lows[axis] + c as f64 * width;
                rng.gen_range(low..low + width)
            })
            .collect();
        Some((self.lift_fn)(&coords, rng))
    }
}
