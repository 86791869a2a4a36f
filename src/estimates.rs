//! Region free-volume estimation and the default edge cost factor.

use crate::graph::{DecompositionGraph, EdgeContext, FREE_VOLUME_EPSILON};
use crate::space::{Decomposition, StateSpace};
use log::debug;
use rand::rngs::SmallRng;

/// Estimate every region's free volume by drawing uniform states and
/// counting how many valid ones land in each region.
///
/// Regions that received no samples are assumed fully valid. Free volume is
/// floored at [`FREE_VOLUME_EPSILON`] so the derived weights stay finite.
pub(crate) fn setup_region_estimates<SP, D>(
    graph: &mut DecompositionGraph,
    space: &SP,
    decomp: &D,
    num_samples: usize,
    rng: &mut SmallRng,
) where
    SP: StateSpace,
    D: Decomposition<SP::State>,
{
    let n = graph.num_regions();
    let mut total = vec![0usize; n];
    let mut valid = vec![0usize; n];

    for _ in 0..num_samples {
        let s = space.sample_uniform(rng);
        let region = decomp.locate_region(&s);
        if space.is_valid(&s) {
            valid[region] += 1;
        }
        total[region] += 1;
    }

    for i in 0..n {
        let region = graph.region_mut(i);
        region.volume = decomp.region_volume(i);
        region.percent_valid_cells = if total[i] == 0 {
            1.0
        } else {
            valid[i] as f64 / total[i] as f64
        };
        region.free_volume =
            (region.percent_valid_cells * region.volume).max(FREE_VOLUME_EPSILON);
        region.update_weights();
    }

    debug!(
        "[Syclop] region estimates ready: {} regions, {} samples",
        n, num_samples
    );
}

/// The default edge cost factor.
///
/// Empty edges are priced by how often leads have included them without the
/// tree following through; crossed edges by how often they were selected.
/// Both are discounted by the edge's own coverage and by the endpoint
/// regions' alpha values, steering leads through under-explored space.
pub(crate) fn default_edge_cost(ctx: &EdgeContext<'_>) -> f64 {
    let adj = ctx.adjacency;
    let nsel = if adj.empty {
        adj.num_lead_inclusions
    } else {
        adj.num_selections
    } as f64;
    let cov = adj.cov_cells.len() as f64;
    let factor = (1.0 + nsel * nsel) / (1.0 + cov * cov);
    factor * ctx.source.alpha * ctx.target.alpha
}
