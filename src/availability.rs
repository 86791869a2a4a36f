//! Availability: the regions of the current lead eligible for expansion.

use crate::graph::DecompositionGraph;
use crate::sampling::DiscreteDistribution;
use log::trace;
use rand::rngs::SmallRng;
use rand::Rng;

/// Rebuild the availability distribution from the current lead.
///
/// The lead is walked from the goal end back toward the start. Every region
/// that already contains tree motions is added with its current weight;
/// after each addition the walk stops with probability
/// `1 - prob_keep_adding`. The region closest to the goal that has motions
/// is therefore always available, and upstream regions are admitted with
/// geometrically decreasing probability.
pub(crate) fn compute_available_regions(
    graph: &DecompositionGraph,
    lead: &[usize],
    prob_keep_adding: f64,
    rng: &mut SmallRng,
    avail: &mut DiscreteDistribution,
) {
    avail.clear();
    for &index in lead.iter().rev() {
        let region = graph.region(index);
        if !region.motions.is_empty() {
            avail.add(index, region.weight);
            if rng.gen::<f64>() >= prob_keep_adding {
                break;
            }
        }
    }
    trace!(
        "[Syclop] availability: {} of {} lead regions",
        avail.len(),
        lead.len()
    );
}
