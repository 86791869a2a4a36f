//! Trait contracts for the planner's external collaborators.
//!
//! The planner consumes a [`Decomposition`] of the planning space, a
//! [`StateSpace`] for sampling and validity, a [`Goal`] for the goal test,
//! and a [`TreeExtender`] that owns the low-level motion tree. This crate
//! ships reference implementations for decomposition and extension
//! ([`GridDecomposition`](crate::GridDecomposition),
//! [`RandomTreeExtender`](crate::RandomTreeExtender)); callers supply the
//! rest.

use crate::core::{Bounds, Motion, MotionId};
use crate::graph::Region;
use rand::rngs::SmallRng;

/// State sampling and validity checking.
///
/// Both are used only during free-volume estimation at setup; start states
/// are also validity-checked before seeding.
pub trait StateSpace {
    type State: Clone;

    /// Draw a uniform random state.
    fn sample_uniform(&self, rng: &mut SmallRng) -> Self::State;

    /// Check state validity (collision-freeness).
    fn is_valid(&self, state: &Self::State) -> bool;
}

/// A partition of the planning space into a finite set of regions with known
/// volumes and a neighbor relation.
pub trait Decomposition<S> {
    /// Number of regions; at least 1.
    fn num_regions(&self) -> usize;

    /// Region index containing the given state.
    fn locate_region(&self, state: &S) -> usize;

    /// Write the indices of the regions adjacent to `region` into `out`.
    /// The implementation clears `out` first.
    fn neighbors(&self, region: usize, out: &mut Vec<usize>);

    /// Geometric volume of a region; strictly positive.
    fn region_volume(&self, region: usize) -> f64;

    /// Project a state into the decomposition's projection space. The
    /// implementation clears `coords` first.
    fn project(&self, state: &S, coords: &mut Vec<f64>);

    /// Bounds of the projection space.
    fn project_bounds(&self) -> &Bounds;

    /// Sample a state whose projection lies inside the given region, if the
    /// decomposition supports lifting projections back to full states.
    /// Extenders that bias sampling toward their target region use this.
    fn sample_from_region(&self, region: usize, rng: &mut SmallRng) -> Option<S>;

    /// Admissible estimate of the lead cost from `region` to `goal_region`,
    /// used by the shortest-path lead search. The zero default degrades the
    /// search to Dijkstra, which is always admissible.
    fn heuristic(&self, region: usize, goal_region: usize) -> f64 {
        let _ = (region, goal_region);
        0.0
    }
}

/// Goal test and goal-state stream.
pub trait Goal<S> {
    /// Check whether a state satisfies the goal, returning the satisfaction
    /// flag and the distance to the goal.
    fn is_satisfied(&self, state: &S) -> (bool, f64);

    /// Produce the next goal state, or `None` when no more are available.
    /// The planner locates each produced state's region and adds it to the
    /// goal region set.
    fn sample_goal(&mut self) -> Option<S>;
}

/// Control sampling and propagation, consumed by extenders.
pub trait ControlSpace {
    type State: Clone;
    type Control: Clone;

    /// Draw a random control.
    fn sample_control(&self, rng: &mut SmallRng) -> Self::Control;

    /// Apply a control to a state for the given number of steps.
    fn propagate(&self, state: &Self::State, control: &Self::Control, steps: u32) -> Self::State;
}

/// The low-level tree planner driven by the meta-planner.
///
/// The extender owns the arena of [`Motion`]s; the planner stores
/// [`MotionId`]s and reads motions back through [`motion`](Self::motion).
/// This makes arena allocation or intrusive storage an implementation
/// choice of the extender.
pub trait TreeExtender {
    type State: Clone;
    type Control: Clone;

    /// Create a root motion for a start state and return its id.
    fn add_root(&mut self, state: Self::State) -> MotionId;

    /// Select one existing motion of `region` (or one adjacent to it) and
    /// perform one extension step, pushing any produced motion ids into
    /// `new_motions`. Producing zero motions is allowed. Each produced
    /// motion must have its state, control, step count, and parent set.
    fn select_and_extend(
        &mut self,
        region: &Region,
        rng: &mut SmallRng,
        new_motions: &mut Vec<MotionId>,
    );

    /// Read a motion by id.
    fn motion(&self, id: MotionId) -> &Motion<Self::State, Self::Control>;

    /// Total number of motions in the tree.
    fn num_motions(&self) -> usize;

    /// Discard all motions.
    fn clear(&mut self);
}
