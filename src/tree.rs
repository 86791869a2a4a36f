//! Motion storage and a reference tree extender.

use crate::core::{Motion, MotionId};
use crate::graph::Region;
use crate::space::{ControlSpace, TreeExtender};
use rand::rngs::SmallRng;
use rand::Rng;

/// A flat arena of motions.
///
/// Extender implementations can embed this to satisfy the motion-ownership
/// side of the [`TreeExtender`] contract: motions are appended and never
/// moved, so a [`MotionId`] stays valid until [`clear`](MotionArena::clear).
#[derive(Clone, Debug, Default)]
pub struct MotionArena<S, C> {
    motions: Vec<Motion<S, C>>,
}

impl<S, C> MotionArena<S, C> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            motions: Vec::new(),
        }
    }

    /// Add a root motion.
    pub fn add_root(&mut self, state: S) -> MotionId {
        self.add(state, None, 0, None)
    }

    /// Add a motion and return its id.
    pub fn add(
        &mut self,
        state: S,
        control: Option<C>,
        steps: u32,
        parent: Option<MotionId>,
    ) -> MotionId {
        let id = self.motions.len();
        self.motions.push(Motion {
            state,
            control,
            steps,
            parent,
        });
        id
    }

    /// Read a motion.
    pub fn get(&self, id: MotionId) -> &Motion<S, C> {
        &self.motions[id]
    }

    /// Number of motions.
    pub fn len(&self) -> usize {
        self.motions.len()
    }

    /// Check whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    /// Iterate over all motions.
    pub fn iter(&self) -> impl Iterator<Item = &Motion<S, C>> {
        self.motions.iter()
    }

    /// Discard all motions.
    pub fn clear(&mut self) {
        self.motions.clear();
    }
}

/// A minimal reference extender: pick a random motion of the selected
/// region, apply a random control for a random number of steps.
///
/// This mirrors the role the RRT/EST subclasses play for the meta-planner
/// without committing to either's selection strategy. Validity of propagated
/// states is the [`ControlSpace`]'s concern; a control space that must avoid
/// obstacles clips or rejects inside `propagate`.
pub struct RandomTreeExtender<CS: ControlSpace> {
    control_space: CS,
    arena: MotionArena<CS::State, CS::Control>,
    max_steps: u32,
}

impl<CS: ControlSpace> RandomTreeExtender<CS> {
    /// Create an extender propagating controls for 1 to `max_steps` steps.
    /// `max_steps` is clamped to at least 1.
    pub fn new(control_space: CS, max_steps: u32) -> Self {
        Self {
            control_space,
            arena: MotionArena::new(),
            max_steps: max_steps.max(1),
        }
    }

    /// The underlying motion arena.
    pub fn arena(&self) -> &MotionArena<CS::State, CS::Control> {
        &self.arena
    }
}

impl<CS: ControlSpace> TreeExtender for RandomTreeExtender<CS> {
    type State = CS::State;
    type Control = CS::Control;

    fn add_root(&mut self, state: Self::State) -> MotionId {
        self.arena.add_root(state)
    }

    fn select_and_extend(
        &mut self,
        region: &Region,
        rng: &mut SmallRng,
        new_motions: &mut Vec<MotionId>,
    ) {
        if region.motions.is_empty() {
            return;
        }
        let parent = region.motions[rng.gen_range(0..region.motions.len())];
        let control = self.control_space.sample_control(rng);
        let steps = rng.gen_range(1..=self.max_steps);
        let state = self
            .control_space
            .propagate(&self.arena.get(parent).state, &control, steps);
        let id = self.arena.add(state, Some(control), steps, Some(parent));
        new_motions.push(id);
    }

    fn motion(&self, id: MotionId) -> &Motion<Self::State, Self::Control> {
        self.arena.get(id)
    }

    fn num_motions(&self) -> usize {
        self.arena.len()
    }

    fn clear(&mut self) {
        self.arena.clear();
    }
}
