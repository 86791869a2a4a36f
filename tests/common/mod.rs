//! Shared fixtures for integration tests.
//!
//! Small one- and two-dimensional planning problems with deterministic
//! extenders, so scenario outcomes are reproducible under a fixed seed.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::Rng;
use syclop::{
    Bounds, ControlSpace, Goal, GridDecomposition, Motion, MotionArena, MotionId, Region,
    StateSpace, TreeExtender,
};

// ─────────────────────────────────────────────────────────────────────────
// One-dimensional problems
// ─────────────────────────────────────────────────────────────────────────

/// States on a line segment `[0, length]`; everything is valid.
pub struct LineSpace {
    pub length: f64,
}

impl StateSpace for LineSpace {
    type State = f64;

    fn sample_uniform(&self, rng: &mut SmallRng) -> f64 {
        rng.gen_range(0.0..self.length)
    }

    fn is_valid(&self, _state: &f64) -> bool {
        true
    }
}

pub type ChainDecomp =
    GridDecomposition<fn(&f64, &mut Vec<f64>), fn(&[f64], &mut SmallRng) -> f64>;

/// A chain of `n` unit-width regions: 0 - 1 - ... - (n-1).
pub fn chain_decomp(n: usize) -> ChainDecomp {
    fn project(s: &f64, out: &mut Vec<f64>) {
        out.clear();
        out.push(*s);
    }
    fn lift(coords: &[f64], _rng: &mut SmallRng) -> f64 {
        coords[0]
    }
    GridDecomposition::new(
        Bounds::new(vec![0.0], vec![n as f64]),
        n,
        project as fn(&f64, &mut Vec<f64>),
        lift as fn(&[f64], &mut SmallRng) -> f64,
    )
}

/// Goal ball on the line. Yields its center once as a goal sample.
pub struct BallGoal {
    pub center: f64,
    pub radius: f64,
    sampled: bool,
}

impl BallGoal {
    pub fn new(center: f64, radius: f64) -> Self {
        Self {
            center,
            radius,
            sampled: false,
        }
    }
}

impl Goal<f64> for BallGoal {
    fn is_satisfied(&self, state: &f64) -> (bool, f64) {
        let d = (state - self.center).abs();
        (d <= self.radius, d)
    }

    fn sample_goal(&mut self) -> Option<f64> {
        if self.sampled {
            None
        } else {
            self.sampled = true;
            Some(self.center)
        }
    }
}

/// Deterministic extender: always continues from the last motion of the
/// selected region, moving a fixed step to the right (clamped to `max`).
/// Counts extension calls through a shared cell.
pub struct StepExtender {
    pub arena: MotionArena<f64, f64>,
    pub step: f64,
    pub max: f64,
    pub calls: Rc<Cell<usize>>,
}

impl StepExtender {
    pub fn new(step: f64, max: f64) -> Self {
        Self {
            arena: MotionArena::new(),
            step,
            max,
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl TreeExtender for StepExtender {
    type State = f64;
    type Control = f64;

    fn add_root(&mut self, state: f64) -> MotionId {
        self.arena.add_root(state)
    }

    fn select_and_extend(
        &mut self,
        region: &Region,
        _rng: &mut SmallRng,
        new_motions: &mut Vec<MotionId>,
    ) {
        self.calls.set(self.calls.get() + 1);
        let Some(&parent) = region.motions.last() else {
            return;
        };
        let state = (self.arena.get(parent).state + self.step).min(self.max);
        new_motions.push(self.arena.add(state, Some(self.step), 1, Some(parent)));
    }

    fn motion(&self, id: MotionId) -> &Motion<f64, f64> {
        self.arena.get(id)
    }

    fn num_motions(&self) -> usize {
        self.arena.len()
    }

    fn clear(&mut self) {
        self.arena.clear();
    }
}

/// Extender that never makes progress: every produced motion duplicates its
/// parent's state, so no coverage or connection estimate ever improves.
pub struct StagnantExtender {
    pub arena: MotionArena<f64, f64>,
    pub calls: Rc<Cell<usize>>,
}

impl StagnantExtender {
    pub fn new() -> Self {
        Self {
            arena: MotionArena::new(),
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl TreeExtender for StagnantExtender {
    type State = f64;
    type Control = f64;

    fn add_root(&mut self, state: f64) -> MotionId {
        self.arena.add_root(state)
    }

    fn select_and_extend(
        &mut self,
        region: &Region,
        _rng: &mut SmallRng,
        new_motions: &mut Vec<MotionId>,
    ) {
        self.calls.set(self.calls.get() + 1);
        let Some(&parent) = region.motions.first() else {
            return;
        };
        let state = self.arena.get(parent).state;
        new_motions.push(self.arena.add(state, Some(0.0), 1, Some(parent)));
    }

    fn motion(&self, id: MotionId) -> &Motion<f64, f64> {
        self.arena.get(id)
    }

    fn num_motions(&self) -> usize {
        self.arena.len()
    }

    fn clear(&mut self) {
        self.arena.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Two-dimensional problems
// ─────────────────────────────────────────────────────────────────────────

pub type Point2 = [f64; 2];

/// States in the square `[0, side]²`; everything is valid.
pub struct PlaneSpace {
    pub side: f64,
}

impl StateSpace for PlaneSpace {
    type State = Point2;

    fn sample_uniform(&self, rng: &mut SmallRng) -> Point2 {
        [
            rng.gen_range(0.0..self.side),
            rng.gen_range(0.0..self.side),
        ]
    }

    fn is_valid(&self, _state: &Point2) -> bool {
        true
    }
}

pub type PlaneDecomp =
    GridDecomposition<fn(&Point2, &mut Vec<f64>), fn(&[f64], &mut SmallRng) -> Point2>;

/// An `n` x `n` grid decomposition of the square `[0, side]²`.
pub fn plane_decomp(side: f64, n: usize) -> PlaneDecomp {
    fn project(s: &Point2, out: &mut Vec<f64>) {
        out.clear();
        out.extend_from_slice(s);
    }
    fn lift(coords: &[f64], _rng: &mut SmallRng) -> Point2 {
        [coords[0], coords[1]]
    }
    GridDecomposition::new(
        Bounds::new(vec![0.0, 0.0], vec![side, side]),
        n,
        project as fn(&Point2, &mut Vec<f64>),
        lift as fn(&[f64], &mut SmallRng) -> Point2,
    )
}

/// Bounded random drift in the plane.
pub struct PlaneDrift {
    pub side: f64,
    pub magnitude: f64,
}

impl ControlSpace for PlaneDrift {
    type State = Point2;
    type Control = Point2;

    fn sample_control(&self, rng: &mut SmallRng) -> Point2 {
        [
            rng.gen_range(-self.magnitude..self.magnitude),
            rng.gen_range(-self.magnitude..self.magnitude),
        ]
    }

    fn propagate(&self, state: &Point2, control: &Point2, steps: u32) -> Point2 {
        let t = steps as f64;
        [
            (state[0] + control[0] * t).clamp(0.0, self.side),
            (state[1] + control[1] * t).clamp(0.0, self.side),
        ]
    }
}

/// Goal disk in the plane. Yields its center once as a goal sample.
pub struct DiskGoal {
    pub center: Point2,
    pub radius: f64,
    sampled: bool,
}

impl DiskGoal {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self {
            center,
            radius,
            sampled: false,
        }
    }
}

impl Goal<Point2> for DiskGoal {
    fn is_satisfied(&self, state: &Point2) -> (bool, f64) {
        let dx = state[0] - self.center[0];
        let dy = state[1] - self.center[1];
        let d = (dx * dx + dy * dy).sqrt();
        (d <= self.radius, d)
    }

    fn sample_goal(&mut self) -> Option<Point2> {
        if self.sampled {
            None
        } else {
            self.sampled = true;
            Some(self.center)
        }
    }
}
