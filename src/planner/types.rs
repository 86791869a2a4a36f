//! Planner result and problem types.

use crate::core::MotionPath;
use crate::space::Goal;

/// The start states and goal of one planning query.
pub struct ProblemDefinition<S, G: Goal<S>> {
    /// Start states. States added between solves are picked up by the next
    /// solve; invalid states are skipped with a warning.
    pub starts: Vec<S>,
    /// Goal test and goal-state stream.
    pub goal: G,
}

impl<S, G: Goal<S>> ProblemDefinition<S, G> {
    /// Create a problem with no start states yet.
    pub fn new(goal: G) -> Self {
        Self {
            starts: Vec::new(),
            goal,
        }
    }

    /// Add a start state.
    pub fn add_start(&mut self, state: S) {
        self.starts.push(state);
    }

    /// Builder-style start state addition.
    pub fn with_start(mut self, state: S) -> Self {
        self.starts.push(state);
        self
    }
}

/// Why a solve produced no path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveFailure {
    /// None of the provided start states was valid.
    NoValidStartStates,
    /// The goal produced no state to locate a goal region with.
    NoGoalStates,
    /// The termination condition fired before any motion was produced.
    Terminated,
}

/// Outcome classification of a solve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// A motion satisfied the goal.
    Exact,
    /// The goal was not reached; the path ends at the motion closest to it.
    Approximate,
    /// No path was added.
    Failed(SolveFailure),
}

/// Result of one [`solve`](crate::Syclop::solve) invocation.
#[derive(Clone, Debug)]
pub struct SolveResult<S, C> {
    /// Outcome classification.
    pub status: SolveStatus,
    /// Root-to-solution path, present for exact and approximate outcomes.
    pub path: Option<MotionPath<S, C>>,
    /// Distance from the path's final state to the goal; 0 need not hold
    /// even for exact solutions (goals may have a tolerance region).
    pub goal_distance: f64,
    /// Motions added to regions during this solve.
    pub motions_created: usize,
    /// Leads computed during this solve.
    pub leads_built: usize,
}

impl<S, C> SolveResult<S, C> {
    pub(crate) fn failed(reason: SolveFailure) -> Self {
        Self {
            status: SolveStatus::Failed(reason),
            path: None,
            goal_distance: f64::INFINITY,
            motions_created: 0,
            leads_built: 0,
        }
    }

    /// Whether a solution path (exact or approximate) was added.
    pub fn path_added(&self) -> bool {
        self.path.is_some()
    }

    /// Whether the goal was exactly satisfied.
    pub fn is_exact(&self) -> bool {
        self.status == SolveStatus::Exact
    }
}
