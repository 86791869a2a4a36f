//! # Syclop: Decomposition-Guided Kinodynamic Motion Planning
//!
//! A meta-planner that biases a low-level tree-based motion planner using a
//! high-level decomposition of the planning space. Given a decomposition
//! into regions, start and goal states, and a tree extender, the planner
//! repeatedly computes a *lead* (a corridor of adjacent regions likely to
//! connect start to goal) and focuses tree expansion inside regions along
//! that lead. Feedback from the growing tree (coverage and region-to-region
//! connections) reshapes the edge costs the next lead is computed from.
//!
//! ## Architecture
//!
//! - [`sampling`]: weighted and uniform sampling over region indices
//! - [`coverage`]: fine coverage grid over the projection space
//! - [`graph`]: the decomposition graph with per-region and per-edge
//!   estimates
//! - [`decomposition`]: a uniform grid [`Decomposition`] implementation
//! - [`tree`]: motion arena and a reference [`TreeExtender`]
//! - [`planner`]: the [`Syclop`] loop itself
//!
//! ## Data flow
//!
//! ```text
//!  start/goal states ──locate──► region indices
//!        │                           │
//!        ▼                           ▼
//!  ┌────────────┐  costs   ┌──────────────────┐
//!  │ Tree       │◄─────────│ Lead (A* or      │
//!  │ extension  │  lead    │ randomized DFS)  │
//!  │ in sampled │          └──────────────────┘
//!  │ regions    │                    ▲
//!  └─────┬──────┘                    │
//!        │ coverage + connection     │
//!        └──────────► estimates ─────┘
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use syclop::{
//!     GridDecomposition, ProblemDefinition, RandomTreeExtender, Syclop, SyclopConfig,
//! };
//!
//! let config = SyclopConfig::default().with_seed(7);
//! let decomp = GridDecomposition::new(bounds, 8, project, lift);
//! let extender = RandomTreeExtender::new(control_space, 10);
//! let mut planner = Syclop::new(space, decomp, extender, config);
//! planner.setup()?;
//!
//! let mut problem = ProblemDefinition::new(goal).with_start(start_state);
//! let result = planner.solve(&mut problem, || false)?;
//! if let Some(path) = &result.path {
//!     println!("path with {} steps, goal distance {:.3}", path.len(), result.goal_distance);
//! }
//! ```

mod availability;
pub mod config;
pub mod core;
pub mod coverage;
pub mod decomposition;
pub mod error;
mod estimates;
pub mod graph;
mod lead;
pub mod planner;
pub mod sampling;
pub mod space;
pub mod tree;

// Re-export main types at crate root
pub use crate::config::SyclopConfig;
pub use crate::core::{Bounds, Motion, MotionId, MotionPath, PathStep};
pub use crate::decomposition::GridDecomposition;
pub use crate::error::{Result, SyclopError};
pub use crate::graph::{Adjacency, DecompositionGraph, EdgeContext, EdgeCostFactor, Region};
pub use crate::planner::{ProblemDefinition, SolveFailure, SolveResult, SolveStatus, Syclop};
pub use crate::sampling::DiscreteDistribution;
pub use crate::space::{ControlSpace, Decomposition, Goal, StateSpace, TreeExtender};
pub use crate::tree::{MotionArena, RandomTreeExtender};
